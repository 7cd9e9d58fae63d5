//! junebug simulation core -- the fixed-tick runtime for a 2D side-scroller.
//!
//! Everything here runs single-threaded inside one simulation tick, in a
//! fixed order:
//!
//!   1. Sample input once, advance the tick clock once
//!   2. Player motion controller (input -> velocity -> collision -> platform
//!      side effects)
//!   3. Enemy AI variants (desired velocity -> gravity -> collision ->
//!      integration, shooters fire)
//!   4. Projectile integration
//!   5. Combat coordinator (contact damage, projectile hits, dead sweep)
//!   6. Camera follow
//!
//! Rendering, audio and level persistence live outside this crate; the world
//! emits [`event::SimEvent`]s for shells to consume and exposes
//! [`camera::Camera::apply`] as the world-to-screen transform contract.

pub mod actor;
pub mod camera;
pub mod collision;
pub mod combat;
pub mod enemy;
pub mod event;
pub mod level;
pub mod platform;
pub mod player;
pub mod projectile;
pub mod world;
