//! junebug core -- engine-agnostic primitives shared by the simulation and
//! any shell: rectangle math, input state tracking, and the fixed-tick
//! clock with its inline cooldown timers.

pub mod geom;
pub mod input;
pub mod tick;
