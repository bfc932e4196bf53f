//! Utility Module
//!
//! - [`OrbitControls`]: camera orbit controller for interactive viewing
//! - [`Timer`]: wall-clock frame timing
//! - [`Interval`]: fixed-cadence repeating interval fed by frame deltas

pub mod orbit_control;
pub mod time;

pub use orbit_control::OrbitControls;
pub use time::{Interval, Timer};
