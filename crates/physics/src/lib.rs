//! 2D ship kinematics and hit detection for the space trader simulation.

pub mod collision;
pub mod kinematics;

pub use collision::*;
pub use kinematics::*;
