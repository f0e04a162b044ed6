//! Procedural generation for the galaxy: star systems, stations, and faction territory.

pub mod faction;
pub mod galaxy;
pub mod names;
pub mod star_system;
pub mod territory;

pub use faction::*;
pub use galaxy::*;
pub use names::*;
pub use star_system::*;
pub use territory::*;
