//! The clock model: layout constants, palette, and the ordered assembly of
//! renderables.

mod assembly;
mod part;

pub mod layout;
pub mod palette;

pub use assembly::{ClockScene, PART_COUNT, ScenePart, blueprint};
pub use part::{PartGroup, PartRole};
