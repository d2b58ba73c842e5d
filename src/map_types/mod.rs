pub mod dungeon;
pub mod floor;
