pub mod adjacency;
pub mod error;
pub mod geom;
pub mod graph;
pub mod grid;
pub mod map_types;
pub mod report;
pub mod room;
pub mod sampling;
pub mod tile;

pub use error::{GenerateError, PlacementError, SpecError};
pub use geom::{Point, Rect};
pub use grid::Grid;
pub use map_types::{
    dungeon::{Dungeon, DungeonSpec},
    floor::{Floor, FloorSpec},
};
pub use tile::Tile;

/// Generates one fully connected floor. Pass the previous floor's down stairs as `entry` to stack
/// floors; `None` picks a random entry.
pub fn generate_floor(
    width: i32,
    height: i32,
    entry: Option<Point>,
    rng: &mut impl rand::Rng,
) -> Result<Floor, GenerateError> {
    let spec = FloorSpec {
        width,
        height,
        ..FloorSpec::default()
    };

    spec.generate(entry, rng)
}
