use crate::{
    error::PlacementError,
    geom::{Point, Rect},
    grid::Grid,
    sampling::{roll_door, sample_even_stride, Margin},
    tile::Tile,
};

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

/// Hard cap on tries to fit one room.
pub const MAX_ROOM_ATTEMPTS: usize = 500;

/// Empty cells required around a new room, on every side.
pub const ROOM_BUFFER: i32 = 2;

pub const DEFAULT_DOOR_CHANCE: f64 = 0.33;

/// Room size ranges are half-open and sampled in steps of 2, starting at the minimum.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RoomSpec {
    pub height: (i32, i32),
    pub width: (i32, i32),
    /// Keeps randomly chosen room centers away from the grid edges.
    pub center_margin: Margin,
}

impl Default for RoomSpec {
    fn default() -> Self {
        RoomSpec {
            height: (4, 10),
            width: (6, 22),
            center_margin: Margin::new(5, 10),
        }
    }
}

/// Tries to find a spot for a room centered on `center`, or on a random point inside the margins
/// if no center is given. The room and a `ROOM_BUFFER` around it must be empty and on the grid.
///
/// The grid is not modified; commit the result with `Grid::add_room`.
pub fn place_room<R: Rng + ?Sized>(
    grid: &Grid,
    spec: &RoomSpec,
    center: Option<Point>,
    rng: &mut R,
) -> Result<Rect, PlacementError> {
    let mut attempts = 0;
    while attempts < MAX_ROOM_ATTEMPTS {
        attempts += 1;

        let c = match center.or_else(|| grid.random_point(rng, spec.center_margin)) {
            Some(c) => c,
            None => continue,
        };
        let height = sample_even_stride(rng, spec.height.0, spec.height.1);
        let width = sample_even_stride(rng, spec.width.0, spec.width.1);

        let room = Rect::from_center(&c, height, width);
        if grid.is_rect_empty(&room.grow(ROOM_BUFFER)) {
            return Ok(room);
        }
    }

    Err(PlacementError::Exhausted { attempts })
}

/// Like `place_room`, but a failure is just `None`.
pub fn generate_room<R: Rng + ?Sized>(
    grid: &Grid,
    spec: &RoomSpec,
    center: Option<Point>,
    rng: &mut R,
) -> Option<Rect> {
    place_room(grid, spec, center, rng).ok()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CorridorMode {
    /// Corridors may only cross empty cells and the two rooms' facing walls.
    Strict,
    /// Corridors may also cross existing corridors.
    Permissive,
}

/// Tries up to `tries` times to join two committed rooms with a straight corridor. Each try
/// attempts both a horizontal segment (when the rooms share interior rows) and a vertical one
/// (when they share interior columns), at a freshly rolled row/column.
///
/// Wall cells crossed by a corridor become a door with probability `door_chance`, otherwise
/// corridor. Returns whether anything was carved.
pub fn connect_rooms<R: Rng + ?Sized>(
    grid: &mut Grid,
    a: &Rect,
    b: &Rect,
    mode: CorridorMode,
    tries: usize,
    door_chance: f64,
    rng: &mut R,
) -> bool {
    let ia = a.shrink(1);
    let ib = b.shrink(1);

    for attempt in 0..tries {
        let mut connected = false;

        // Horizontal.
        let (top, bottom) = (ia.top.max(ib.top), ia.bottom.min(ib.bottom));
        if top < bottom {
            let row = Uniform::from(top..bottom).sample(rng);
            let cols = ia.right.min(ib.right)..ia.left.max(ib.left);
            let path: Vec<_> = cols.map(|col| Point::new(row, col)).collect();
            connected |= try_carve(grid, &path, Tile::VerticalWall, mode, door_chance, rng);
        }

        // Vertical.
        let (left, right) = (ia.left.max(ib.left), ia.right.min(ib.right));
        if left < right {
            let col = Uniform::from(left..right).sample(rng);
            let rows = ia.bottom.min(ib.bottom)..ia.top.max(ib.top);
            let path: Vec<_> = rows.map(|row| Point::new(row, col)).collect();
            connected |= try_carve(grid, &path, Tile::HorizontalWall, mode, door_chance, rng);
        }

        if connected {
            log::trace!("Connected {:?} and {:?} on try {}", a, b, attempt + 1);
            return true;
        }
    }

    false
}

/// `path` runs from one room's facing wall to the other's. Nothing is written unless the whole
/// path is clear.
fn try_carve<R: Rng + ?Sized>(
    grid: &mut Grid,
    path: &[Point],
    wall: Tile,
    mode: CorridorMode,
    door_chance: f64,
    rng: &mut R,
) -> bool {
    let (first, last) = match (path.first(), path.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return false,
    };

    let is_clear = path.iter().all(|p| match grid.get(*p) {
        Some(Tile::Empty) => true,
        Some(Tile::Corridor) => mode == CorridorMode::Permissive,
        Some(t) if t == wall => *p == first || *p == last,
        _ => false,
    });
    if !is_clear {
        return false;
    }

    for p in path.iter() {
        match grid.get(*p) {
            Some(Tile::Empty) => {
                grid.set(*p, Tile::Corridor);
            }
            Some(t) if t == wall => {
                grid.set(*p, roll_door(rng, door_chance));
            }
            _ => (),
        }
    }

    true
}
