use crate::{
    adjacency::Adjacency,
    error::{GenerateError, SpecError},
    geom::{Point, Rect},
    graph::{room_connectivity, ConnectivityReport},
    grid::Grid,
    room::{
        connect_rooms, generate_room, place_room, CorridorMode, RoomSpec, DEFAULT_DOOR_CHANCE,
    },
    sampling::Margin,
    tile::Tile,
};

use rand::prelude::*;
use rand_distr::Uniform;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const MAX_GENERATE_TRIES: usize = 200;

const PRIMARY_TRIES: usize = 5;
const REPAIR_TRIES: usize = 10;
const EXTRA_CONNECTIONS: usize = 10;
const EXTRA_TRIES: usize = 1;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FloorSpec {
    pub width: i32,
    pub height: i32,
    /// Half-open range for the number of rooms placed after the seed room.
    pub room_count: (usize, usize),
    pub room: RoomSpec,
    /// Keeps the down stairs away from the grid edges.
    pub exit_margin: Margin,
    pub door_chance: f64,
    pub max_generate_tries: usize,
}

impl Default for FloorSpec {
    fn default() -> Self {
        FloorSpec {
            width: 80,
            height: 25,
            room_count: (5, 8),
            room: RoomSpec::default(),
            exit_margin: Margin::uniform(6),
            door_chance: DEFAULT_DOOR_CHANCE,
            max_generate_tries: MAX_GENERATE_TRIES,
        }
    }
}

/// A finished floor. Every room is reachable from the up stairs.
///
/// The topology is fixed; the only mutations left are opening doors and exploring cells.
#[derive(Clone, Debug)]
pub struct Floor {
    grid: Grid,
    up: Point,
    down: Point,
    adjacency: Adjacency,
    connectivity: ConnectivityReport,
    attempts: usize,
}

impl Floor {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rooms(&self) -> &[Rect] {
        self.grid.rooms()
    }

    pub fn get(&self, p: Point) -> Option<Tile> {
        self.grid.get(p)
    }

    pub fn up(&self) -> Point {
        self.up
    }

    pub fn down(&self) -> Point {
        self.down
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn connectivity(&self) -> &ConnectivityReport {
        &self.connectivity
    }

    /// How many whole-floor attempts it took to produce this floor.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn open_door(&mut self, p: Point) -> bool {
        self.grid.open_door(p)
    }

    pub fn explore(&mut self, p: Point) {
        self.grid.explore(p)
    }

    /// Removes the up stairs, for the first floor of a dungeon.
    pub(crate) fn seal_up(&mut self) {
        self.grid.set(self.up, Tile::Floor);
    }

    /// Removes the down stairs, for the last floor of a dungeon.
    pub(crate) fn seal_down(&mut self) {
        self.grid.set(self.down, Tile::Floor);
    }
}

impl FloorSpec {
    pub fn from_ron_str(s: &str) -> Result<Self, SpecError> {
        let spec: FloorSpec = ron::de::from_str(s)?;
        spec.validate()?;

        Ok(spec)
    }

    pub fn to_ron_string(&self) -> Result<String, SpecError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn validate(&self) -> Result<(), SpecError> {
        let invalid = |msg: &str| Err(SpecError::Invalid(msg.to_string()));

        if self.width <= 0 || self.height <= 0 {
            return invalid("floor dimensions must be positive");
        }
        if self.room_count.0 > self.room_count.1 {
            return invalid("room_count range is reversed");
        }
        if self.room.height.0 < 2 || self.room.width.0 < 2 {
            return invalid("rooms need at least one interior cell");
        }
        if self.room.height.0 > self.room.height.1 || self.room.width.0 > self.room.width.1 {
            return invalid("room size range is reversed");
        }
        if !(0.0..=1.0).contains(&self.door_chance) {
            return invalid("door_chance must be within [0, 1]");
        }
        if self.max_generate_tries == 0 {
            return invalid("max_generate_tries must be at least 1");
        }

        Ok(())
    }

    /// Runs one generation attempt. Returns `Ok(None)` if the attempt produced a floor that is not
    /// fully connected; the caller should throw it away and try again.
    ///
    /// With no `entry`, the up stairs go to a random point inside the room center margins.
    pub fn try_generate(
        &self,
        entry: Option<Point>,
        rng: &mut impl Rng,
    ) -> Result<Option<Floor>, GenerateError> {
        let mut grid = Grid::new(self.width, self.height);

        let up = match entry.or_else(|| grid.random_point(rng, self.room.center_margin)) {
            Some(up) => up,
            None => {
                return Err(GenerateError::GridTooSmall {
                    width: self.width,
                    height: self.height,
                })
            }
        };

        let seed_room = place_room(&grid, &self.room, Some(up), rng)
            .map_err(|_| GenerateError::SeedRoom { entry: up })?;
        grid.add_room(seed_room);
        grid.set(up, Tile::UpStairs);

        let num_extra_rooms = if self.room_count.0 < self.room_count.1 {
            Uniform::from(self.room_count.0..self.room_count.1).sample(rng)
        } else {
            self.room_count.0
        };
        for _ in 0..num_extra_rooms {
            if let Some(room) = generate_room(&grid, &self.room, None, rng) {
                grid.add_room(room);
            }
        }
        log::debug!(
            "Placed {} of {} rooms",
            grid.rooms().len(),
            num_extra_rooms + 1
        );

        let mut adjacency = Adjacency::with_rooms(grid.rooms().len());
        let mut connected = self.connect_breadth_first(&mut grid, &mut adjacency, rng);
        log::debug!("After first pass: connected = {:?}", connected_indices(&connected));

        self.repair_unconnected(&mut grid, &mut adjacency, &mut connected, rng);
        log::debug!("After repair pass: connected = {:?}", connected_indices(&connected));

        self.add_extra_connections(&mut grid, &mut adjacency, rng);

        let down = match grid.random_point_in_room(rng, self.exit_margin) {
            Some(down) => down,
            None => {
                log::warn!("No floor cell inside the exit margin");
                return Ok(None);
            }
        };
        grid.set(down, Tile::DownStairs);
        log::debug!("Up stairs at {:?}, down stairs at {:?}", up, down);

        let connectivity = room_connectivity(&adjacency, grid.rooms().len(), 0);
        if !connectivity.is_complete() {
            log::warn!(
                "Rooms {:?} are unreachable; discarding floor",
                connectivity.unreached()
            );
            return Ok(None);
        }

        Ok(Some(Floor {
            grid,
            up,
            down,
            adjacency,
            connectivity,
            attempts: 1,
        }))
    }

    /// Generates floors until one is fully connected, giving up after `max_generate_tries`.
    pub fn generate(
        &self,
        entry: Option<Point>,
        rng: &mut impl Rng,
    ) -> Result<Floor, GenerateError> {
        for tries in 1..=self.max_generate_tries {
            if let Some(mut floor) = self.try_generate(entry, rng)? {
                floor.attempts = tries;
                return Ok(floor);
            }
        }

        Err(GenerateError::Exhausted {
            tries: self.max_generate_tries,
        })
    }

    /// Expands outward from the seed room: each connected room, in queue order, gets one strict
    /// attempt at every room that is still unconnected.
    fn connect_breadth_first(
        &self,
        grid: &mut Grid,
        adjacency: &mut Adjacency,
        rng: &mut impl Rng,
    ) -> Vec<bool> {
        let rooms = grid.rooms().to_vec();
        let mut connected = vec![false; rooms.len()];
        if rooms.is_empty() {
            return connected;
        }

        connected[0] = true;
        let mut queue = VecDeque::new();
        queue.push_back(0);
        while let Some(r1) = queue.pop_front() {
            for r2 in 0..rooms.len() {
                if connected[r2] {
                    continue;
                }
                if connect_rooms(
                    grid,
                    &rooms[r1],
                    &rooms[r2],
                    CorridorMode::Strict,
                    PRIMARY_TRIES,
                    self.door_chance,
                    rng,
                ) {
                    adjacency.insert(r1, r2);
                    connected[r2] = true;
                    queue.push_back(r2);
                }
            }
        }

        connected
    }

    /// Each straggler gets permissive attempts at the connected rooms, lowest index first, until
    /// one succeeds.
    fn repair_unconnected(
        &self,
        grid: &mut Grid,
        adjacency: &mut Adjacency,
        connected: &mut [bool],
        rng: &mut impl Rng,
    ) {
        let rooms = grid.rooms().to_vec();
        for r1 in 0..rooms.len() {
            if connected[r1] {
                continue;
            }
            for r2 in 0..rooms.len() {
                if r1 == r2 || !connected[r2] {
                    continue;
                }
                log::trace!("Repair: connecting {} to {}", r1, r2);
                if connect_rooms(
                    grid,
                    &rooms[r1],
                    &rooms[r2],
                    CorridorMode::Permissive,
                    REPAIR_TRIES,
                    self.door_chance,
                    rng,
                ) {
                    adjacency.insert(r1, r2);
                    connected[r1] = true;
                    break;
                }
            }
        }
    }

    /// Redundant corridors between random pairs of rooms. Failures don't matter.
    fn add_extra_connections(
        &self,
        grid: &mut Grid,
        adjacency: &mut Adjacency,
        rng: &mut impl Rng,
    ) {
        let rooms = grid.rooms().to_vec();
        if rooms.is_empty() {
            return;
        }

        let pick = Uniform::from(0..rooms.len());
        for _ in 0..EXTRA_CONNECTIONS {
            let r1 = pick.sample(rng);
            let r2 = pick.sample(rng);
            if r1 == r2 || adjacency.contains(r1, r2) {
                continue;
            }
            if connect_rooms(
                grid,
                &rooms[r1],
                &rooms[r2],
                CorridorMode::Strict,
                EXTRA_TRIES,
                self.door_chance,
                rng,
            ) {
                adjacency.insert(r1, r2);
            }
        }
    }
}

fn connected_indices(connected: &[bool]) -> Vec<usize> {
    connected
        .iter()
        .enumerate()
        .filter(|(_, c)| **c)
        .map(|(i, _)| i)
        .collect()
}
