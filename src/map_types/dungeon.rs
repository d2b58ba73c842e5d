use crate::{
    error::{GenerateError, SpecError},
    map_types::floor::{Floor, FloorSpec},
    sampling::make_rng,
};

use rand::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NUM_FLOORS: usize = 4;

/// A stack of floors where each floor's down stairs line up with the next floor's up stairs.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DungeonSpec {
    /// `None` draws a fresh seed from system entropy.
    pub seed: Option<u64>,
    pub num_floors: usize,
    /// Turn the first floor's up stairs and the last floor's down stairs back into floor.
    pub seal_ends: bool,
    pub floor: FloorSpec,
}

impl Default for DungeonSpec {
    fn default() -> Self {
        DungeonSpec {
            seed: None,
            num_floors: DEFAULT_NUM_FLOORS,
            seal_ends: true,
            floor: FloorSpec::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Dungeon {
    pub floors: Vec<Floor>,
}

impl DungeonSpec {
    pub fn from_ron_str(s: &str) -> Result<Self, SpecError> {
        let spec: DungeonSpec = ron::de::from_str(s)?;
        spec.floor.validate()?;

        Ok(spec)
    }

    pub fn to_ron_string(&self) -> Result<String, SpecError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Generates with an RNG seeded from `self.seed`.
    pub fn generate_seeded(&self) -> Result<Dungeon, GenerateError> {
        self.generate(&mut make_rng(self.seed))
    }

    pub fn generate(&self, rng: &mut impl Rng) -> Result<Dungeon, GenerateError> {
        log::debug!("Generating dungeon with {} floors", self.num_floors);

        let mut floors: Vec<Floor> = Vec::with_capacity(self.num_floors);
        for i in 0..self.num_floors {
            let entry = floors.last().map(Floor::down);
            let floor = self.floor.generate(entry, rng)?;
            log::debug!(
                "Floor {}: {} rooms after {} attempts",
                i,
                floor.rooms().len(),
                floor.attempts()
            );
            floors.push(floor);
        }

        if self.seal_ends {
            if let Some(first) = floors.first_mut() {
                first.seal_up();
            }
            if let Some(last) = floors.last_mut() {
                last.seal_down();
            }
        }

        Ok(Dungeon { floors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{sampling::small_rng, tile::Tile};

    #[test]
    fn test_floors_line_up() {
        let spec = DungeonSpec {
            seal_ends: false,
            ..DungeonSpec::default()
        };
        let dungeon = spec.generate(&mut small_rng(2024)).unwrap();

        assert_eq!(dungeon.floors.len(), DEFAULT_NUM_FLOORS);
        for pair in dungeon.floors.windows(2) {
            assert_eq!(pair[0].down(), pair[1].up());
        }
        for floor in dungeon.floors.iter() {
            assert_eq!(floor.grid().count(Tile::UpStairs), 1);
            assert_eq!(floor.grid().count(Tile::DownStairs), 1);
        }
    }

    #[test]
    fn test_sealed_ends() {
        let spec = DungeonSpec {
            seed: Some(7),
            num_floors: 2,
            ..DungeonSpec::default()
        };
        let dungeon = spec.generate_seeded().unwrap();
        let first = &dungeon.floors[0];
        let last = &dungeon.floors[1];

        assert_eq!(first.get(first.up()), Some(Tile::Floor));
        assert_eq!(first.get(first.down()), Some(Tile::DownStairs));
        assert_eq!(last.get(last.up()), Some(Tile::UpStairs));
        assert_eq!(last.get(last.down()), Some(Tile::Floor));
    }

    #[test]
    fn test_seeded_dungeons_repeat() {
        let spec = DungeonSpec {
            seed: Some(31),
            num_floors: 3,
            ..DungeonSpec::default()
        };
        let a = spec.generate_seeded().unwrap();
        let b = spec.generate_seeded().unwrap();
        for (fa, fb) in a.floors.iter().zip(b.floors.iter()) {
            assert_eq!(fa.grid(), fb.grid());
        }
    }

    #[test]
    fn test_zero_floors() {
        let spec = DungeonSpec {
            num_floors: 0,
            ..DungeonSpec::default()
        };
        assert!(spec.generate(&mut small_rng(1)).unwrap().floors.is_empty());
    }

    #[test]
    fn test_spec_from_ron() {
        let spec = DungeonSpec::from_ron_str("(seed: Some(5), num_floors: 2)").unwrap();
        assert_eq!(spec.seed, Some(5));
        assert_eq!(spec.num_floors, 2);
        assert!(spec.seal_ends);
        assert_eq!(spec.floor, FloorSpec::default());

        let text = spec.to_ron_string().unwrap();
        assert_eq!(DungeonSpec::from_ron_str(&text).unwrap(), spec);
    }
}
