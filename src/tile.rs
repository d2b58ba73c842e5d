use serde::{Deserialize, Serialize};

/// One cell of floor topology. The symbols are part of the persisted format and must not change.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum Tile {
    Empty,
    Floor,
    HorizontalWall,
    VerticalWall,
    Door,
    Corridor,
    UpStairs,
    DownStairs,
}

pub const ALL_TILES: [Tile; 8] = [
    Tile::Empty,
    Tile::Floor,
    Tile::HorizontalWall,
    Tile::VerticalWall,
    Tile::Door,
    Tile::Corridor,
    Tile::UpStairs,
    Tile::DownStairs,
];

impl Default for Tile {
    fn default() -> Self {
        Tile::Empty
    }
}

impl Tile {
    pub const fn symbol(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Floor => '.',
            Tile::HorizontalWall => '-',
            Tile::VerticalWall => '|',
            Tile::Door => '+',
            Tile::Corridor => '#',
            Tile::UpStairs => '<',
            Tile::DownStairs => '>',
        }
    }

    pub fn from_symbol(c: char) -> Option<Tile> {
        ALL_TILES.iter().copied().find(|t| t.symbol() == c)
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Tile::HorizontalWall | Tile::VerticalWall)
    }

    /// Tiles that are remembered in the explored overlay once seen.
    pub fn is_explorable(self) -> bool {
        matches!(
            self,
            Tile::HorizontalWall | Tile::VerticalWall | Tile::Corridor | Tile::Door
        )
    }

    pub fn blocks_vision(self) -> bool {
        matches!(
            self,
            Tile::Empty | Tile::Door | Tile::HorizontalWall | Tile::VerticalWall
        )
    }

    /// Closed doors count as passable; opening them is up to whoever walks through.
    pub fn is_passable(self) -> bool {
        matches!(
            self,
            Tile::Floor | Tile::Door | Tile::Corridor | Tile::UpStairs | Tile::DownStairs
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_are_unique_and_parse_back() {
        for t in ALL_TILES.iter() {
            assert_eq!(Tile::from_symbol(t.symbol()), Some(*t));
        }
        assert_eq!(Tile::from_symbol('x'), None);
    }

    #[test]
    fn test_alphabet() {
        let alphabet: String = ALL_TILES.iter().map(|t| t.symbol()).collect();
        assert_eq!(alphabet, " .-|+#<>");
    }

    #[test]
    fn test_empty_is_not_explorable() {
        assert!(!Tile::Empty.is_explorable());
        assert!(!Tile::Floor.is_explorable());
        assert!(Tile::Corridor.is_explorable());
        assert!(Tile::Door.is_explorable());
        assert!(Tile::VerticalWall.is_explorable());
    }
}
