use crate::{
    geom::{Point, Rect},
    sampling::{sample_point, Margin},
    tile::Tile,
};

use rand::Rng;
use std::fmt;

/// The mutable 2D topology of one floor, plus the player's memory of it.
///
/// Both layers have the same fixed dimensions and are stored row-major. Every write is visible
/// to the next read.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    width: i32,
    height: i32,
    base: Vec<Tile>,
    explored: Vec<Tile>,
    rooms: Vec<Rect>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let num_cells = (width * height) as usize;

        Grid {
            width,
            height,
            base: vec![Tile::Empty; num_cells],
            explored: vec![Tile::Empty; num_cells],
            rooms: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, p: Point) -> Option<usize> {
        if self.is_inside(p) {
            Some((p.row * self.width + p.col) as usize)
        } else {
            None
        }
    }

    pub fn is_inside(&self, p: Point) -> bool {
        p.row >= 0 && p.row < self.height && p.col >= 0 && p.col < self.width
    }

    /// True iff all four corners of `rect` are on the grid.
    pub fn is_rect_inside(&self, rect: &Rect) -> bool {
        self.is_inside(Point::new(rect.top, rect.left))
            && self.is_inside(Point::new(rect.bottom - 1, rect.left))
            && self.is_inside(Point::new(rect.top, rect.right - 1))
            && self.is_inside(Point::new(rect.bottom - 1, rect.right - 1))
    }

    pub fn is_rect_empty(&self, rect: &Rect) -> bool {
        self.is_rect_inside(rect) && rect.points().all(|p| self.get(p) == Some(Tile::Empty))
    }

    /// `None` off the grid.
    pub fn get(&self, p: Point) -> Option<Tile> {
        self.index(p).map(|i| self.base[i])
    }

    /// Writes `tile` at `p` and returns the previous tile, or `None` (and no write) off the grid.
    pub fn set(&mut self, p: Point, tile: Tile) -> Option<Tile> {
        let i = self.index(p)?;

        Some(std::mem::replace(&mut self.base[i], tile))
    }

    pub fn explored(&self, p: Point) -> Option<Tile> {
        self.index(p).map(|i| self.explored[i])
    }

    /// Copies the true tile at `p` into the explored overlay if it is worth remembering.
    pub fn explore(&mut self, p: Point) {
        if let Some(i) = self.index(p) {
            let tile = self.base[i];
            if tile.is_explorable() {
                self.explored[i] = tile;
            }
        }
    }

    /// Turns a door into floor. Returns false, changing nothing, if there is no door at `p`.
    pub fn open_door(&mut self, p: Point) -> bool {
        match self.index(p) {
            Some(i) if self.base[i] == Tile::Door => {
                self.base[i] = Tile::Floor;
                true
            }
            _ => false,
        }
    }

    /// Off-grid cells block vision.
    pub fn blocks_vision(&self, p: Point) -> bool {
        self.get(p).map_or(true, Tile::blocks_vision)
    }

    pub fn is_in_room(&self, p: Point) -> bool {
        self.get(p) == Some(Tile::Floor)
    }

    pub fn rooms(&self) -> &[Rect] {
        &self.rooms
    }

    /// Stamps walls on the border of `room` and floor inside it, then records it. Horizontal walls
    /// take the corners.
    pub fn add_room(&mut self, room: Rect) {
        debug_assert!(room.is_valid() && self.is_rect_inside(&room));

        for p in room.points() {
            let tile = if p.row == room.top || p.row == room.bottom - 1 {
                Tile::HorizontalWall
            } else if p.col == room.left || p.col == room.right - 1 {
                Tile::VerticalWall
            } else {
                Tile::Floor
            };
            self.set(p, tile);
        }
        self.rooms.push(room);
    }

    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R, margin: Margin) -> Option<Point> {
        sample_point(rng, self.height, self.width, margin)
    }

    /// Rejection-samples a floor cell inside `margin`. Returns `None` only when no such cell
    /// exists at all.
    pub fn random_point_in_room<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        margin: Margin,
    ) -> Option<Point> {
        let area = Rect::new(
            margin.horizontal,
            self.width - margin.horizontal,
            margin.vertical,
            self.height - margin.vertical,
        );
        if !area.is_valid() || !area.points().any(|p| self.is_in_room(p)) {
            return None;
        }

        loop {
            let p = self.random_point(rng, margin)?;
            if self.is_in_room(p) {
                return Some(p);
            }
        }
    }

    pub fn points_with(&self, tile: Tile) -> impl Iterator<Item = Point> + '_ {
        Rect::new(0, self.width, 0, self.height)
            .points()
            .filter(move |p| self.get(*p) == Some(tile))
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.base.iter().filter(|t| **t == tile).count()
    }

    fn layer_rows(&self, layer: &[Tile]) -> Vec<String> {
        if self.width == 0 {
            return vec![String::new(); self.height as usize];
        }

        layer
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|t| t.symbol()).collect())
            .collect()
    }

    pub fn rows(&self) -> Vec<String> {
        self.layer_rows(&self.base)
    }

    pub fn explored_rows(&self) -> Vec<String> {
        self.layer_rows(&self.explored)
    }

    /// Debug view: each room's index written over its upper-left corner. The grid is unchanged.
    pub fn render_labeled(&self) -> String {
        let mut rows: Vec<Vec<char>> = self.rows().iter().map(|r| r.chars().collect()).collect();
        for (i, room) in self.rooms.iter().enumerate() {
            let row = &mut rows[room.top as usize];
            for (k, digit) in i.to_string().chars().enumerate() {
                let col = room.left as usize + k;
                if col < row.len() {
                    row[col] = digit;
                }
            }
        }

        rows.into_iter()
            .map(|r| r.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rows().join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::small_rng;

    #[test]
    fn test_new_grid_is_blank() {
        let grid = Grid::new(10, 4);
        assert_eq!(grid.count(Tile::Empty), 40);
        assert_eq!(grid.rows(), vec![" ".repeat(10); 4]);
        assert!(grid.rooms().is_empty());
    }

    #[test]
    fn test_bounds() {
        let grid = Grid::new(10, 4);
        assert!(grid.is_inside(Point::new(0, 0)));
        assert!(grid.is_inside(Point::new(3, 9)));
        assert!(!grid.is_inside(Point::new(4, 0)));
        assert!(!grid.is_inside(Point::new(0, -1)));
        assert_eq!(grid.get(Point::new(-1, 0)), None);

        assert!(grid.is_rect_inside(&Rect::new(0, 10, 0, 4)));
        assert!(!grid.is_rect_inside(&Rect::new(0, 11, 0, 4)));
        assert!(!grid.is_rect_empty(&Rect::new(-1, 3, 0, 2)));
    }

    #[test]
    fn test_add_room_stamps_walls_and_floor() {
        let mut grid = Grid::new(8, 5);
        grid.add_room(Rect::new(1, 6, 0, 4));
        assert_eq!(
            grid.rows(),
            vec![" -----  ", " |...|  ", " |...|  ", " -----  ", "        "]
        );
        assert_eq!(grid.rooms(), &[Rect::new(1, 6, 0, 4)]);
        assert!(!grid.is_rect_empty(&Rect::new(0, 3, 0, 3)));
        assert!(grid.is_rect_empty(&Rect::new(6, 8, 0, 5)));
    }

    #[test]
    fn test_set_reports_previous_tile() {
        let mut grid = Grid::new(3, 3);
        assert_eq!(grid.set(Point::new(1, 1), Tile::Corridor), Some(Tile::Empty));
        assert_eq!(grid.get(Point::new(1, 1)), Some(Tile::Corridor));
        assert_eq!(grid.set(Point::new(5, 1), Tile::Corridor), None);
    }

    #[test]
    fn test_explore_copies_only_explorable_tiles() {
        let mut grid = Grid::new(8, 5);
        grid.add_room(Rect::new(1, 6, 0, 4));
        grid.set(Point::new(4, 0), Tile::Corridor);

        for p in Rect::new(0, 8, 0, 5).points() {
            grid.explore(p);
        }

        assert_eq!(grid.explored(Point::new(0, 1)), Some(Tile::HorizontalWall));
        assert_eq!(grid.explored(Point::new(1, 1)), Some(Tile::VerticalWall));
        assert_eq!(grid.explored(Point::new(4, 0)), Some(Tile::Corridor));
        assert_eq!(grid.explored(Point::new(1, 2)), Some(Tile::Empty));
        assert_eq!(grid.explored_rows()[1], " |   |  ");
    }

    #[test]
    fn test_open_door_changes_exactly_one_cell() {
        let mut grid = Grid::new(8, 5);
        grid.add_room(Rect::new(1, 6, 0, 4));
        let door = Point::new(2, 1);
        grid.set(door, Tile::Door);
        let before = grid.clone();

        assert!(grid.open_door(door));
        let changed: Vec<_> = Rect::new(0, 8, 0, 5)
            .points()
            .filter(|p| grid.get(*p) != before.get(*p))
            .collect();
        assert_eq!(changed, vec![door]);
        assert_eq!(grid.get(door), Some(Tile::Floor));

        let after_first = grid.clone();
        assert!(!grid.open_door(door));
        assert_eq!(grid, after_first);
        assert!(!grid.open_door(Point::new(0, 1)));
        assert!(!grid.open_door(Point::new(10, 10)));
        assert_eq!(grid, after_first);
    }

    #[test]
    fn test_blocks_vision() {
        let mut grid = Grid::new(8, 5);
        grid.add_room(Rect::new(1, 6, 0, 4));
        assert!(grid.blocks_vision(Point::new(0, 1)));
        assert!(!grid.blocks_vision(Point::new(1, 2)));
        assert!(grid.blocks_vision(Point::new(4, 7)));
        assert!(grid.blocks_vision(Point::new(-1, 0)));
    }

    #[test]
    fn test_random_point_in_room_finds_floor() {
        let mut grid = Grid::new(20, 10);
        grid.add_room(Rect::new(2, 8, 2, 6));
        let mut rng = small_rng(1);
        for _ in 0..100 {
            let p = grid.random_point_in_room(&mut rng, Margin::default()).unwrap();
            assert!(grid.is_in_room(p));
        }
    }

    #[test]
    fn test_random_point_in_room_without_floor() {
        let mut grid = Grid::new(20, 10);
        let mut rng = small_rng(1);
        assert_eq!(grid.random_point_in_room(&mut rng, Margin::default()), None);

        // Floor exists, but only outside the margin.
        grid.add_room(Rect::new(0, 5, 0, 4));
        assert_eq!(grid.random_point_in_room(&mut rng, Margin::uniform(4)), None);
    }

    #[test]
    fn test_render_labeled_leaves_grid_untouched() {
        let mut grid = Grid::new(8, 5);
        grid.add_room(Rect::new(1, 6, 0, 4));
        let before = grid.clone();
        let labeled = grid.render_labeled();
        assert!(labeled.starts_with(" 0----"));
        assert_eq!(grid, before);
        assert_eq!(grid.to_string().lines().count(), 5);
    }
}
