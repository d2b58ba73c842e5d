use crate::{geom::Point, tile::Tile};

use rand::{prelude::*, rngs::SmallRng};
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

pub fn small_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// `None` seeds from system entropy, so every run differs.
pub fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => small_rng(seed),
        None => SmallRng::from_entropy(),
    }
}

/// Distance kept from the grid edges when sampling points.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Margin {
    pub vertical: i32,
    pub horizontal: i32,
}

impl Margin {
    pub const fn new(vertical: i32, horizontal: i32) -> Self {
        Margin {
            vertical,
            horizontal,
        }
    }

    pub const fn uniform(amount: i32) -> Self {
        Margin::new(amount, amount)
    }
}

/// Samples from `min, min + 2, min + 4, ...` strictly below `max`. Returns `min` for an empty
/// range.
pub fn sample_even_stride<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    let steps = (max - min + 1) / 2;
    if steps <= 1 {
        return min;
    }

    min + 2 * Uniform::from(0..steps).sample(rng)
}

/// A uniform point in `[margin.vertical, height - margin.vertical) x
/// [margin.horizontal, width - margin.horizontal)`, or `None` if that area is empty.
pub fn sample_point<R: Rng + ?Sized>(
    rng: &mut R,
    height: i32,
    width: i32,
    margin: Margin,
) -> Option<Point> {
    let (row_min, row_max) = (margin.vertical, height - margin.vertical);
    let (col_min, col_max) = (margin.horizontal, width - margin.horizontal);
    if row_min >= row_max || col_min >= col_max {
        return None;
    }

    let row = Uniform::from(row_min..row_max).sample(rng);
    let col = Uniform::from(col_min..col_max).sample(rng);

    Some(Point::new(row, col))
}

/// What a corridor leaves behind where it crosses a room wall.
pub fn roll_door<R: Rng + ?Sized>(rng: &mut R, door_chance: f64) -> Tile {
    if rng.gen::<f64>() < door_chance {
        Tile::Door
    } else {
        Tile::Corridor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_stride_stays_on_grid() {
        let mut rng = small_rng(7);
        for _ in 0..1000 {
            let h = sample_even_stride(&mut rng, 4, 10);
            assert!(h == 4 || h == 6 || h == 8, "{}", h);
            let w = sample_even_stride(&mut rng, 6, 22);
            assert!(w >= 6 && w < 22 && w % 2 == 0, "{}", w);
        }
    }

    #[test]
    fn test_even_stride_degenerate_range() {
        let mut rng = small_rng(7);
        assert_eq!(sample_even_stride(&mut rng, 4, 5), 4);
        assert_eq!(sample_even_stride(&mut rng, 4, 4), 4);
    }

    #[test]
    fn test_sample_point_respects_margin() {
        let mut rng = small_rng(3);
        for _ in 0..1000 {
            let p = sample_point(&mut rng, 25, 80, Margin::new(5, 10)).unwrap();
            assert!(p.row >= 5 && p.row < 20);
            assert!(p.col >= 10 && p.col < 70);
        }
    }

    #[test]
    fn test_sample_point_too_small() {
        let mut rng = small_rng(3);
        assert_eq!(sample_point(&mut rng, 10, 80, Margin::new(5, 10)), None);
        assert_eq!(sample_point(&mut rng, 25, 20, Margin::new(5, 10)), None);
    }

    #[test]
    fn test_roll_door_extremes() {
        let mut rng = small_rng(11);
        assert_eq!(roll_door(&mut rng, 0.0), Tile::Corridor);
        assert_eq!(roll_door(&mut rng, 1.0), Tile::Door);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let a: Vec<u32> = (0..8).map(|_| small_rng(42).gen()).collect();
        let mut r1 = small_rng(42);
        let mut r2 = small_rng(42);
        let b: Vec<u32> = (0..8).map(|_| r1.gen()).collect();
        let c: Vec<u32> = (0..8).map(|_| r2.gen()).collect();
        assert_eq!(b, c);
        assert!(a.iter().all(|x| *x == a[0]));
    }
}
