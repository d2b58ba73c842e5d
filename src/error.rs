use crate::geom::Point;

use thiserror::Error;

/// A single room could not be fit anywhere. Callers skip the room.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum PlacementError {
    #[error("no room fit after {attempts} attempts")]
    Exhausted { attempts: usize },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerateError {
    #[error("cannot place the first room around entry point {entry:?}")]
    SeedRoom { entry: Point },

    #[error("a {width}x{height} grid leaves no space inside the room margins")]
    GridTooSmall { width: i32, height: i32 },

    #[error("failed to generate a connected floor after {tries} tries")]
    Exhausted { tries: usize },
}

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("invalid spec: {0}")]
    Parse(#[from] ron::Error),

    #[error("invalid spec: {0}")]
    Invalid(String),
}
