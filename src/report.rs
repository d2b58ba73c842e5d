use crate::{
    error::GenerateError,
    geom::Point,
    map_types::floor::{Floor, FloorSpec},
};

use rand::Rng;
use stats::{MinMax, OnlineStats};
use std::fmt;

/// Running statistics over many floor generations.
pub struct GenerationReport {
    pub floors: usize,
    pub failures: Vec<GenerateError>,
    attempts: OnlineStats,
    attempts_range: MinMax<usize>,
    rooms: OnlineStats,
    rooms_range: MinMax<usize>,
}

impl Default for GenerationReport {
    fn default() -> Self {
        GenerationReport::new()
    }
}

impl GenerationReport {
    pub fn new() -> Self {
        GenerationReport {
            floors: 0,
            failures: Vec::new(),
            attempts: OnlineStats::new(),
            attempts_range: MinMax::new(),
            rooms: OnlineStats::new(),
            rooms_range: MinMax::new(),
        }
    }

    pub fn record(&mut self, result: Result<&Floor, &GenerateError>) {
        match result {
            Ok(floor) => {
                self.floors += 1;
                self.attempts.add(floor.attempts());
                self.attempts_range.add(floor.attempts());
                self.rooms.add(floor.rooms().len());
                self.rooms_range.add(floor.rooms().len());
            }
            Err(e) => self.failures.push(e.clone()),
        }
    }

    pub fn mean_attempts(&self) -> f64 {
        self.attempts.mean()
    }

    pub fn max_attempts(&self) -> usize {
        self.attempts_range.max().copied().unwrap_or(0)
    }

    pub fn mean_rooms(&self) -> f64 {
        self.rooms.mean()
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "floors: {} generated, {} failed",
            self.floors,
            self.failures.len()
        )?;
        writeln!(
            f,
            "attempts per floor: mean {:.3}, stddev {:.3}, min {}, max {}",
            self.attempts.mean(),
            self.attempts.stddev(),
            self.attempts_range.min().copied().unwrap_or(0),
            self.max_attempts()
        )?;
        write!(
            f,
            "rooms per floor: mean {:.3}, stddev {:.3}, min {}, max {}",
            self.rooms.mean(),
            self.rooms.stddev(),
            self.rooms_range.min().copied().unwrap_or(0),
            self.rooms_range.max().copied().unwrap_or(0)
        )
    }
}

/// Generates `runs` independent floors and collects how hard each one was to build.
pub fn stress(
    spec: &FloorSpec,
    entry: Option<Point>,
    runs: usize,
    rng: &mut impl Rng,
) -> GenerationReport {
    let mut report = GenerationReport::new();
    for _ in 0..runs {
        let result = spec.generate(entry, rng);
        if let Err(e) = &result {
            log::warn!("Generation failed: {}", e);
        }
        report.record(result.as_ref());
    }

    report
}
