//! Prints generated dungeon floors as text.

use dungeon_floorgen::{
    graph::rooms_reachable_on_foot, report::stress, sampling::make_rng, DungeonSpec, Floor,
};

use clap::Parser;
use log::info;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

/// Generate dungeon floors made of rooms and straight corridors
#[derive(Parser, Debug)]
#[command(name = "floorgen")]
#[command(version, about, long_about = None)]
struct Args {
    /// RON file with a DungeonSpec; command line options override it
    #[arg(long = "spec")]
    spec: Option<PathBuf>,

    /// Seed for reproducible output (default: system entropy)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// Number of stacked floors
    #[arg(short = 'n', long = "floors")]
    floors: Option<usize>,

    #[arg(long = "width")]
    width: Option<i32>,

    #[arg(long = "height")]
    height: Option<i32>,

    /// Mark each room's index in its upper-left corner
    #[arg(short = 'l', long = "labels")]
    labels: bool,

    /// Keep the first floor's up stairs and the last floor's down stairs
    #[arg(long = "open-ends")]
    open_ends: bool,

    /// Generate this many single floors and print statistics instead of maps
    #[arg(long = "stress")]
    stress: Option<usize>,
}

fn print_floor(index: usize, floor: &Floor, labels: bool) {
    let reachable = rooms_reachable_on_foot(floor.grid(), floor.up());
    println!(
        "Floor {}: {} rooms ({} reachable on foot), up {:?}, down {:?}, {} attempts",
        index + 1,
        floor.rooms().len(),
        reachable.len(),
        floor.up(),
        floor.down(),
        floor.attempts()
    );
    if labels {
        println!("{}", floor.grid().render_labeled());
    } else {
        println!("{}", floor.grid());
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut spec = match &args.spec {
        Some(path) => DungeonSpec::from_ron_str(&fs::read_to_string(path)?)?,
        None => DungeonSpec {
            num_floors: 1,
            ..DungeonSpec::default()
        },
    };
    if args.seed.is_some() {
        spec.seed = args.seed;
    }
    if let Some(floors) = args.floors {
        spec.num_floors = floors;
    }
    if let Some(width) = args.width {
        spec.floor.width = width;
    }
    if let Some(height) = args.height {
        spec.floor.height = height;
    }
    if args.open_ends {
        spec.seal_ends = false;
    }
    spec.floor.validate()?;
    info!("Using spec {:?}", spec);

    if let Some(runs) = args.stress {
        let report = stress(&spec.floor, None, runs, &mut make_rng(spec.seed));
        println!("{}", report);
        return Ok(());
    }

    let dungeon = spec.generate_seeded()?;
    for (i, floor) in dungeon.floors.iter().enumerate() {
        print_floor(i, floor, args.labels);
    }

    Ok(())
}
