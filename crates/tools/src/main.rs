use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mapbuilder::MapBuilder;

mod seed;
mod settings;

use seed::SeedChoice;

#[derive(Parser)]
#[command(author, version, about = "Generate a dungeon map and print a stage summary", long_about = None)]
struct Args {
    /// Seed for the run; a runtime seed is generated when absent
    #[arg(short, long)]
    seed: Option<u64>,
    /// TOML generation config; missing keys keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print every room, corridor, and corridor feature after the summary
    #[arg(long)]
    list: bool,
    /// Print the default config as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", settings::default_config_toml()?);
        return Ok(());
    }

    let config = settings::load_config(args.config.as_deref())?;
    let seed = SeedChoice::resolve(args.seed);
    println!("Using {} seed {}", seed.label(), seed.value());

    let builder = MapBuilder::new(config).context("Config rejected by map builder")?;
    let generated = builder
        .generate(seed.value())
        .with_context(|| format!("Map generation failed for seed {}", seed.value()))?;

    println!("{}", generated.report);

    if args.list {
        let map = &generated.map;
        for (id, room) in map.rooms() {
            println!("room {id:?}: {:?} corridors={}", room.bounds, room.corridors.len());
        }
        for (id, corridor) in map.corridors() {
            println!(
                "corridor {id:?}: ({}, {}) -> ({}, {})",
                corridor.start.x, corridor.start.y, corridor.end.x, corridor.end.y
            );
        }
        for (id, feature) in map.corridor_features() {
            println!("feature {id:?}: {:?} linked={:?}", feature.bounds, feature.linked_corridor);
        }
    }

    Ok(())
}
