use std::collections::BTreeSet;

use anyhow::{Result, bail};
use clap::Parser;
use mapbuilder::map::GenerationLimits;
use mapbuilder::{GenerationConfig, MapBuilder, MapInfo, PipelineError};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
}

fn pick(rng: &mut ChaCha8Rng, min_value: u64, max_value: u64) -> u64 {
    min_value + rng.next_u64() % (max_value - min_value + 1)
}

fn random_config(rng: &mut ChaCha8Rng) -> GenerationConfig {
    GenerationConfig {
        candidate_rooms: pick(rng, 2, 120) as usize,
        max_room_len: pick(rng, 10, 40) as i32,
        margin_width: pick(rng, 5, 60) as i32,
        margin_height: pick(rng, 5, 60) as i32,
        limits: GenerationLimits {
            max_rooms: pick(rng, 1, 30) as usize,
            max_random_corridors: pick(rng, 0, 8) as usize,
        },
        ..GenerationConfig::default()
    }
}

fn check_invariants(map: &MapInfo) -> Result<()> {
    let rooms: Vec<_> = map.rooms().values().collect();
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            if a.bounds.intersects(&b.bounds) {
                bail!("Invariant failed: rooms {:?} and {:?} overlap", a.bounds, b.bounds);
            }
        }
    }

    if rooms.len() > map.generation_limits().max_rooms {
        bail!("Invariant failed: {} rooms exceed the cap", rooms.len());
    }

    let limits = map.room_size_limits();
    if rooms
        .iter()
        .any(|room| room.bounds.width < limits.min_width || room.bounds.height < limits.min_height)
    {
        bail!("Invariant failed: undersized room survived corridor feature separation");
    }

    if map.min_connected_corridors() >= rooms.len().max(1) {
        bail!(
            "Invariant failed: {} spanning corridors for {} rooms",
            map.min_connected_corridors(),
            rooms.len()
        );
    }

    let mut joined = BTreeSet::new();
    for (_, corridor) in map.corridors() {
        let (a, b) = corridor.rooms;
        if !joined.insert((a.min(b), a.max(b))) {
            bail!("Invariant failed: two corridors join the same rooms");
        }
        for id in [a, b] {
            let Some(room) = map.rooms().get(id) else {
                bail!("Invariant failed: corridor references a removed room");
            };
            let end = if id == a { corridor.start } else { corridor.end };
            if !room.bounds.contains(end) {
                bail!("Invariant failed: corridor end {end:?} is off the wall of {:?}", room.bounds);
            }
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting map fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut unsettled = 0;

    for run in 0..args.runs {
        let config = random_config(&mut rng);
        let run_seed = rng.next_u64();
        let builder = MapBuilder::new(config)?;

        match builder.generate(run_seed) {
            Ok(generated) => {
                if let Err(error) = check_invariants(&generated.map) {
                    bail!("run {run} (seed {run_seed}): {error}");
                }
                let replay = builder.generate(run_seed)?;
                if replay.report.fingerprint != generated.report.fingerprint {
                    bail!("run {run} (seed {run_seed}): replay produced a different map");
                }
            }
            Err(PipelineError::SeparationDidNotConverge { passes }) => {
                println!("run {run} (seed {run_seed}): separation unsettled after {passes} passes");
                unsettled += 1;
            }
            Err(error) => bail!("run {run} (seed {run_seed}): {error}"),
        }
    }

    println!("Fuzzing complete: {} runs, {} unsettled.", args.runs, unsettled);
    Ok(())
}
