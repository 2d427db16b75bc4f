use memorama::{autoplay, AiPlayer, GameEngine, HeadlessGame, Timings, NUM_DIFFICULTIES};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Virtual time the computer spends before each card.
const THINK_MS: u64 = 800;
const MAX_REVEALS: usize = 10_000;

fn main() -> anyhow::Result<()> {
    memorama::init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!(
            "Usage: {} <seed> [recall]",
            args.first().map_or("sim", String::as_str)
        );
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let recall: f64 = match args.get(2) {
        Some(r) => r.parse()?,
        None => 0.8,
    };

    let mut games = Vec::new();
    for level in 0..NUM_DIFFICULTIES {
        let engine = GameEngine::with_difficulty(SmallRng::seed_from_u64(seed), level);
        let mut game = HeadlessGame::new(engine, Timings::default());
        let mut player = AiPlayer::new(recall);
        let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1 + level as u64));
        let summary = autoplay(&mut game, &mut player, &mut rng, THINK_MS, MAX_REVEALS)
            .ok_or_else(|| anyhow::anyhow!("level {} did not finish", level))?;
        games.push(summary);
    }

    let result = json!({
        "seed": seed,
        "recall": recall,
        "games": games,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
