#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use memorama::{
    difficulty_index, init_logging, player::cli::HELP, player::parse_command, AiPlayer,
    ChannelPresenter, Command, ConsolePresenter, GameEngine, GameEvent, GameSession,
    JsonLinesPresenter, Player, Presenter, Timings, DEFAULT_DIFFICULTY, DIFFICULTY_LEVELS,
};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::io::{AsyncBufReadExt, BufReader};
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play a game in the terminal.
    Play {
        #[arg(long, value_parser = parse_difficulty, help = "Level name (Fácil, Medio, Difícil) or index")]
        difficulty: Option<usize>,
        #[arg(long, help = "Fix RNG seed for reproducible deals (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Print events as JSON lines instead of drawing the board")]
        json: bool,
    },
    /// Watch the computer play a game in real time.
    Watch {
        #[arg(long, value_parser = parse_difficulty, help = "Level name (Fácil, Medio, Difícil) or index")]
        difficulty: Option<usize>,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 0.8, help = "Probability that the computer uses its memory")]
        recall: f64,
        #[arg(long, default_value_t = 700, help = "Pause before each card, in milliseconds")]
        think_ms: u64,
    },
}

#[cfg(feature = "std")]
fn parse_difficulty(s: &str) -> Result<usize, String> {
    difficulty_index(s).ok_or_else(|| {
        let names: Vec<&str> = DIFFICULTY_LEVELS.iter().map(|l| l.name()).collect();
        format!("unknown difficulty '{}', expected one of {}", s, names.join(", "))
    })
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            difficulty,
            seed,
            json,
        } => {
            if let Some(s) = seed {
                eprintln!("Using fixed seed: {} (deals will be reproducible)", s);
            }
            let engine =
                GameEngine::with_difficulty(make_rng(seed), difficulty.unwrap_or(DEFAULT_DIFFICULTY));
            let engine = if json {
                play(engine, JsonLinesPresenter::stdout()).await?
            } else {
                println!("{}", HELP);
                play(engine, ConsolePresenter::interactive()).await?
            };
            let state = engine.state();
            let summary = format!(
                "Final: {} moves, score {}, time {}",
                state.moves(),
                state.score(),
                state.time()
            );
            // stdout carries only events in JSON mode
            if json {
                eprintln!("{}", summary);
            } else {
                println!("{}", summary);
            }
        }
        Commands::Watch {
            difficulty,
            seed,
            recall,
            think_ms,
        } => {
            let engine =
                GameEngine::with_difficulty(make_rng(seed), difficulty.unwrap_or(DEFAULT_DIFFICULTY));
            let rng = make_rng(seed.map(|s| s.wrapping_add(1)));
            watch(engine, AiPlayer::new(recall), rng, Duration::from_millis(think_ms)).await?;
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn play<P: Presenter + 'static>(
    engine: GameEngine,
    presenter: P,
) -> anyhow::Result<GameEngine> {
    let (session, handle) = GameSession::new(engine, presenter, Timings::default());
    let game = tokio::spawn(session.run());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Command::Shutdown) => break,
            Ok(command) => {
                if handle.send(command).is_err() {
                    break;
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }
    // Already stopped if the presenter failed
    let _ = handle.shutdown();

    game.await?
}

#[cfg(feature = "std")]
async fn watch(
    engine: GameEngine,
    mut ai: AiPlayer,
    mut rng: SmallRng,
    think: Duration,
) -> anyhow::Result<()> {
    let (observer, mut events) = ChannelPresenter::new();
    let (session, handle) =
        GameSession::new(engine, (ConsolePresenter::new(), observer), Timings::default());
    let game = tokio::spawn(session.run());

    while let Some(event) = events.recv().await {
        ai.observe(&event);
        let my_turn = match event {
            GameEvent::GameWon { .. } => break,
            GameEvent::BoardReady { .. }
            | GameEvent::CardRevealed { .. }
            | GameEvent::CardsMatched { .. }
            | GameEvent::CardsReverted { .. } => true,
            _ => false,
        };
        if my_turn {
            tokio::time::sleep(think).await;
            if let Some(position) = ai.select_card(&mut rng) {
                handle.reveal(position)?;
            }
        }
    }
    handle.shutdown()?;
    game.await??;
    Ok(())
}
