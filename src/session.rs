#![cfg(feature = "std")]

use log::{debug, info};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{interval_at, sleep, Duration, Instant, Interval};

use crate::{
    core::{config::Timings, event::Deferred, game::GameEngine},
    presenter::Presenter,
};

/// Input from the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Reveal(usize),
    Reset,
    PlayAgain,
    ChangeDifficulty,
    ToggleTheme,
    Shutdown,
}

/// Cloneable sender side of a running [`GameSession`].
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: UnboundedSender<Command>,
}

impl SessionHandle {
    pub fn send(&self, command: Command) -> anyhow::Result<()> {
        self.tx
            .send(command)
            .map_err(|_| anyhow::anyhow!("Game session has stopped"))
    }

    pub fn reveal(&self, position: usize) -> anyhow::Result<()> {
        self.send(Command::Reveal(position))
    }

    pub fn reset(&self) -> anyhow::Result<()> {
        self.send(Command::Reset)
    }

    pub fn play_again(&self) -> anyhow::Result<()> {
        self.send(Command::PlayAgain)
    }

    pub fn change_difficulty(&self) -> anyhow::Result<()> {
        self.send(Command::ChangeDifficulty)
    }

    pub fn toggle_theme(&self) -> anyhow::Result<()> {
        self.send(Command::ToggleTheme)
    }

    pub fn shutdown(&self) -> anyhow::Result<()> {
        self.send(Command::Shutdown)
    }
}

/// Runs a [`GameEngine`] in real time.
///
/// One task owns the engine. UI commands, fired delayed callbacks and clock
/// ticks are all serialized through a single `select!` loop, so the engine is
/// never touched concurrently. Delayed callbacks run as detached sleeping
/// tasks and are never cancelled; the engine drops the ones whose board has
/// been replaced.
pub struct GameSession<P: Presenter> {
    engine: GameEngine,
    presenter: P,
    timings: Timings,
    commands: UnboundedReceiver<Command>,
    fired_tx: UnboundedSender<Deferred>,
    fired_rx: UnboundedReceiver<Deferred>,
    /// The single game clock and the board generation it was started for.
    ticker: Option<(u64, Interval)>,
}

impl<P: Presenter> GameSession<P> {
    pub fn new(engine: GameEngine, presenter: P, timings: Timings) -> (Self, SessionHandle) {
        let (tx, commands) = mpsc::unbounded_channel();
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let session = Self {
            engine,
            presenter,
            timings,
            commands,
            fired_tx,
            fired_rx,
            ticker: None,
        };
        (session, SessionHandle { tx })
    }

    /// Process input until [`Command::Shutdown`] arrives or every handle is
    /// dropped, then hand the engine back.
    pub async fn run(mut self) -> anyhow::Result<GameEngine> {
        loop {
            self.flush().await?;
            tokio::select! {
                command = self.commands.recv() => match command {
                    None | Some(Command::Shutdown) => break,
                    Some(command) => self.apply(command),
                },
                Some(action) = self.fired_rx.recv() => {
                    self.engine.apply_deferred(action);
                }
                _ = next_tick(&mut self.ticker) => self.engine.tick(),
            }
        }
        self.flush().await?;
        info!("game session stopped");
        Ok(self.engine)
    }

    fn apply(&mut self, command: Command) {
        debug!("command {:?}", command);
        match command {
            Command::Reveal(position) => {
                self.engine.reveal_card(position);
            }
            Command::Reset => self.engine.reset(),
            Command::PlayAgain => self.engine.play_again(),
            Command::ChangeDifficulty => self.engine.change_difficulty(),
            Command::ToggleTheme => self.engine.toggle_theme(),
            Command::Shutdown => {}
        }
    }

    /// Schedule new callbacks, reconcile the clock and forward notifications.
    async fn flush(&mut self) -> anyhow::Result<()> {
        for action in self.engine.take_deferred() {
            let delay = action.delay(&self.timings);
            debug!(
                "callback for generation {} due in {:?}",
                action.generation(),
                delay
            );
            let tx = self.fired_tx.clone();
            tokio::spawn(async move {
                sleep(delay).await;
                // Session may already be gone
                let _ = tx.send(action);
            });
        }
        self.sync_ticker();
        for event in self.engine.drain_events() {
            self.presenter.present(&event).await?;
        }
        Ok(())
    }

    fn sync_ticker(&mut self) {
        if !self.engine.timer_active() {
            if self.ticker.take().is_some() {
                debug!("clock stopped");
            }
            return;
        }
        let generation = self.engine.generation();
        if matches!(&self.ticker, Some((g, _)) if *g == generation) {
            return;
        }
        let period = self.timings.tick_interval.max(Duration::from_millis(1));
        self.ticker = Some((generation, interval_at(Instant::now() + period, period)));
        debug!("clock started for generation {}", generation);
    }
}

async fn next_tick(ticker: &mut Option<(u64, Interval)>) {
    match ticker {
        Some((_, interval)) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
