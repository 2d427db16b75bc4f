#![cfg(feature = "std")]

use std::fmt::Write as _;
use std::io::{self, Write};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    core::{card::CardState, event::GameEvent},
    player::BoardTracker,
};

/// Something that renders engine notifications.
#[async_trait::async_trait]
pub trait Presenter: Send {
    async fn present(&mut self, event: &GameEvent) -> anyhow::Result<()>;
}

#[async_trait::async_trait]
impl<P: Presenter + ?Sized> Presenter for Box<P> {
    async fn present(&mut self, event: &GameEvent) -> anyhow::Result<()> {
        (**self).present(event).await
    }
}

/// Forward every event to both presenters, left first.
#[async_trait::async_trait]
impl<A: Presenter, B: Presenter> Presenter for (A, B) {
    async fn present(&mut self, event: &GameEvent) -> anyhow::Result<()> {
        self.0.present(event).await?;
        self.1.present(event).await
    }
}

/// Presenter that hands events to another task.
pub struct ChannelPresenter {
    tx: UnboundedSender<GameEvent>,
}

impl ChannelPresenter {
    pub fn new() -> (Self, UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait::async_trait]
impl Presenter for ChannelPresenter {
    async fn present(&mut self, event: &GameEvent) -> anyhow::Result<()> {
        self.tx
            .send(event.clone())
            .map_err(|_| anyhow::anyhow!("Presenter channel closed"))
    }
}

/// Writes one JSON object per event.
pub struct JsonLinesPresenter<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> JsonLinesPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl JsonLinesPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

#[async_trait::async_trait]
impl<W: Write + Send> Presenter for JsonLinesPresenter<W> {
    async fn present(&mut self, event: &GameEvent) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Draw the board as a grid of cells. Face-down cards use `#` in dark mode and
/// `.` in light mode; face-up cards show their glyph, matched ones in brackets.
pub fn render_board(board: &BoardTracker, dark_mode: bool) -> String {
    let columns = board.columns().max(1);
    let back = if dark_mode { '#' } else { '.' };
    let mut out = String::new();
    for row in board.cards().chunks(columns) {
        for card in row {
            let glyph = card.symbol.map(|s| s.glyph()).unwrap_or(back);
            let cell = match card.state {
                CardState::Hidden => std::format!("{:>3} {} ", card.position + 1, back),
                CardState::Revealed => std::format!("{:>3} {} ", card.position + 1, glyph),
                CardState::Matched => std::format!("{:>3}[{}]", card.position + 1, glyph),
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out
}

fn win_banner(time: &str, moves: u32, score: u32, replay_prompt: bool) -> String {
    let mut out = String::from("\n╔════════════════════════════════════╗\n");
    out.push_str("║              YOU WIN!              ║\n");
    out.push_str("╚════════════════════════════════════╝\n");
    let _ = writeln!(out, "Time {}  Moves {}  Score {}", time, moves, score);
    if replay_prompt {
        out.push_str("Type 'again' to play again or 'quit' to leave.\n");
    }
    out
}

/// Text presenter for terminals.
pub struct ConsolePresenter {
    board: BoardTracker,
    dark_mode: bool,
    counters: String,
    replay_prompt: bool,
}

impl ConsolePresenter {
    /// Presenter for a spectator; the win banner asks nothing.
    pub fn new() -> Self {
        Self {
            board: BoardTracker::new(),
            dark_mode: true,
            counters: String::new(),
            replay_prompt: false,
        }
    }

    /// Presenter for a player typing commands, who is offered a rematch
    /// after each win.
    pub fn interactive() -> Self {
        Self {
            replay_prompt: true,
            ..Self::new()
        }
    }

    fn print_board(&self) {
        let mut screen = String::new();
        let _ = writeln!(screen, "\n[{}] {}", self.board.difficulty(), self.counters);
        screen.push_str(&render_board(&self.board, self.dark_mode));
        print!("{}", screen);
    }
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Presenter for ConsolePresenter {
    async fn present(&mut self, event: &GameEvent) -> anyhow::Result<()> {
        self.board.apply(event);
        match event {
            GameEvent::BoardReady { .. }
            | GameEvent::CardRevealed { .. }
            | GameEvent::CardsMatched { .. }
            | GameEvent::CardsReverted { .. } => self.print_board(),
            GameEvent::CountersChanged { moves, score, time } => {
                self.counters = std::format!("Moves {} | Score {} | Time {}", moves, score, time);
            }
            GameEvent::GameWon { time, moves, score } => {
                print!("{}", win_banner(time, *moves, *score, self.replay_prompt));
            }
            GameEvent::ThemeChanged { dark_mode } => {
                self.dark_mode = *dark_mode;
                println!("{} mode", if *dark_mode { "Dark" } else { "Light" });
                self.print_board();
            }
        }
        io::stdout().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{CardView, SymbolId};

    #[test]
    fn rematch_prompt_only_for_interactive_play() {
        let watched = win_banner("00:42", 6, 1400, false);
        assert!(watched.contains("Time 00:42  Moves 6  Score 1400"));
        assert!(!watched.contains("again"));
        assert!(win_banner("00:42", 6, 1400, true).contains("Type 'again'"));
        assert!(!ConsolePresenter::new().replay_prompt);
        assert!(ConsolePresenter::interactive().replay_prompt);
    }

    #[test]
    fn renders_rows_by_column_count() {
        let mut board = BoardTracker::new();
        board.apply(&GameEvent::BoardReady {
            difficulty: "Test",
            columns: 2,
            cards: (0..4).map(CardView::hidden).collect(),
        });
        board.apply(&GameEvent::CardRevealed {
            position: 1,
            symbol: SymbolId::new(2),
        });
        let text = render_board(&board, true);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("2 D"));
        assert!(lines[1].contains("3 #"));
        assert!(render_board(&board, false).contains("1 ."));
    }
}
