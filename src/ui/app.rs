use crate::ai::{BestMove, Minimax};
use crate::error::{MoveError, SearchError};
use crate::game::{GameOutcome, GameState, Side, CENTER_COL, COLS};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{error, warn};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::thread::JoinHandle;

type PendingSearch = JoinHandle<Result<BestMove, SearchError>>;

pub struct App {
    game_state: GameState,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    searcher: Minimax,
    /// Automated move being computed off the UI thread.
    pending: Option<PendingSearch>,
}

impl App {
    pub fn new(searcher: Minimax) -> Self {
        App {
            game_state: GameState::initial(),
            selected_column: CENTER_COL,
            should_quit: false,
            message: None,
            searcher,
            pending: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.poll_automated_move(false);

            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') => {
                // An in-flight search belongs to the old game; let it finish unobserved.
                self.pending = None;
                self.game_state.reset();
                self.selected_column = CENTER_COL;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop the player's piece in the selected column, then start the reply.
    fn drop_piece(&mut self) {
        if self.pending.is_some() {
            self.message = Some("Computer is thinking...".to_string());
            return;
        }

        match self.game_state.apply_move_mut(self.selected_column, Side::Player) {
            Ok(GameOutcome::InProgress) => {
                self.message = None;
                self.start_automated_move();
            }
            Ok(outcome) => {
                self.message = outcome_message(outcome);
            }
            Err(MoveError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
            Err(e) => {
                self.message = Some(capitalize(&e.to_string()));
            }
        }
    }

    fn start_automated_move(&mut self) {
        let board = *self.game_state.board();
        let searcher = self.searcher.clone();
        self.pending = Some(std::thread::spawn(move || searcher.best_move(&board)));
    }

    /// Apply the automated move once its search is done. With `block` set,
    /// wait for it instead of checking.
    fn poll_automated_move(&mut self, block: bool) {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|handle| block || handle.is_finished());
        if !ready {
            return;
        }
        let Some(handle) = self.pending.take() else {
            return;
        };

        match handle.join() {
            Ok(Ok(best)) => self.apply_automated_move(best.column),
            Ok(Err(e)) => {
                error!("automated move failed: {e}");
                self.message = Some(format!("Search failed: {e}"));
            }
            Err(_) => {
                error!("search thread panicked");
                self.message = Some("Search failed".to_string());
            }
        }
    }

    fn apply_automated_move(&mut self, column: usize) {
        match self.game_state.apply_move_mut(column, Side::Automated) {
            Ok(GameOutcome::InProgress) => {
                self.message = Some(format!("Computer played column {column}"));
            }
            Ok(outcome) => {
                self.message = outcome_message(outcome);
            }
            Err(e) => {
                warn!("computer move in column {column} rejected: {e}");
                self.message = Some(capitalize(&e.to_string()));
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.game_state,
            self.selected_column,
            &self.message,
            self.pending.is_some(),
            self.searcher.depth(),
        );
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Minimax::default())
    }
}

fn outcome_message(outcome: GameOutcome) -> Option<String> {
    match outcome {
        GameOutcome::InProgress => None,
        GameOutcome::PlayerWins => Some("You win! Press 'r' to play again.".to_string()),
        GameOutcome::AutomatedWins => Some("Computer wins! Press 'r' to play again.".to_string()),
        GameOutcome::Draw => Some("It's a draw! Press 'r' to play again.".to_string()),
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
