#![cfg(feature = "std")]

//! The foreground number guessing session.

use std::io::BufRead;

use crate::cancel::CancellationSignal;
use crate::console::Console;
use crate::core::{GuessingGame, Reply};

/// Why the session loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Won,
    GaveUp,
    /// Input reached end of file or could not be read.
    InputClosed,
    /// The stop flag was set elsewhere, typically by a remote `quit`.
    Cancelled,
}

/// Reads guesses line by line and reports results on the shared console.
///
/// The stop flag is checked before each prompt and after each line, never
/// during a read: a remote `quit` is noticed once the player presses enter.
pub struct InteractiveSession<R> {
    input: R,
    game: GuessingGame,
    console: Console,
    cancel: CancellationSignal,
}

impl<R: BufRead> InteractiveSession<R> {
    pub fn new(input: R, game: GuessingGame, console: Console, cancel: CancellationSignal) -> Self {
        Self {
            input,
            game,
            console,
            cancel,
        }
    }

    /// Play until the game finishes, input ends or shutdown is requested.
    /// Always sets the stop flag before returning.
    pub fn run(mut self) -> SessionEnd {
        let end = self.play();
        self.cancel.set();
        end
    }

    fn play(&mut self) -> SessionEnd {
        self.console.write_line("Welcome to the Number Guessing Game!");
        self.console.write_line(&format!(
            "I'm thinking of a number between {} and {}.",
            self.game.low(),
            self.game.high()
        ));
        self.console.write_line("Type 'quit' to give up. Try to guess!");

        let mut line = String::new();
        loop {
            if self.cancel.is_set() {
                return self.cancelled();
            }

            self.console.prompt();
            line.clear();
            match self.input.read_line(&mut line) {
                Ok(0) => {
                    self.console.write_line("\nInput closed. Exiting game.");
                    return SessionEnd::InputClosed;
                }
                Ok(_) => {}
                Err(e) => {
                    log::info!("failed to read input: {}", e);
                    self.console.write_line("\nInput closed. Exiting game.");
                    return SessionEnd::InputClosed;
                }
            }

            if self.cancel.is_set() {
                return self.cancelled();
            }

            let reply = self.game.guess(&line);
            match reply {
                Reply::Ignored => continue,
                Reply::Correct { .. } => {
                    self.console.write_line(&reply.to_string());
                    return SessionEnd::Won;
                }
                Reply::GaveUp { .. } => {
                    self.console.write_line(&reply.to_string());
                    return SessionEnd::GaveUp;
                }
                _ => self.console.write_line(&reply.to_string()),
            }
        }
    }

    fn cancelled(&self) -> SessionEnd {
        self.console.write_line("\nGame ended by remote request.");
        SessionEnd::Cancelled
    }
}
