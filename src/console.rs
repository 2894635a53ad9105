#![cfg(feature = "std")]

//! Serialized access to the terminal.
//!
//! The game thread and the hacker connection both print to the same stream.
//! Every write goes through one mutex so lines never interleave, and remote
//! messages redraw the prompt so the player's half-typed guess is not lost.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::config::{INTERRUPT_TAG, PROMPT};

/// Source for the text the user has typed but not yet submitted.
///
/// Terminals in cooked mode give no portable way to read this, so the console
/// works without one and falls back to redrawing a bare prompt.
pub trait InputSnapshot: Send + Sync {
    fn current_input(&self) -> anyhow::Result<String>;
}

struct ConsoleState {
    out: Box<dyn Write + Send>,
    snapshot: Option<Arc<dyn InputSnapshot>>,
}

/// Cloneable handle to the shared output stream.
#[derive(Clone)]
pub struct Console {
    state: Arc<Mutex<ConsoleState>>,
}

impl Console {
    pub fn new<W: Write + Send + 'static>(out: W) -> Self {
        Self {
            state: Arc::new(Mutex::new(ConsoleState {
                out: Box::new(out),
                snapshot: None,
            })),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Install a source used to redraw pending input after an interrupt.
    pub fn with_snapshot(self, snapshot: Arc<dyn InputSnapshot>) -> Self {
        self.lock().snapshot = Some(snapshot);
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ConsoleState> {
        // A writer that panicked mid-line leaves nothing worth protecting.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Print `text` followed by a newline.
    pub fn write_line(&self, text: &str) {
        let mut state = self.lock();
        let result = writeln!(state.out, "{}", text).and_then(|()| state.out.flush());
        if let Err(e) = result {
            log::warn!("console write failed: {}", e);
        }
    }

    /// Print the input prompt without a newline.
    pub fn prompt(&self) {
        let mut state = self.lock();
        let result = state
            .out
            .write_all(PROMPT.as_bytes())
            .and_then(|()| state.out.flush());
        if let Err(e) = result {
            log::warn!("console write failed: {}", e);
        }
    }

    /// Show a remote message on its own line, then restore the prompt and
    /// whatever the user had typed so far.
    pub fn display_interrupt(&self, text: &str) {
        let mut state = self.lock();
        let pending = match &state.snapshot {
            Some(source) => match source.current_input() {
                Ok(pending) => Some(pending),
                Err(e) => {
                    log::debug!("input snapshot unavailable: {:#}", e);
                    None
                }
            },
            None => None,
        };

        let out = &mut state.out;
        let result = match pending {
            Some(pending) => write!(out, "\n{}{}\n{}{}", INTERRUPT_TAG, text, PROMPT, pending),
            None => write!(out, "\n{}{}\n{}", INTERRUPT_TAG, text, PROMPT),
        }
        .and_then(|()| out.flush());
        if let Err(e) = result {
            log::warn!("console write failed: {}", e);
        }
    }
}
