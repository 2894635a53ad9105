#![cfg(feature = "std")]

//! Process wiring: start the message server and the game, then shut both
//! down once the game is over or the user interrupts.

use std::future::Future;
use std::io::BufRead;

use tokio::sync::oneshot;
use tokio::time::{timeout, Duration};

use crate::cancel::CancellationSignal;
use crate::config::ListenerConfig;
use crate::console::Console;
use crate::core::GuessingGame;
use crate::session::{InteractiveSession, SessionEnd};
use crate::transport::run_listener;

/// How [`run`] finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnd {
    Session(SessionEnd),
    /// `interrupt` resolved before the session ended.
    Interrupted,
}

/// Run one game.
///
/// `listener` is `None` when remote messaging is turned off. `interrupt`
/// resolves when the user asks to quit from outside the game, e.g. Ctrl-C.
/// Once either side is done the stop flag is set and the message server gets
/// at most `grace` to wind down before the closing line is printed.
///
/// The session reads `input` on its own thread. A read that is still blocked
/// when this returns is left behind; the thread ends with the process.
pub async fn run<R, F>(
    input: R,
    game: GuessingGame,
    console: Console,
    cancel: CancellationSignal,
    listener: Option<ListenerConfig>,
    grace: Duration,
    interrupt: F,
) -> anyhow::Result<RunEnd>
where
    R: BufRead + Send + 'static,
    F: Future<Output = ()>,
{
    let server = listener
        .map(|config| tokio::spawn(run_listener(config, console.clone(), cancel.clone())));

    let (done_tx, done_rx) = oneshot::channel();
    {
        let console = console.clone();
        let cancel = cancel.clone();
        std::thread::Builder::new()
            .name("session".into())
            .spawn(move || {
                let end = InteractiveSession::new(input, game, console, cancel).run();
                let _ = done_tx.send(end);
            })?;
    }

    let end = tokio::select! {
        end = done_rx => match end {
            Ok(end) => {
                log::info!("session finished: {:?}", end);
                RunEnd::Session(end)
            }
            Err(_) => {
                log::warn!("session thread exited without reporting");
                RunEnd::Session(SessionEnd::InputClosed)
            }
        },
        () = interrupt => {
            console.write_line("\nInterrupted. Exiting game.");
            RunEnd::Interrupted
        }
    };

    cancel.set();
    if let Some(handle) = server {
        match timeout(grace, handle).await {
            Ok(Ok(end)) => log::info!("message server finished: {:?}", end),
            Ok(Err(e)) => log::warn!("message server task failed: {}", e),
            Err(_) => log::warn!("message server did not stop within {:?}", grace),
        }
    }
    console.write_line("Game exited. Hacker server stopped.");
    Ok(end)
}
