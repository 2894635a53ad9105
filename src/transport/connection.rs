#![cfg(feature = "std")]

use std::net::SocketAddr;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::{timeout, Duration};

use crate::cancel::CancellationSignal;
use crate::console::Console;
use crate::core::config::READ_CHUNK_SIZE;
use crate::core::{LineFramer, Message};

/// Why a connection stopped being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEnd {
    /// Peer closed the stream.
    Closed,
    /// Read failed with something other than a timeout.
    ErrorClosed,
    /// The stop flag was set, either by the control line or elsewhere.
    SignalClosed,
}

/// Reads newline-delimited messages from one peer and shows them on the
/// console until the peer leaves or shutdown is requested.
pub struct ConnectionHandler<S> {
    stream: S,
    peer: SocketAddr,
    framer: LineFramer,
    console: Console,
    cancel: CancellationSignal,
    read_poll: Duration,
}

impl<S: AsyncRead + Unpin> ConnectionHandler<S> {
    pub fn new(
        stream: S,
        peer: SocketAddr,
        console: Console,
        cancel: CancellationSignal,
        read_poll: Duration,
    ) -> Self {
        Self {
            stream,
            peer,
            framer: LineFramer::new(),
            console,
            cancel,
            read_poll,
        }
    }

    /// Drive the connection to completion. The stream is dropped, and thereby
    /// closed, when this returns.
    pub async fn run(mut self) -> ConnectionEnd {
        self.console.write_line(&format!("\n(Hacker connected from {})", self.peer));
        let end = self.pump().await;
        let dropped = self.framer.finish();
        if !dropped.is_empty() {
            log::debug!(
                "discarding {} unterminated bytes from {}",
                dropped.len(),
                self.peer
            );
        }
        self.console.write_line("(hacker disconnected)");
        end
    }

    async fn pump(&mut self) -> ConnectionEnd {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        while !self.cancel.is_set() {
            match timeout(self.read_poll, self.stream.read(&mut chunk)).await {
                // Nothing arrived this interval; recheck the stop flag.
                Err(_) => continue,
                Ok(Ok(0)) => return ConnectionEnd::Closed,
                Ok(Ok(n)) => {
                    if self.dispatch(&chunk[..n]) {
                        return ConnectionEnd::SignalClosed;
                    }
                }
                Ok(Err(e)) => {
                    log::info!("read error from {}: {}", self.peer, e);
                    self.console.write_line(&format!("(hacker connection error: {})", e));
                    return ConnectionEnd::ErrorClosed;
                }
            }
        }
        ConnectionEnd::SignalClosed
    }

    /// Show every complete message in `bytes`. Returns true once the control
    /// line has been seen; anything after it is dropped.
    fn dispatch(&mut self, bytes: &[u8]) -> bool {
        for line in self.framer.feed(bytes) {
            let Some(msg) = Message::parse(&line) else {
                continue;
            };
            self.console.display_interrupt(msg.text());
            if msg.is_control() {
                log::info!("{} requested end of game", self.peer);
                self.console.display_interrupt("(hacker requested end of game)");
                self.cancel.set();
                return true;
            }
        }
        false
    }
}
