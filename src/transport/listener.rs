#![cfg(feature = "std")]

use std::fmt;
use std::io;
use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpSocket};
use tokio::time::timeout;

use crate::cancel::CancellationSignal;
use crate::config::{ConfigError, ListenerConfig};
use crate::console::Console;
use crate::transport::connection::ConnectionHandler;

/// Error type for listener operations.
#[derive(Debug)]
pub enum ListenerError {
    /// Configuration could not be turned into a bind address.
    Config(ConfigError),
    /// Failed to bind to address.
    Bind(io::Error),
    /// Failed to accept connection.
    Accept(io::Error),
}

impl fmt::Display for ListenerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerError::Config(e) => write!(f, "{}", e),
            ListenerError::Bind(e) => write!(f, "{}", e),
            ListenerError::Accept(e) => write!(f, "Failed to accept: {}", e),
        }
    }
}

impl std::error::Error for ListenerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ListenerError::Config(e) => Some(e),
            ListenerError::Bind(e) | ListenerError::Accept(e) => Some(e),
        }
    }
}

impl From<ConfigError> for ListenerError {
    fn from(err: ConfigError) -> Self {
        ListenerError::Config(err)
    }
}

/// How [`run_listener`] finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerEnd {
    /// Bind failed; remote messaging stayed off.
    Disabled,
    /// The stop flag was observed.
    Stopped,
    /// Accept failed in a way that cannot be retried.
    Failed,
}

/// A bound hacker message server. Connections are served strictly one after
/// another.
pub struct Listener {
    inner: TcpListener,
    config: ListenerConfig,
    console: Console,
    cancel: CancellationSignal,
}

impl Listener {
    /// Resolve the configured host and bind to its first address with
    /// `SO_REUSEADDR` and a backlog of one.
    pub async fn bind(
        config: ListenerConfig,
        console: Console,
        cancel: CancellationSignal,
    ) -> Result<Self, ListenerError> {
        let addr = config.resolve().await?;
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()
        } else {
            TcpSocket::new_v6()
        }
        .map_err(ListenerError::Bind)?;
        socket.set_reuseaddr(true).map_err(ListenerError::Bind)?;
        socket.bind(addr).map_err(ListenerError::Bind)?;
        let inner = socket.listen(1).map_err(ListenerError::Bind)?;

        log::info!("hacker message server bound to {}", addr);
        Ok(Self {
            inner,
            config,
            console,
            cancel,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.inner.local_addr()
    }

    /// Accept and handle connections until the stop flag is set.
    pub async fn serve(self) -> Result<(), ListenerError> {
        let endpoint = match self.inner.local_addr() {
            Ok(addr) => addr.to_string(),
            Err(_) => self.config.to_string(),
        };
        self.console.write_line(&format!("(Hacker message server listening on {})", endpoint));

        while !self.cancel.is_set() {
            let accepted = timeout(self.config.accept_poll, self.inner.accept()).await;
            let (stream, peer) = match accepted {
                // Nobody connected this interval; recheck the stop flag.
                Err(_) => continue,
                Ok(Ok(accepted)) => accepted,
                Ok(Err(e)) if is_transient(&e) => {
                    log::debug!("ignoring transient accept error: {}", e);
                    continue;
                }
                Ok(Err(e)) => return Err(ListenerError::Accept(e)),
            };

            log::info!("hacker connected from {}", peer);
            let handler = ConnectionHandler::new(
                stream,
                peer,
                self.console.clone(),
                self.cancel.clone(),
                self.config.read_poll,
            );
            let end = handler.run().await;
            log::info!("connection from {} ended: {:?}", peer, end);
        }

        log::info!("hacker message server stopped");
        Ok(())
    }
}

fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
    )
}

/// Bind and serve, reporting problems on the console instead of returning
/// them. A bind failure leaves the rest of the program untouched.
pub async fn run_listener(
    config: ListenerConfig,
    console: Console,
    cancel: CancellationSignal,
) -> ListenerEnd {
    let endpoint = config.to_string();
    let listener = match Listener::bind(config, console.clone(), cancel).await {
        Ok(listener) => listener,
        Err(e) => {
            log::info!("could not bind hacker message server to {}: {}", endpoint, e);
            console.write_line(&format!("ERROR: Could not bind to {} — {}", endpoint, e));
            console.write_line("Hacker messaging disabled.");
            return ListenerEnd::Disabled;
        }
    };

    match listener.serve().await {
        Ok(()) => ListenerEnd::Stopped,
        Err(e) => {
            log::info!("hacker message server stopped: {}", e);
            console.write_line(&format!("(hacker message server stopped: {})", e));
            ListenerEnd::Failed
        }
    }
}
