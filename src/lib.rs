#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod core;
#[cfg(feature = "std")]
mod app;
#[cfg(feature = "std")]
mod cancel;
#[cfg(feature = "std")]
mod config;
#[cfg(feature = "std")]
mod console;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
mod session;
#[cfg(feature = "std")]
pub mod transport;

pub use crate::core::*;
#[cfg(feature = "std")]
pub use app::{run, RunEnd};
#[cfg(feature = "std")]
pub use cancel::CancellationSignal;
#[cfg(feature = "std")]
pub use config::{ConfigError, ListenerConfig};
#[cfg(feature = "std")]
pub use console::{Console, InputSnapshot};
#[cfg(feature = "std")]
pub use logging::{init_logging, log_level};
#[cfg(feature = "std")]
pub use session::{InteractiveSession, SessionEnd};
#[cfg(feature = "std")]
pub use transport::{
    run_listener, ConnectionEnd, ConnectionHandler, Listener, ListenerEnd, ListenerError,
};
