//! Hacker message server: a TCP listener that hands each accepted
//! connection, one at a time, to a line-reading connection handler.

pub mod connection;
pub mod listener;

pub use connection::{ConnectionEnd, ConnectionHandler};
pub use listener::{run_listener, Listener, ListenerEnd, ListenerError};
