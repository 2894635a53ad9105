use core::time::Duration;

/// Address the hacker message server binds to when none is given.
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 9999;

/// How long a single accept waits before the stop flag is checked again.
pub const ACCEPT_POLL: Duration = Duration::from_secs(1);
/// How long a single receive waits before the stop flag is checked again.
pub const READ_POLL: Duration = Duration::from_millis(500);
/// Time the listener gets to wind down once the game is over.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Bytes requested from the socket per receive.
pub const READ_CHUNK_SIZE: usize = 1024;

/// Prompt printed before every line of user input.
pub const PROMPT: &str = "> ";
/// Tag prefixed to every remote message shown on the console.
pub const INTERRUPT_TAG: &str = "[HACKER] ";
/// Remote line that ends the game.
pub const CONTROL_TOKEN: &str = "quit";

/// Inclusive range the secret number is drawn from.
pub const SECRET_MIN: u32 = 1;
pub const SECRET_MAX: u32 = 100;
