//! pushstate Host Layer
//!
//! The contract between the history façade and the environment that owns
//! the real session-history stack (a browser window, a webview, a test
//! double). The façade never replaces the host stack; it only pushes onto
//! it, walks it, and listens for pops.

mod error;
mod host;
mod memory;

pub use error::HostError;
pub use host::{NavigationHost, PopEvent, PopHandler, StateMap};
pub use memory::{HostEntry, MemoryHost};

pub type Result<T> = std::result::Result<T, HostError>;
