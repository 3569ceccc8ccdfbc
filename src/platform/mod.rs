//! Platform abstraction layer
//!
//! Handles what the host process supplies:
//! - Line input and output (stdin/stdout, or a script in tests)
//! - Interrupt/termination notification for the final save

pub mod console;
pub mod shutdown;

pub use console::{Console, ScriptedConsole, Terminal};
pub use shutdown::SaveHook;
