//! Command handlers, one module per subcommand.

pub mod flags;
pub mod hook;
pub mod hooks;
pub mod version;
