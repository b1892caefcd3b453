pub mod flags;
pub mod paths;
pub mod types;

pub use flags::{Flag, FlagSet, UnknownFlag};
pub use types::*;
