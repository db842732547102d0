//! Command-line interface: `serve` and `migrate`.

pub mod args;

pub use args::{Cli, Commands};
