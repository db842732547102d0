//! Runtime settings read from the environment, plus fixed limits and defaults.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
