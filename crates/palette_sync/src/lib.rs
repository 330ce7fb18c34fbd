#![forbid(unsafe_code)]

pub mod cli;
pub mod derive;
pub mod discover;
pub mod error;
pub mod luminosity;
pub mod render;
pub mod sync;
pub mod token;
pub mod upstream;
pub mod util;

pub use cli::run_from_env;
pub use derive::derive_dark_color;
pub use error::{Result, SyncError};
pub use luminosity::{Rgb, shift_luminosity};
pub use sync::SyncOutcome;
pub use token::{ColorToken, parse_key};
