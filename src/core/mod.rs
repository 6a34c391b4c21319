//! Core types: identifiers, called numbers, RNG, configuration.

pub mod config;
pub mod id;
pub mod number;
pub mod rng;

pub use config::TrackerConfig;
pub use id::{CardId, UserId};
pub use number::{is_callable, parse_called_number, InputError, MAX_NUMBER, MIN_NUMBER};
pub use rng::BingoRng;
