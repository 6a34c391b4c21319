//! Card registry: the event and query surface collaborators drive.
//!
//! ## Key Types
//!
//! - `Registry`: Cards, called numbers, bingo history, persistence
//! - `CallResult`: Per-card effect of one called number
//! - `BingoRecord`: One completed line in game order
//! - `NumberCaller`: Seeded draw order for automatic calling

pub mod call;
pub mod caller;
#[allow(clippy::module_inception)]
pub mod registry;

pub use call::{BingoRecord, CallResult, CardCallResult};
pub use caller::NumberCaller;
pub use registry::Registry;
