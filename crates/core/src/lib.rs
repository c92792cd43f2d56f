//! Atlas Core - canonical model and shared plumbing.
//!
//! Every market provider and blockchain platform adapter in the workspace
//! converts its source-specific payloads into the records defined here.
//! The crate has no knowledge of concrete sources; it only holds:
//!
//! - [`models`] - Ticker, Rate, Tx/Block and the staking records
//! - [`coin`] - static coin descriptors referenced by the adapters
//! - [`client`] - the transport contract adapters describe requests against
//! - [`errors`] - transport errors and the escalation helper
//! - [`utils`] - lenient numeric and time parsing shared by adapters
//!
//! The `test-util` feature exposes `testing`, log capture for unit tests.

pub mod client;
pub mod coin;
pub mod errors;
pub mod models;
#[cfg(any(test, feature = "test-util"))]
pub mod testing;
pub mod utils;

pub use client::{ApiClient, HttpTransport, StaticTransport, Transport};
pub use coin::Coin;
pub use errors::{report_error, ErrorParams, TransportError};
pub use models::*;
