//! Ledger and price feed collaborators.
//!
//! The SDK never talks to the network directly; every read goes through
//! [`LedgerClient`] and every external price through [`PriceFeed`]. The
//! REST adapters ([`AlgodClient`], [`AnalyticsClient`]) and the in-memory
//! mocks ([`MockLedger`], [`MockPriceFeed`]) implement the same traits.
//! [`ProgramRegistry`] holds the decoded programs of one product line and
//! [`load_programs`] fills it with concurrent, isolated reads.

pub mod algod;
pub mod analytics;
pub mod client;
pub mod error;
pub mod mock;
pub mod registry;

pub use algod::AlgodClient;
pub use analytics::{AnalyticsClient, DynPriceFeed, PriceFeed, PriceRecord};
pub use client::{BoxFuture, DynLedger, LedgerClient, LocalStates};
pub use error::{LedgerError, LedgerResult};
pub use mock::{MockLedger, MockPriceFeed};
pub use registry::{load_programs, ProgramRegistry};
