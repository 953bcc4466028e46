//! Integration tests for algofi-client.
//!
//! These tests drive the facade against the in-memory ledger:
//! - Stage ordering and isolation of failed programs
//! - Asset pricing from the feed and from market state
//! - Transaction recipes built from loaded state

pub mod common;
