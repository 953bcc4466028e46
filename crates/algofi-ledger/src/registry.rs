//! Snapshot registry of decoded programs.
//!
//! Each product line keeps its programs in a [`ProgramRegistry`]. A load
//! reads every program concurrently, decodes each one on its own, and
//! publishes the successful ones as a single map swap. Readers holding an
//! older snapshot keep seeing it unchanged.

use crate::client::LedgerClient;
use algofi_core::{AppId, RawState};
use algofi_telemetry::Metrics;
use futures_util::future::join_all;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, warn};

/// Programs of one product line keyed by application id.
#[derive(Debug)]
pub struct ProgramRegistry<T> {
    programs: RwLock<Arc<BTreeMap<AppId, T>>>,
}

impl<T> Default for ProgramRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ProgramRegistry<T> {
    pub fn new() -> Self {
        Self {
            programs: RwLock::new(Arc::new(BTreeMap::new())),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<BTreeMap<AppId, T>> {
        Arc::clone(&self.programs.read())
    }

    /// Replace the whole map.
    pub fn publish(&self, programs: BTreeMap<AppId, T>) {
        *self.programs.write() = Arc::new(programs);
    }

    pub fn contains(&self, app_id: AppId) -> bool {
        self.programs.read().contains_key(&app_id)
    }

    pub fn len(&self) -> usize {
        self.programs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.read().is_empty()
    }
}

impl<T: Clone> ProgramRegistry<T> {
    pub fn get(&self, app_id: AppId) -> Option<T> {
        self.programs.read().get(&app_id).cloned()
    }
}

/// Read and decode every program in `app_ids` concurrently.
///
/// A read or decode failure is logged and counted; the program is left out
/// of the result and its siblings are unaffected.
pub async fn load_programs<T, E, F>(
    ledger: &dyn LedgerClient,
    product: &'static str,
    app_ids: impl IntoIterator<Item = AppId>,
    decode: F,
) -> BTreeMap<AppId, T>
where
    E: Display,
    F: Fn(AppId, &RawState) -> Result<T, E>,
{
    let app_ids: Vec<AppId> = app_ids.into_iter().collect();
    let states = join_all(app_ids.iter().map(|id| ledger.global_state(*id))).await;

    let mut programs = BTreeMap::new();
    for (app_id, state) in app_ids.into_iter().zip(states) {
        let decoded = match state {
            Ok(raw) => decode(app_id, &raw).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        match decoded {
            Ok(program) => {
                debug!(product, app_id = %app_id, "Program loaded");
                Metrics::program_loaded(product, true);
                programs.insert(app_id, program);
            }
            Err(error) => {
                warn!(product, app_id = %app_id, %error, "Program load failed");
                Metrics::program_loaded(product, false);
            }
        }
    }
    programs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockLedger;

    fn decode_total(_app_id: AppId, raw: &RawState) -> Result<u64, String> {
        raw.get(b"ts")
            .and_then(|v| v.as_uint())
            .ok_or_else(|| "missing ts".to_string())
    }

    #[tokio::test]
    async fn test_load_isolates_failures() {
        let ledger = MockLedger::new();
        ledger.set_global_state(AppId::new(1), RawState::new().with_uint("ts", 10));
        ledger.set_global_state(AppId::new(2), RawState::new().with_bytes("ts", b"x".to_vec()));
        ledger.set_global_state(AppId::new(3), RawState::new().with_uint("ts", 30));
        ledger.fail_app(AppId::new(3));
        ledger.set_global_state(AppId::new(4), RawState::new().with_uint("ts", 40));

        let programs = load_programs(
            &ledger,
            "staking",
            (1..=5).map(AppId::new),
            decode_total,
        )
        .await;

        assert_eq!(programs.len(), 2);
        assert_eq!(programs[&AppId::new(1)], 10);
        assert_eq!(programs[&AppId::new(4)], 40);
    }

    #[test]
    fn test_publish_swaps_whole_snapshot() {
        let registry = ProgramRegistry::new();
        registry.publish(BTreeMap::from([(AppId::new(1), "a"), (AppId::new(2), "b")]));
        let old = registry.snapshot();

        registry.publish(BTreeMap::from([(AppId::new(3), "c")]));
        assert_eq!(old.len(), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(AppId::new(3)), Some("c"));
        assert!(!registry.contains(AppId::new(1)));
    }
}
