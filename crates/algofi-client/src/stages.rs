//! Load stages and their ordering.
//!
//! Each stage declares the stages it reads from. [`StageTracker`] records
//! which stages have settled during one load and refuses to start a stage
//! whose dependencies are still in flight.

use crate::error::{ClientError, ClientResult};
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::fmt;

/// One step of `AlgofiClient::load_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoadStage {
    /// External analytics prices.
    AssetFeed,
    Lending,
    Staking,
    Governance,
    /// Merge feed prices with market oracle and b-asset prices.
    AssetPricing,
}

impl LoadStage {
    pub const ALL: [LoadStage; 5] = [
        Self::AssetFeed,
        Self::Lending,
        Self::Staking,
        Self::Governance,
        Self::AssetPricing,
    ];

    /// Stages that must settle before this one starts.
    pub fn dependencies(self) -> &'static [LoadStage] {
        match self {
            Self::AssetPricing => &[
                Self::AssetFeed,
                Self::Lending,
                Self::Staking,
                Self::Governance,
            ],
            Self::AssetFeed | Self::Lending | Self::Staking | Self::Governance => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AssetFeed => "asset_feed",
            Self::Lending => "lending",
            Self::Staking => "staking",
            Self::Governance => "governance",
            Self::AssetPricing => "asset_pricing",
        }
    }

    /// Stages grouped into waves. Every stage in a wave depends only on
    /// stages of earlier waves, so a wave can run concurrently.
    pub fn waves() -> Vec<Vec<LoadStage>> {
        let mut placed = BTreeSet::new();
        let mut waves = Vec::new();
        while placed.len() < Self::ALL.len() {
            let wave: Vec<LoadStage> = Self::ALL
                .into_iter()
                .filter(|s| !placed.contains(s))
                .filter(|s| s.dependencies().iter().all(|d| placed.contains(d)))
                .collect();
            if wave.is_empty() {
                break;
            }
            placed.extend(wave.iter().copied());
            waves.push(wave);
        }
        waves
    }
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settled stages of one load.
#[derive(Debug, Default)]
pub struct StageTracker {
    settled: Mutex<BTreeSet<LoadStage>>,
}

impl StageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that every dependency of `stage` has settled.
    pub fn begin(&self, stage: LoadStage) -> ClientResult<()> {
        let settled = self.settled.lock();
        let missing: Vec<LoadStage> = stage
            .dependencies()
            .iter()
            .copied()
            .filter(|d| !settled.contains(d))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ClientError::StageOrder { stage, missing })
        }
    }

    /// Mark `stage` as settled, whether it succeeded or not.
    pub fn settle(&self, stage: LoadStage) {
        self.settled.lock().insert(stage);
    }

    pub fn is_settled(&self, stage: LoadStage) -> bool {
        self.settled.lock().contains(&stage)
    }
}
