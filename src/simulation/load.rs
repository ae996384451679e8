//! Synthetic load plans for `/generate-load`.

use std::ops::RangeInclusive;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::observability::BusinessOperation;

/// Number of operations in one plan.
pub const OPERATIONS: RangeInclusive<usize> = 10..=50;

/// Speed class of a synthetic operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadTier {
    Fast,
    Medium,
    Slow,
}

impl LoadTier {
    pub const ALL: [LoadTier; 3] = [LoadTier::Fast, LoadTier::Medium, LoadTier::Slow];

    /// Sleep range in seconds.
    pub fn delay_secs(self) -> RangeInclusive<f64> {
        match self {
            LoadTier::Fast => 0.01..=0.1,
            LoadTier::Medium => 0.1..=0.5,
            LoadTier::Slow => 0.5..=1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LoadTier::Fast => "fast",
            LoadTier::Medium => "medium",
            LoadTier::Slow => "slow",
        }
    }

    pub fn business_operation(self) -> BusinessOperation {
        match self {
            LoadTier::Fast => BusinessOperation::LoadFast,
            LoadTier::Medium => BusinessOperation::LoadMedium,
            LoadTier::Slow => BusinessOperation::LoadSlow,
        }
    }
}

/// One planned operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedOperation {
    pub index: usize,
    pub tier: LoadTier,
    pub delay: Duration,
}

/// A batch of operations drawn up front, so no RNG is held across awaits.
#[derive(Debug, Clone)]
pub struct LoadPlan {
    operations: Vec<PlannedOperation>,
}

impl LoadPlan {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let count = rng.gen_range(OPERATIONS);
        let operations = (0..count)
            .map(|index| {
                let tier = LoadTier::ALL[rng.gen_range(0..LoadTier::ALL.len())];
                let delay = Duration::from_secs_f64(rng.gen_range(tier.delay_secs()));
                PlannedOperation { index, tier, delay }
            })
            .collect();
        Self { operations }
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn operations(&self) -> &[PlannedOperation] {
        &self.operations
    }
}
