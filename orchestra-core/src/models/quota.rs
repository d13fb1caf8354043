//! Quota snapshot types.
//!
//! This module contains the types returned by `GET /quotas`:
//! - [`QuotaReport`] - All providers
//! - [`ProviderQuota`] - One provider's windows
//! - [`QuotaWindow`] - Counters for one window

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Quota Report
// ============================================================================

/// Read-only quota snapshot for every provider the orchestrator manages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotaReport {
    /// Quotas keyed by provider name.
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderQuota>,
}

impl QuotaReport {
    /// Returns the quota for a provider.
    pub fn get(&self, provider: &str) -> Option<&ProviderQuota> {
        self.providers.get(provider)
    }

    /// Returns the names of providers whose daily quota is used up.
    pub fn exhausted_providers(&self) -> Vec<&str> {
        self.providers
            .iter()
            .filter(|(_, quota)| quota.daily.is_exhausted())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Returns true if no provider is listed.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

// ============================================================================
// Provider Quota
// ============================================================================

/// Quota windows for a single provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderQuota {
    /// Daily window.
    pub daily: QuotaWindow,
    /// Any other windows the orchestrator reports, kept as-is.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ProviderQuota {
    /// Creates a quota with only a daily window.
    pub fn daily(window: QuotaWindow) -> Self {
        Self {
            daily: window,
            extra: BTreeMap::new(),
        }
    }
}

// ============================================================================
// Quota Window
// ============================================================================

/// Usage counters for one quota window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaWindow {
    /// Requests used in this window.
    pub used: u64,
    /// Requests allowed in this window.
    pub limit: u64,
    /// Requests left in this window.
    pub remaining: u64,
}

impl QuotaWindow {
    /// Creates a window from its counters.
    pub fn new(used: u64, limit: u64, remaining: u64) -> Self {
        Self {
            used,
            limit,
            remaining,
        }
    }

    /// Returns the used share of the limit as a percentage (0-100).
    #[allow(clippy::cast_precision_loss)]
    pub fn used_percent(&self) -> f64 {
        if self.limit > 0 {
            ((self.used as f64 / self.limit as f64) * 100.0).min(100.0)
        } else {
            0.0
        }
    }

    /// Returns the remaining share of the limit as a percentage (0-100).
    pub fn remaining_percent(&self) -> f64 {
        100.0 - self.used_percent()
    }

    /// Returns true if nothing is left in this window.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}
