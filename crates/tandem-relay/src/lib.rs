//! # tandem-relay
//!
//! Turns selection requests into the host's outbound filter interactions.
//! Uses Strategy pattern for the host bridge (dashboard JS API, logging).

pub mod bridge;
pub mod relay;

pub use bridge::*;
pub use relay::*;

use serde::{Deserialize, Serialize};
use tandem_core::{Result, TemporalKey};

/// Interaction type passed with every call
pub const FILTER: &str = "FILTER";

// ============================================================================
// STRATEGY PATTERN: Host Bridge
// ============================================================================

/// Strategy trait for the host's interaction and sizing API
pub trait HostBridge {
    /// Apply a filter under `action_id`
    fn send_filter(&self, action_id: &str, payload: &FilterPayload) -> Result<()>;

    /// Remove the filter applied under `action_id`
    fn clear_filter(&self, action_id: &str) -> Result<()>;

    /// Width and height of the visualization frame (px)
    fn viewport(&self) -> (f64, f64);
}

// ============================================================================
// OUTBOUND PAYLOAD
// ============================================================================

/// `{ concepts, values }` body of a filter interaction.
///
/// One value row per selected key, aligned with `concepts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPayload {
    pub concepts: Vec<String>,
    pub values: Vec<Vec<String>>,
}

impl FilterPayload {
    pub fn new(concepts: Vec<String>, keys: &[TemporalKey]) -> Self {
        Self {
            concepts,
            values: keys.iter().map(|k| vec![k.canonical()]).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
