//! # tandem-state
//!
//! Scatter filtering, click selection and the reactive state of one mounted
//! chart. A click's new selection is only adopted once the host accepted the
//! matching filter request.

pub mod filter;
pub mod selection;

pub use filter::*;
pub use selection::*;

use leptos::prelude::*;
use tandem_core::TemporalKey;

// ============================================================================
// VIEW STATE
// ============================================================================

/// Reactive state of the chart mounted for one render cycle
#[derive(Clone, Copy)]
pub struct VizState {
    /// Working copy of the host's applied selection; `None` until a filter exists
    pub selection: RwSignal<Option<SelectionSet>>,
}

/// Outcome of a click, not yet adopted by the state
#[derive(Debug, Clone, PartialEq)]
pub struct PendingToggle {
    pub request: FilterRequest,
    /// Selection once the host has accepted `request`
    pub next: Option<SelectionSet>,
}

impl VizState {
    /// Start from the selection decoded from the host message
    pub fn new(active: Option<SelectionSet>) -> Self {
        Self {
            selection: RwSignal::new(active),
        }
    }

    /// Work out the request for a click on `key`; the selection is untouched
    pub fn toggle(&self, key: TemporalKey) -> PendingToggle {
        let (working, request) = self
            .selection
            .with_untracked(|active| toggle_selection(active.as_ref(), key));

        tracing::debug!(key = %key, selected = working.len(), "selection toggled");

        let next = match request {
            FilterRequest::Clear => None,
            _ => Some(working),
        };
        PendingToggle { request, next }
    }

    /// Adopt a toggle whose request reached the host
    pub fn commit(&self, pending: PendingToggle) -> FilterRequest {
        self.selection.set(pending.next);
        pending.request
    }
}

impl Default for VizState {
    fn default() -> Self {
        Self::new(None)
    }
}
