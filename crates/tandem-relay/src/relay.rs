//! Click to host interaction

use crate::{FilterPayload, HostBridge};
use tandem_core::{CLICK_ACTION, Result, TemporalKey};
use tandem_state::{FilterRequest, VizState};

/// Sends each click's filter request through a host bridge. No retries.
#[derive(Debug, Clone)]
pub struct InteractionRelay<B: HostBridge> {
    bridge: B,
    action_id: String,
    /// Temporal dimension field ids
    concepts: Vec<String>,
}

impl<B: HostBridge> InteractionRelay<B> {
    pub fn new(bridge: B, concepts: Vec<String>) -> Self {
        Self {
            bridge,
            action_id: CLICK_ACTION.to_string(),
            concepts,
        }
    }

    pub fn action_id(mut self, action_id: impl Into<String>) -> Self {
        self.action_id = action_id.into();
        self
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    /// Forward `request` to the host
    pub fn dispatch(&self, request: &FilterRequest) -> Result<()> {
        match request {
            FilterRequest::Clear => {
                tracing::info!(action_id = %self.action_id, "clearing filter");
                self.bridge.clear_filter(&self.action_id)
            }
            FilterRequest::Single(_) | FilterRequest::Update(_) => {
                let payload = FilterPayload::new(self.concepts.clone(), &request.keys());
                tracing::info!(
                    action_id = %self.action_id,
                    keys = payload.values.len(),
                    "sending filter"
                );
                self.bridge.send_filter(&self.action_id, &payload)
            }
        }
    }

    /// Send the request for a click on `key`; `state` only changes once the
    /// host accepted it
    pub fn on_click(&self, state: &VizState, key: TemporalKey) -> Result<FilterRequest> {
        let pending = state.toggle(key);
        self.dispatch(&pending.request)?;
        Ok(state.commit(pending))
    }
}
