//! Host bridge implementations

use crate::{FILTER, FilterPayload, HostBridge};
use std::sync::{Arc, Mutex};
use tandem_core::{Result, TandemError};
use wasm_bindgen::prelude::*;

// ============================================================================
// DASHBOARD HOST (dscc)
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = dscc, js_name = sendInteraction, catch)]
    fn send_interaction(action_id: &str, interaction: &str, data: &JsValue) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = dscc, js_name = clearInteraction, catch)]
    fn clear_interaction(action_id: &str, interaction: &str) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = dscc, js_name = getWidth)]
    fn get_width() -> f64;

    #[wasm_bindgen(js_namespace = dscc, js_name = getHeight)]
    fn get_height() -> f64;
}

fn js_failure(call: &'static str, err: JsValue) -> TandemError {
    TandemError::Bridge {
        call,
        reason: err.as_string().unwrap_or_else(|| format!("{:?}", err)),
    }
}

/// Bridge to the dashboard host's global `dscc` object
#[derive(Debug, Clone, Copy, Default)]
pub struct DsccBridge;

impl HostBridge for DsccBridge {
    fn send_filter(&self, action_id: &str, payload: &FilterPayload) -> Result<()> {
        let json = payload.to_json()?;
        let data = js_sys::JSON::parse(&json).map_err(|e| js_failure("JSON.parse", e))?;
        send_interaction(action_id, FILTER, &data).map_err(|e| js_failure("sendInteraction", e))
    }

    fn clear_filter(&self, action_id: &str) -> Result<()> {
        clear_interaction(action_id, FILTER).map_err(|e| js_failure("clearInteraction", e))
    }

    fn viewport(&self) -> (f64, f64) {
        (get_width(), get_height())
    }
}

// ============================================================================
// LOGGING BRIDGE (local development, tests)
// ============================================================================

/// Call received by a [`LoggingBridge`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCall {
    Send {
        action_id: String,
        payload: FilterPayload,
    },
    Clear {
        action_id: String,
    },
}

/// Records and traces every call instead of talking to a host
#[derive(Debug, Clone)]
pub struct LoggingBridge {
    width: f64,
    height: f64,
    calls: Arc<Mutex<Vec<BridgeCall>>>,
}

impl Default for LoggingBridge {
    fn default() -> Self {
        Self::new(1000.0, 600.0)
    }
}

impl LoggingBridge {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Calls received so far, oldest first
    pub fn calls(&self) -> Vec<BridgeCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: BridgeCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl HostBridge for LoggingBridge {
    fn send_filter(&self, action_id: &str, payload: &FilterPayload) -> Result<()> {
        tracing::info!(
            action_id,
            interaction = FILTER,
            payload = %payload.to_json()?,
            "sendInteraction"
        );
        self.record(BridgeCall::Send {
            action_id: action_id.to_string(),
            payload: payload.clone(),
        });
        Ok(())
    }

    fn clear_filter(&self, action_id: &str) -> Result<()> {
        tracing::info!(action_id, interaction = FILTER, "clearInteraction");
        self.record(BridgeCall::Clear {
            action_id: action_id.to_string(),
        });
        Ok(())
    }

    fn viewport(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}
