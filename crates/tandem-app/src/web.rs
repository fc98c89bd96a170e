//! Browser entry point: host subscription and mounting

use crate::{ChartSlot, PreparedCycle, prepare_cycle};
use js_sys::{Function, Object, Reflect};
use leptos::callback::Callback;
use leptos::mount::{UnmountHandle, mount_to};
use leptos::prelude::*;
use std::any::Any;
use std::cell::RefCell;
use tandem_charts::DualChart;
use tandem_core::{HostMessage, TandemError, TemporalKey};
use tandem_relay::{DsccBridge, HostBridge, InteractionRelay};
use tandem_state::VizState;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

thread_local! {
    /// Chart drawn by the last cycle
    static MOUNTED: RefCell<ChartSlot<Box<dyn Any>>> = const { RefCell::new(ChartSlot::new()) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    tracing::info!("Tandem visualization starting");
    subscribe()
}

/// `dscc.subscribeToData(render_cycle, { transform: dscc.objectTransform })`
fn subscribe() -> Result<(), JsValue> {
    let dscc = Reflect::get(&js_sys::global(), &JsValue::from_str("dscc"))?;
    if dscc.is_undefined() {
        return Err(JsValue::from_str("dscc host library not loaded"));
    }

    let transform = Reflect::get(&dscc, &JsValue::from_str("objectTransform"))?;
    let options = Object::new();
    Reflect::set(&options, &JsValue::from_str("transform"), &transform)?;

    let subscribe: Function = Reflect::get(&dscc, &JsValue::from_str("subscribeToData"))?.dyn_into()?;
    let callback = Closure::<dyn FnMut(JsValue)>::new(|message: JsValue| {
        // Errors are already logged; the host callback has nowhere to throw to
        let _ = render_cycle(message);
    });
    subscribe.call2(&dscc, callback.as_ref(), &options)?;
    callback.forget();
    Ok(())
}

/// Run one render cycle for a host message
#[wasm_bindgen]
pub fn render_cycle(message: JsValue) -> Result<(), JsValue> {
    let bridge = DsccBridge;

    let cycle = decode(&message)
        .and_then(|m| prepare_cycle(&m, bridge.viewport()))
        .and_then(|prepared| mount(prepared, bridge));
    match cycle {
        Ok(()) => Ok(()),
        Err(err) => {
            tracing::error!(error = %err, "render cycle failed");
            Err(JsValue::from_str(&err.to_string()))
        }
    }
}

fn decode(message: &JsValue) -> tandem_core::Result<HostMessage> {
    let json: String = js_sys::JSON::stringify(message)
        .map(String::from)
        .map_err(|e| TandemError::Bridge {
            call: "JSON.stringify",
            reason: e.as_string().unwrap_or_default(),
        })?;
    HostMessage::from_json(&json)
}

/// Drop the previous chart, then mount a fresh one into `<body>`
fn mount(prepared: PreparedCycle, bridge: DsccBridge) -> tandem_core::Result<()> {
    let body = document().body().ok_or_else(|| TandemError::Bridge {
        call: "document.body",
        reason: "page has no body".into(),
    })?;

    let PreparedCycle {
        frame,
        selection,
        concepts,
    } = prepared;

    MOUNTED.with(|slot| {
        slot.borrow_mut().replace(move || {
            // Dropping this handle removes the chart from the page
            let handle: UnmountHandle<_> = mount_to(body, move || {
                let state = VizState::new(selection);
                let relay = InteractionRelay::new(bridge, concepts);

                let on_select = Callback::new(move |key: TemporalKey| {
                    if let Err(err) = relay.on_click(&state, key) {
                        tracing::error!(error = %err, key = %key, "filter interaction failed");
                    }
                });

                view! { <DualChart frame=frame on_select=on_select /> }
            });
            Some(Box::new(handle) as Box<dyn Any>)
        })
    });
    Ok(())
}
