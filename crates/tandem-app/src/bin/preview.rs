//! Native preview of one render cycle.
//!
//! Builds a sample host message, lays it out for the logging bridge's
//! viewport and replays a few clicks so the outbound filter traffic can be
//! inspected without a dashboard host.

use tandem_app::prepare_cycle;
use tandem_core::TandemError;
use tandem_core::sample::{SampleConfig, sample_message};
use tandem_relay::{HostBridge, InteractionRelay, LoggingBridge};
use tandem_state::VizState;
use tracing::Level;

fn main() -> Result<(), TandemError> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .init();

    let message = sample_message(&SampleConfig::default());
    let bridge = LoggingBridge::default();

    let cycle = prepare_cycle(&message, bridge.viewport())?;
    println!("{}", cycle.frame.summary());

    let state = VizState::new(cycle.selection.clone());
    let relay = InteractionRelay::new(bridge, cycle.concepts.clone());

    // Select two days, then deselect both
    let keys: Vec<_> = cycle.frame.points.iter().take(2).map(|p| p.key).collect();
    for key in keys.iter().chain(keys.iter()) {
        let request = relay.on_click(&state, *key)?;
        println!("click {} -> {:?}", key, request);
    }

    for call in relay.bridge().calls() {
        println!("{:?}", call);
    }
    Ok(())
}
