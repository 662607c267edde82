//! Decodes newline-delimited gateway frames from stdin.
//!
//! ```text
//! cargo run --example decode_stream [config.json] < frames.jsonl
//! ```

use std::io::{self, BufRead};

use anyhow::Context;
use napcat_model::{event::MessageEvent, DecodeConfig, Event, ModelRegistry};
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;

fn load_config() -> anyhow::Result<DecodeConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(DecodeConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::filter::Targets::new().with_default(LevelFilter::INFO);
    use tracing_subscriber::{
        prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, Layer,
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(filter))
        .init();

    let registry = ModelRegistry::build()?.with_config(load_config()?);

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let value: serde_json::Value = match serde_json::from_str(&line) {
            Ok(value) => value,
            Err(e) => {
                warn!("skipping malformed frame: {e}");
                continue;
            }
        };
        match registry.parse_event(&value) {
            Ok(Event::Message(message)) => match &message {
                MessageEvent::Group(e) => info!(
                    group = e.group_id,
                    sender = e.sender.display_name(),
                    "{}",
                    message.text()
                ),
                MessageEvent::Friend(e) => info!(
                    user = e.user_id,
                    sender = %e.sender.nickname,
                    "{}",
                    message.text()
                ),
            },
            Ok(event) => info!(post_type = %event.post_type(), self_id = event.self_id(), "{event:?}"),
            Err(e) => warn!("{:#}", anyhow::Error::from(e)),
        }
    }
    Ok(())
}
