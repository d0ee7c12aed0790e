//! Typeroute Demo - Main entry point

use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;
use typeroute_core::RouterConfig;
use typeroute_demo::Describer;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration from environment
    let config = RouterConfig::from_env();

    let mut describer = Describer::new(config);

    let samples = match std::env::args().nth(1) {
        Some(input) => serde_json::from_str(&input)?,
        None => json!(["hello", 42, [1, 2, 3], {"name": "typeroute"}, null, true]),
    };

    match samples {
        serde_json::Value::Array(values) => values.into_iter().for_each(|v| describer.describe(v)),
        value => describer.describe(value),
    }

    for line in describer.lines() {
        info!(line = %line, "Described value");
    }

    Ok(())
}
