//! Example demonstrating sequences, maps, durations and timestamps

use envdecode::EnvDecode;
use std::collections::HashMap;
use std::time::Duration;
use time::OffsetDateTime;

#[derive(Debug, Default, EnvDecode)]
struct Config {
    // Comma-separated: HOSTS=a,b,c
    pub hosts: Vec<String>,
    pub ports: Vec<u16>,

    // Comma-separated key=value pairs: LABELS=env=prod,team=core
    pub labels: HashMap<String, String>,
    pub weights: HashMap<String, f64>,

    // Go-style durations: 1m30s, 250ms, 1.5h
    pub timeout: Duration,
    pub retry_delays: Vec<Duration>,

    // RFC 3339
    pub started_at: Option<OffsetDateTime>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("HOSTS", "a.internal,b.internal,c.internal");
    std::env::set_var("PORTS", "80,443");
    std::env::set_var("LABELS", "env=prod,team=core");
    std::env::set_var("WEIGHTS", "primary=0.8,secondary=0.2");
    std::env::set_var("TIMEOUT", "1m30s");
    std::env::set_var("RETRY_DELAYS", "100ms,1s,5s");
    std::env::set_var("STARTED_AT", "2021-01-02T15:04:05Z");

    let config = Config::from_env()?;

    println!("{config:#?}");

    Ok(())
}
