//! Example demonstrating custom value types via UnmarshalEnv

use envdecode::{BoxError, EnvDecode, UnmarshalEnv};

/// Log level parsed from names like `info` or `WARN`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Level {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl UnmarshalEnv for Level {
    fn unmarshal_env(&mut self, raw: &str) -> Result<(), BoxError> {
        *self = match raw.to_ascii_lowercase().as_str() {
            "debug" => Level::Debug,
            "info" => Level::Info,
            "warn" => Level::Warn,
            "error" => Level::Error,
            other => return Err(format!("unknown level {other:?}").into()),
        };
        Ok(())
    }
}

#[derive(Debug, Default, EnvDecode)]
struct Config {
    pub level: Level,

    // Custom types work inside Option and Vec too
    pub audit_level: Option<Level>,
    pub levels: Vec<Level>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("LEVEL", "WARN");
    std::env::set_var("LEVELS", "debug,error");

    let config = Config::from_env()?;
    println!("{config:?}");

    // Invalid values report the key that failed
    std::env::set_var("LEVEL", "verbose");
    if let Err(err) = Config::from_env() {
        println!("Error: {err:#}");
    }

    Ok(())
}
