//! Example demonstrating Option<T> for optional fields

use envdecode::EnvDecode;

#[derive(Debug, Default, EnvDecode)]
struct Replica {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Default, EnvDecode)]
struct Config {
    pub app_name: String,

    // Optional fields - None if not set
    pub api_key: Option<String>,
    pub port: Option<u16>,
    pub debug: Option<bool>,

    // Optional section - allocated only when one of its keys is set
    pub replica: Option<Replica>,
    pub standby: Option<Replica>,
}

fn main() -> anyhow::Result<()> {
    // Set only some environment variables
    std::env::set_var("APP_NAME", "my-application");
    std::env::set_var("PORT", "8080");
    std::env::set_var("REPLICA_HOST", "replica.internal");
    // API_KEY, DEBUG and STANDBY_* not set

    let config = Config::from_env()?;

    println!("Configuration:");
    println!("  App Name: {}", config.app_name);
    println!("  API Key: {:?}", config.api_key); // None
    println!("  Port: {:?}", config.port); // Some(8080)
    println!("  Debug: {:?}", config.debug); // None
    println!("  Replica: {:?}", config.replica); // Some(Replica { host: "replica.internal", port: 0 })
    println!("  Standby: {:?}", config.standby); // None

    Ok(())
}
