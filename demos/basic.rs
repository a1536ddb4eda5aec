//! Basic usage example

use envdecode::EnvDecode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, EnvDecode)]
struct Config {
    // Loaded from DATABASE_URL environment variable
    pub database_url: String,

    // Keeps the value from `Default` when SERVER_ADDR is unset
    pub server_addr: String,

    // Numeric type
    pub max_connections: u32,

    // Boolean type
    pub debug_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            server_addr: "127.0.0.1:8080".to_string(),
            max_connections: 10,
            debug_mode: false,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG=envdecode=debug shows every key that was found
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("SERVER_ADDR", "0.0.0.0:3000");

    // Load configuration
    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Server Address: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);

    Ok(())
}
