//! Example demonstrating explicit key names and word splitting

use envdecode::EnvDecode;

#[derive(Debug, Default, EnvDecode)]
#[allow(non_snake_case)]
struct Config {
    // Explicit name, used as-is: DB_CONNECTION_STRING
    #[env(name = "DB_CONNECTION_STRING")]
    pub database_url: String,

    // Upper-cased field name: REDIS_URL
    pub redis_url: String,

    // Camel-case words split apart: HTTP_SERVER_PORT
    #[env(split_words)]
    pub HTTPServerPort: u16,

    // Without split_words: MAXIDLE
    pub MaxIdle: u32,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("DB_CONNECTION_STRING", "postgres://localhost/mydb");
    std::env::set_var("REDIS_URL", "redis://localhost");
    std::env::set_var("HTTP_SERVER_PORT", "8080");
    std::env::set_var("MAXIDLE", "4");

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Redis URL: {}", config.redis_url);
    println!("  HTTP Server Port: {}", config.HTTPServerPort);
    println!("  Max Idle: {}", config.MaxIdle);

    Ok(())
}
