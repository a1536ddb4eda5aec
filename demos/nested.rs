//! Example demonstrating nested and flattened structs

use envdecode::EnvDecode;

#[derive(Debug, Default, EnvDecode)]
struct Database {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Default, EnvDecode)]
struct Logging {
    pub log_level: String,
    pub log_json: bool,
}

#[derive(Debug, Default, EnvDecode)]
#[env(prefix = "SHOP")]
struct Config {
    // SHOP_DATABASE_HOST, SHOP_DATABASE_PORT
    pub database: Database,

    // SHOP_CACHE_HOST, SHOP_CACHE_PORT
    #[env(name = "CACHE")]
    pub redis: Database,

    // SHOP_LOG_LEVEL, SHOP_LOG_JSON
    #[env(flatten)]
    pub logging: Logging,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("SHOP_DATABASE_HOST", "db.internal");
    std::env::set_var("SHOP_DATABASE_PORT", "5432");
    std::env::set_var("SHOP_CACHE_HOST", "cache.internal");
    std::env::set_var("SHOP_CACHE_PORT", "6379");
    std::env::set_var("SHOP_LOG_LEVEL", "info");
    std::env::set_var("SHOP_LOG_JSON", "t");

    let config = Config::from_env()?;

    println!("{config:#?}");

    Ok(())
}
