//! Example demonstrating prefixes

use envdecode::{Decoder, EnvDecode, System};

#[derive(Debug, Default, EnvDecode)]
#[env(prefix = "MYAPP")]
struct Config {
    // Reads MYAPP_DATABASE_URL
    pub database_url: String,

    // Reads MYAPP_PORT
    pub port: u16,

    // Prefix applies to custom names too: MYAPP_API_TOKEN
    #[env(name = "API_TOKEN")]
    pub token: String,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("MYAPP_DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("MYAPP_PORT", "3000");
    std::env::set_var("MYAPP_API_TOKEN", "secret");

    // Uses the struct-level prefix
    let config = Config::from_env()?;
    println!("From MYAPP_*: {config:?}");

    // Any prefix can be chosen at runtime
    std::env::set_var("STAGING_PORT", "4000");
    let mut staging = Config::default();
    Decoder::new(System)
        .with_prefix("STAGING")
        .decode(&mut staging)?;
    println!("From STAGING_*: {staging:?}");

    Ok(())
}
