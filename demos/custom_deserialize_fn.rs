//! Example demonstrating custom deserializer functions

use envdecode::EnvDecode;

// Custom deserializer for semicolon-separated strings
fn semicolon_separated(s: &str) -> Result<Vec<String>, String> {
    Ok(s.split(';').map(|s| s.trim().to_string()).collect())
}

#[derive(Debug, Default, EnvDecode)]
struct Config {
    // Built-in conversion
    pub app_name: String,
    pub port: u16,

    // Uses serde_json::from_str (JSON format)
    #[env(deserializer = "serde_json::from_str")]
    pub json_tags: Vec<String>,

    // Uses custom function
    #[env(deserializer = "semicolon_separated")]
    pub routes: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_NAME", "my-app");
    std::env::set_var("PORT", "8080");

    // JSON format (serde_json)
    std::env::set_var("JSON_TAGS", r#"["prod","api","v2"]"#);

    // Commas are part of the values here, so the built-in list syntax won't do
    std::env::set_var("ROUTES", "/a,b; /c,d");

    let config = Config::from_env()?;

    println!("Configuration loaded:");
    println!("  App Name: {}", config.app_name);
    println!("  Port: {}", config.port);
    println!("  JSON Tags: {:?}", config.json_tags);
    println!("  Routes: {:?}", config.routes);

    Ok(())
}
