use std::env;

use serde::Deserialize;
use tracing::info;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_env")]
    pub env: String, // file / server
    pub database_url: String,
    pub redis_url: Option<String>,
    #[serde(default = "default_view_cache_ttl")]
    pub view_cache_ttl: u64,
}

fn default_env() -> String {
    "file".to_string()
}

fn default_view_cache_ttl() -> u64 {
    300
}

pub fn get_config() -> anyhow::Result<Config> {
    let env_var = env::var("env").unwrap_or(default_env());
    if env_var == "file" {
        info!("using .env file as environtment variable");
        let _ = dotenvy::dotenv();
    } else {
        info!("using server environtment as environtment variable");
    }
    Ok(envy::from_env::<Config>()?)
}
