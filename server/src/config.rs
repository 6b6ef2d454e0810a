use serde::Deserialize;

/// Startup configuration, read from the environment (and `.env`, if present).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Store connection string: `memory://` or a MongoDB URI.
    #[serde(default = "default_mongodb_uri")]
    pub mongodb_uri: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_mongodb_uri() -> String {
    "memory://".to_string()
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
