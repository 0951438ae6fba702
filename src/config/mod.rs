use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub service_name: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct StorageConfig {
    pub uploads_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let host = env::var("INVOICE_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("INVOICE_SERVICE_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()?;

        let uploads_dir =
            env::var("INVOICE_UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string());

        Ok(Self {
            server: ServerConfig { host, port },
            storage: StorageConfig { uploads_dir },
            service_name: "invoice-service".to_string(),
        })
    }
}
