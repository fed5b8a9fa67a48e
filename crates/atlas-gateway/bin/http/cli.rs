use atlas_sources::{COUNTRIES_API, EXCHANGE_RATE_API};
use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const PORT_ENV: &str = "PORT";
pub const STORAGE_BACKEND_ENV: &str = "ATLAS_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "ATLAS_MYSQL_DSN";
pub const IMAGE_PATH_ENV: &str = "ATLAS_IMAGE_PATH";
pub const FONT_PATH_ENV: &str = "ATLAS_FONT_PATH";
pub const COUNTRIES_URL_ENV: &str = "ATLAS_COUNTRIES_URL";
pub const RATES_URL_ENV: &str = "ATLAS_RATES_URL";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_IMAGE_PATH: &str = "cache/summary.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "atlas-gateway")]
pub struct CLI {
    #[arg(long, env = PORT_ENV, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    /// Overrides the MYSQLHOST/DB_HOST-style environment pairs.
    #[arg(long, env = MYSQL_DSN_ENV)]
    pub mysql_dsn: Option<String>,

    #[arg(long, env = IMAGE_PATH_ENV, default_value = DEFAULT_IMAGE_PATH)]
    pub image_path: PathBuf,

    /// TTF/OTF used for the summary card; well-known locations are probed
    /// when unset.
    #[arg(long, env = FONT_PATH_ENV)]
    pub font_path: Option<PathBuf>,

    #[arg(long, env = COUNTRIES_URL_ENV, default_value = COUNTRIES_API)]
    pub countries_url: String,

    #[arg(long, env = RATES_URL_ENV, default_value = EXCHANGE_RATE_API)]
    pub rates_url: String,
}

impl CLI {
    /// DSN from the flag, or composed from the deployment's environment
    /// pairs (`MYSQLHOST` falling back to `DB_HOST`, and so on).
    pub fn mysql_dsn(&self) -> String {
        if let Some(dsn) = &self.mysql_dsn {
            return dsn.clone();
        }

        let host = env_pair("MYSQLHOST", "DB_HOST", "localhost");
        let port = env_pair("MYSQLPORT", "DB_PORT", "3306");
        let username = env_pair("MYSQLUSER", "DB_USERNAME", "root");
        let password = env_pair("MYSQLPASSWORD", "DB_PASSWORD", "");
        let database = env_pair("MYSQLDATABASE", "DB_DATABASE", "countries_api");

        format!("mysql://{username}:{password}@{host}:{port}/{database}")
    }
}

fn env_pair(primary: &str, fallback: &str, default: &str) -> String {
    std::env::var(primary)
        .or_else(|_| std::env::var(fallback))
        .unwrap_or_else(|_| default.to_string())
}
