use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct QuotehubConfig {
    pub database: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Suppress stdout banners; `QUOTEHUB_QUIET` takes precedence
    pub quiet: Option<bool>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("quotehub.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".quotehub").join("quotes.db")
}

impl QuotehubConfig {
    /// Database path: explicit override, then config, then `.quotehub/quotes.db`
    pub fn database_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| default_database_path_in(Path::new(".")))
    }

    /// Listen address: explicit overrides, then config, then `0.0.0.0:5000`
    pub fn listen_addr(&self, host: Option<String>, port: Option<u16>) -> anyhow::Result<SocketAddr> {
        let ip = match host.or_else(|| self.host.clone()) {
            Some(raw) => raw
                .parse::<IpAddr>()
                .map_err(|e| anyhow::anyhow!("invalid host {:?}: {}", raw, e))?,
            None => DEFAULT_HOST,
        };
        let port = port.or(self.port).unwrap_or(DEFAULT_PORT);
        Ok(SocketAddr::new(ip, port))
    }

    /// Read `path` (or `quotehub.toml`); a missing file yields the defaults
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))
    }

    pub fn save(&self, path: &Path, force: bool) -> anyhow::Result<()> {
        if path.exists() && !force {
            anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Resolve the database path and create its parent directory
    pub fn prepare_database(&self, flag: Option<PathBuf>) -> anyhow::Result<PathBuf> {
        let path = self.database_path(flag);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(path)
    }
}
