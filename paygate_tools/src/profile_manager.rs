use std::{
    env,
    fs,
    io,
    io::{Error, ErrorKind},
    path::{Path, PathBuf},
};

use anyhow::anyhow;
use dirs::home_dir;
use log::*;
use paygate_engine::{GatewayConfig, GatewayKind, PinConfig, StripeConfig};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Default)]
pub struct UserData {
    pub profiles: Vec<Profile>,
}

impl UserData {
    pub fn find(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Adds the profile, replacing any existing profile with the same name.
    pub fn upsert(&mut self, profile: Profile) {
        self.profiles.retain(|p| p.name != profile.name);
        self.profiles.push(profile);
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.profiles.len();
        self.profiles.retain(|p| p.name != name);
        self.profiles.len() != before
    }
}

/// A named gateway setup. Only the name of the environment variable holding the API key is stored, never the key.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Profile {
    pub name: String,
    pub gateway: GatewayKind,
    pub api_key_envar: String,
    pub base_url: Option<String>,
    pub default_currency: Option<String>,
}

impl Profile {
    pub fn gateway_config(&self) -> anyhow::Result<GatewayConfig> {
        let key = env::var(&self.api_key_envar)
            .map_err(|e| anyhow!("Profile {} reads its API key from {}, which is unusable. {e}", self.name, self.api_key_envar))?;
        let config = match self.gateway {
            GatewayKind::Pin => {
                let mut config = PinConfig::new(&key);
                if let Some(url) = &self.base_url {
                    config = config.with_base_url(url);
                }
                if let Some(currency) = &self.default_currency {
                    config = config.with_default_currency(currency);
                }
                GatewayConfig::Pin(config)
            },
            GatewayKind::Stripe => {
                let mut config = StripeConfig::new(&key);
                if let Some(url) = &self.base_url {
                    config = config.with_base_url(url);
                }
                if let Some(currency) = &self.default_currency {
                    config = config.with_default_currency(currency);
                }
                GatewayConfig::Stripe(config)
            },
        };
        Ok(config)
    }
}

pub fn get_config_path() -> io::Result<PathBuf> {
    let home = home_dir().ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Home directory not found"))?;
    let config_dir = home.join(".paygate");
    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
        set_permissions(&config_dir, 0o700)?;
    }
    let config_file = config_dir.join("config.toml");
    if !config_file.exists() {
        info!("Creating default config file");
        write_to(&config_file, &UserData::default())?;
        set_permissions(&config_file, 0o600)?;
    }
    Ok(config_file)
}

fn set_permissions(path: &Path, perms: u32) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut permissions = fs::metadata(path)?.permissions();
        permissions.set_mode(perms);
        fs::set_permissions(path, permissions)?;
    }
    #[cfg(not(unix))]
    let _ = (path, perms);
    Ok(())
}

fn read_from(path: &Path) -> io::Result<UserData> {
    let config_str = fs::read_to_string(path)?;
    toml::from_str(&config_str).map_err(|e| Error::new(ErrorKind::InvalidData, e.to_string()))
}

fn write_to(path: &Path, config: &UserData) -> io::Result<()> {
    let config_str = toml::to_string(config).map_err(|e| Error::new(ErrorKind::InvalidData, e.to_string()))?;
    fs::write(path, config_str)
}

pub fn read_config() -> io::Result<UserData> {
    read_from(&get_config_path()?)
}

pub fn write_config(config: &UserData) -> anyhow::Result<()> {
    write_to(&get_config_path()?, config)?;
    Ok(())
}
