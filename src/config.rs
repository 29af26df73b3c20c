//! Command line and environment configuration for the server binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::catalog::DiscoveryMode;
use crate::db::default_db_path;

/// Subdirectory of the public dir that holds background media.
const BACKGROUNDS_SUBDIR: &str = "bkgs";

/// Command line spelling of `DiscoveryMode`, kept here so the catalog does not
/// depend on clap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DiscoveryModeArg {
    /// One entry per recognised file, typed by extension
    ByExtension,
    /// One video entry per base name, with a `.webp` preview
    #[default]
    VideoWithThumbnail,
}

impl From<DiscoveryModeArg> for DiscoveryMode {
    fn from(arg: DiscoveryModeArg) -> Self {
        match arg {
            DiscoveryModeArg::ByExtension => DiscoveryMode::ByExtension,
            DiscoveryModeArg::VideoWithThumbnail => DiscoveryMode::VideoWithThumbnail,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "ambient-room")]
#[command(about = "Ambient background and sound picker served over HTTP", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Address the HTTP server listens on
    #[arg(long, env = "AMBIENT_ROOM_BIND", default_value = "127.0.0.1:8012")]
    pub bind: SocketAddr,

    /// Directory served under /public
    #[arg(long, env = "AMBIENT_ROOM_PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// Directory scanned for backgrounds (defaults to <public-dir>/bkgs)
    #[arg(long, env = "AMBIENT_ROOM_BACKGROUNDS_DIR")]
    pub backgrounds_dir: Option<PathBuf>,

    /// SQLite file holding the saved selections (defaults to ~/.ambient-room/settings.db)
    #[arg(long, env = "AMBIENT_ROOM_DATABASE")]
    pub database: Option<PathBuf>,

    /// How background files map to catalog entries
    #[arg(long, env = "AMBIENT_ROOM_DISCOVERY_MODE", value_enum, default_value_t)]
    pub discovery_mode: DiscoveryModeArg,

    /// Open the page in the default browser once the server is listening
    #[arg(long, env = "AMBIENT_ROOM_OPEN")]
    pub open: bool,
}

/// Fully resolved settings, with every optional path filled in.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub public_dir: PathBuf,
    pub backgrounds_dir: PathBuf,
    pub database: PathBuf,
    pub discovery_mode: DiscoveryMode,
    pub open_browser: bool,
}

impl Cli {
    /// Fill in defaults that depend on other flags or on the home directory.
    pub fn resolve(self) -> Result<Config> {
        let backgrounds_dir = self
            .backgrounds_dir
            .unwrap_or_else(|| self.public_dir.join(BACKGROUNDS_SUBDIR));
        let database = match self.database {
            Some(path) => path,
            None => default_db_path()?,
        };

        Ok(Config {
            bind: self.bind,
            public_dir: self.public_dir,
            backgrounds_dir,
            database,
            discovery_mode: self.discovery_mode.into(),
            open_browser: self.open,
        })
    }
}

impl Config {
    /// Address a browser on this machine should use.
    pub fn page_url(&self) -> String {
        format!("http://{}/", self.bind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backgrounds_dir_defaults_under_public_dir() {
        let cli = Cli::parse_from([
            "ambient-room",
            "--public-dir",
            "/srv/room",
            "--database",
            "/tmp/room.db",
        ]);

        let config = cli.resolve().unwrap();

        assert_eq!(config.backgrounds_dir, PathBuf::from("/srv/room/bkgs"));
        assert_eq!(config.database, PathBuf::from("/tmp/room.db"));
        assert_eq!(config.discovery_mode, DiscoveryMode::VideoWithThumbnail);
        assert_eq!(config.page_url(), "http://127.0.0.1:8012/");
        assert!(!config.open_browser);
    }

    #[test]
    fn discovery_mode_accepts_kebab_case() {
        let cli = Cli::parse_from([
            "ambient-room",
            "--discovery-mode",
            "by-extension",
            "--backgrounds-dir",
            "media",
            "--database",
            "room.db",
        ]);

        let config = cli.resolve().unwrap();

        assert_eq!(config.discovery_mode, DiscoveryMode::ByExtension);
        assert_eq!(config.backgrounds_dir, PathBuf::from("media"));
    }
}
