//! On-disk settings.
//!
//! The configuration directory holds two plain text files:
//!
//! - `servers`: one `name///url` line per server, kept sorted
//! - `downloads`: a single line with the download directory
//!
//! Missing files are created on first use; the download directory defaults
//! to `<home>/wfmclient` and is created when the first file lands in it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::servers::ServerList;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "WFM_CONFIG_DIR";

const APP_DIR: &str = "wfmclient";
const SERVERS_FILE: &str = "servers";
const DOWNLOADS_FILE: &str = "downloads";

pub struct Settings {
    config_dir: PathBuf,
}

impl Settings {
    /// Open (and initialise if needed) the settings in `config_dir`.
    pub fn open(config_dir: impl Into<PathBuf>) -> Result<Self, Error> {
        let settings = Self {
            config_dir: config_dir.into(),
        };

        fs::create_dir_all(&settings.config_dir)
            .map_err(|e| Error::io(&settings.config_dir, e))?;

        let servers = settings.servers_file();
        if !servers.exists() {
            fs::write(&servers, "").map_err(|e| Error::io(&servers, e))?;
        }

        let downloads = settings.downloads_file();
        if !downloads.exists() {
            let default = default_download_dir(&settings.config_dir);
            tracing::info!(dir = %default.display(), "initialising download directory");
            write_line(&downloads, &default)?;
        }

        Ok(settings)
    }

    /// Open the settings in the default location.
    ///
    /// `WFM_CONFIG_DIR` wins over the platform configuration directory.
    pub fn open_default() -> Result<Self, Error> {
        Self::open(default_config_dir()?)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn servers_file(&self) -> PathBuf {
        self.config_dir.join(SERVERS_FILE)
    }

    pub fn downloads_file(&self) -> PathBuf {
        self.config_dir.join(DOWNLOADS_FILE)
    }

    /// Load the server list, sorting the file if it was out of order.
    pub fn servers(&self) -> Result<ServerList, Error> {
        let list = ServerList::load(self.servers_file())?;
        if !list.is_sorted_on_disk()? {
            list.save()?;
        }
        Ok(list)
    }

    pub fn download_dir(&self) -> Result<PathBuf, Error> {
        let file = self.downloads_file();
        let contents = fs::read_to_string(&file).map_err(|e| Error::io(&file, e))?;
        let line = contents.lines().next().unwrap_or("").trim();

        if line.is_empty() {
            Ok(default_download_dir(&self.config_dir))
        } else {
            Ok(PathBuf::from(line))
        }
    }

    /// Store `dir` as the download directory, creating it.
    pub fn set_download_dir(&self, dir: &Path) -> Result<(), Error> {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        write_line(&self.downloads_file(), dir)
    }
}

fn default_config_dir() -> Result<PathBuf, Error> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    dirs::config_dir()
        .map(|p| p.join(APP_DIR))
        .ok_or(Error::NoConfigDir)
}

fn default_download_dir(config_dir: &Path) -> PathBuf {
    dirs::home_dir()
        .map(|p| p.join(APP_DIR))
        .unwrap_or_else(|| config_dir.join("files"))
}

fn write_line(file: &Path, value: &Path) -> Result<(), Error> {
    fs::write(file, format!("{}\n", value.display())).map_err(|e| Error::io(file, e))
}
