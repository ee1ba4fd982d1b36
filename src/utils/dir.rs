use std::{
    env, io,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Result};
use tracing::debug;

const APPLICATION_NAME: &str = "progress-tracker";
const SAVE_FILE_NAME: &str = "tracker.json";

/// Directory for application state such as logs. $XDG_STATE_HOME or $HOME/.local/state on Linux,
/// %APPDATA% on Windows.
pub fn create_application_default_path() -> Result<PathBuf> {
    let mut path = base_dir("XDG_STATE_HOME", ".local/state")?;
    path.push(APPLICATION_NAME);
    create_dir(path)
}

/// Default save file. Lives directly in $XDG_DATA_HOME or $HOME/.local/share, so that the file is
/// easy to find and back up.
pub fn default_save_file() -> Result<PathBuf> {
    let dir = create_dir(base_dir("XDG_DATA_HOME", ".local/share")?)?;
    Ok(dir.join(SAVE_FILE_NAME))
}

/// Creates an empty save file if there is none yet.
pub fn ensure_save_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|v| !v.as_os_str().is_empty()) {
        create_dir(parent.to_path_buf())?;
    }
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(_) => {
            debug!("Created empty save file {path:?}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn base_dir(xdg_variable: &str, home_suffix: &str) -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let _ = (xdg_variable, home_suffix);
        env::var("APPDATA")
            .map(PathBuf::from)
            .map_err(|_| anyhow!("APPDATA should be present on Windows"))
    }
    #[cfg(not(windows))]
    {
        env::var(xdg_variable)
            .map(PathBuf::from)
            .or_else(|_| {
                env::var("HOME").map(|home| {
                    let mut path = PathBuf::from(home);
                    path.push(home_suffix);
                    path
                })
            })
            .map_err(|_| anyhow!("Couldn't find neither {xdg_variable} nor HOME"))
    }
}

fn create_dir(path: PathBuf) -> Result<PathBuf> {
    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}
