//! JSON files under `~/.flappy/`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// `~/.flappy/`, created on first use.
pub fn flappy_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".flappy");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(flappy_dir()?.join(filename))
}

/// Read JSON from `path`. A missing file gives the default silently; an
/// unparsable one is logged first.
pub fn load_json_or_default<T: Default + DeserializeOwned>(path: &Path) -> T {
    match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("ignoring invalid {}: {}", path.display(), e);
            T::default()
        }),
        Err(_) => T::default(),
    }
}

/// Write `data` to `path` as pretty JSON, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}
