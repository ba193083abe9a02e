//! JSON file helpers for the ~/.delve/ data directory.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Get the ~/.delve/ directory path, creating it if needed.
pub fn delve_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(".delve");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Get the full path for a file in ~/.delve/.
pub fn data_path(filename: &str) -> io::Result<PathBuf> {
    Ok(delve_dir()?.join(filename))
}

/// Write a value as pretty-printed JSON, creating parent directories.
///
/// The file is written next to its destination and renamed into place, so an
/// interrupted save never leaves a half-written file behind.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Read and parse a JSON file. `Ok(None)` if the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> io::Result<Option<T>> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    serde_json::from_str(&json)
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Delete a file, treating "already gone" as success.
pub fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn temp_file(name: &str) -> PathBuf {
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir()
            .join(format!("delve-persist-{}-{}", std::process::id(), test_id))
            .join(name)
    }

    #[test]
    fn test_data_path_format() {
        if dirs::home_dir().is_none() {
            return;
        }
        let path = data_path("test.json").expect("data_path should succeed");
        assert!(path.to_string_lossy().ends_with(".delve/test.json"));
    }

    #[test]
    fn test_read_missing_returns_none() {
        let val: Option<Vec<String>> = read_json(&temp_file("missing.json")).unwrap();
        assert!(val.is_none());
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let path = temp_file("roundtrip.json");
        let data = vec!["hello".to_string(), "world".to_string()];
        write_json(&path, &data).expect("write should succeed");

        let loaded: Option<Vec<String>> = read_json(&path).unwrap();
        assert_eq!(loaded, Some(data));
        assert!(!path.with_extension("json.tmp").exists());

        remove_if_exists(&path).unwrap();
        assert!(!path.exists());
        remove_if_exists(&path).expect("removing twice is fine");
    }

    #[test]
    fn test_read_invalid_is_invalid_data() {
        let path = temp_file("invalid.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();
        let err = read_json::<Vec<u32>>(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        fs::remove_file(path).ok();
    }
}
