use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::shared::constants;

/// Directory holding the store, config and logs.
///
/// `override_dir` wins; otherwise the platform data dir, then the working
/// directory when the platform has none.
pub fn app_data_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }

    match dirs::data_dir() {
        Some(mut dir) => {
            dir.push(constants::APP_DIR_NAME);
            dir
        }
        None => std::env::current_dir()
            .unwrap_or_default()
            .join(format!(".{}", constants::APP_DIR_NAME)),
    }
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory: {:?}", dir))
}

/// Reads a text file, mapping "not found" to `None`.
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("Failed to read file: {:?}", path)),
    }
}

/// Writes via a sibling temp file and rename so readers never see half a file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents).with_context(|| format!("Failed to write file: {:?}", tmp))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to move {:?} into place at {:?}", tmp, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("file.txt");

        assert_eq!(read_optional(&path).unwrap(), None);
        write_atomic(&path, b"hello").unwrap();
        assert_eq!(read_optional(&path).unwrap().as_deref(), Some("hello"));
        assert!(!dir.path().join("nested").join("file.txt.tmp").exists());
    }

    #[test]
    fn test_override_dir_wins() {
        let dir = Path::new("/tmp/somewhere");
        assert_eq!(app_data_dir(Some(dir)), dir.to_path_buf());
    }
}
