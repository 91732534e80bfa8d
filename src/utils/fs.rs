//! File system utilities.

use crate::Result;
use std::path::Path;

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::other(format!(
            "Not a directory: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Move a file from one location to another, creating the target's parent
/// directories as needed.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // Try rename first (fast, same filesystem)
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }

    // Fall back to copy + delete (cross filesystem)
    std::fs::copy(from, to)?;
    std::fs::remove_file(from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_move_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let from = temp.path().join("a.txt");
        let to = temp.path().join("nested/dir/b.txt");
        fs::write(&from, "content").unwrap();

        move_file(&from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "content");
    }

    #[test]
    fn test_ensure_directory_rejects_files() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f.txt");
        fs::write(&file, "x").unwrap();

        assert!(ensure_directory(temp.path()).is_ok());
        assert!(ensure_directory(&file).is_err());
        assert!(ensure_directory(&temp.path().join("missing")).is_err());
    }
}
