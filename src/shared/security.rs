use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size for recipe and manifest files (100 MB)
pub const MAX_RECIPE_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Maximum size for a local channel index (512 MB)
///
/// Channel indexes for large platforms run to hundreds of megabytes.
pub const MAX_INDEX_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected, never its target.
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Validates that a path is an existing directory and not a symbolic link
pub fn validate_directory(path: &Path, description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_dir() {
        anyhow::bail!("{} is not a directory", path.display());
    }

    Ok(())
}

/// Reads a regular file into a string after the safety checks:
/// - reject symbolic links
/// - reject anything that is not a regular file
/// - enforce `max_size`
pub fn read_regular_file(path: &Path, description: &str, max_size: u64) -> Result<String> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, max_size)?;

    fs::read_to_string(path).map_err(|e| anyhow::anyhow!("Failed to read {}: {}", description, e))
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("meta.yaml");
        fs::write(&path, "package: {}").unwrap();

        let content = read_regular_file(&path, "recipe", MAX_RECIPE_FILE_SIZE).unwrap();
        assert_eq!(content, "package: {}");
    }

    #[test]
    fn test_read_regular_file_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_regular_file(temp_dir.path(), "recipe", MAX_RECIPE_FILE_SIZE).unwrap_err();
        assert!(err.to_string().contains("not a regular file"));
    }

    #[test]
    fn test_read_regular_file_rejects_oversized() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("big.yaml");
        fs::write(&path, "0123456789").unwrap();

        let err = read_regular_file(&path, "recipe", 4).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_read_regular_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_regular_file(&temp_dir.path().join("nope"), "recipe", 10).is_err());
    }

    #[test]
    fn test_validate_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_directory(temp_dir.path(), "recipes directory").is_ok());

        let file = temp_dir.path().join("file");
        fs::write(&file, "x").unwrap();
        let err = validate_directory(&file, "recipes directory").unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_validate_not_symlink_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("plan.txt");
        fs::write(&file_path, "x").unwrap();
        assert!(validate_not_symlink(&file_path, "write").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_rejected() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.yaml");
        fs::write(&target, "x").unwrap();
        let link = temp_dir.path().join("link.yaml");
        symlink(&target, &link).unwrap();

        assert!(validate_not_symlink(&link, "write").is_err());
        let err = read_regular_file(&link, "recipe", MAX_RECIPE_FILE_SIZE).unwrap_err();
        assert!(err.to_string().contains("symbolic link"));

        let dir_link = temp_dir.path().join("dir-link");
        symlink(temp_dir.path(), &dir_link).unwrap();
        assert!(validate_directory(&dir_link, "recipes directory").is_err());
    }

    #[test]
    fn test_validate_file_size() {
        let path = Path::new("repodata.json");
        assert!(validate_file_size(10, path, 10).is_ok());
        assert!(validate_file_size(11, path, 10).is_err());
    }
}
