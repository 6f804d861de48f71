//! Reserved output artifacts.
//!
//! The merger owns a fixed set of file names inside the watched directory.
//! They are never read as input, are removed at the start of every merge,
//! and events on them never trigger a merge.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::error::{MergeError, MergeResult};

/// File name the horizontal strip is written to.
pub const PRIMARY_ARTIFACT: &str = "horizontal.png";

/// Every file name the merger considers its own output.
///
/// `vertical.png` is not produced yet but is still cleaned up and excluded.
pub const RESERVED_ARTIFACTS: [&str; 2] = [PRIMARY_ARTIFACT, "vertical.png"];

/// Check whether a path names a reserved artifact.
///
/// Matches on the file name suffix, so `old-horizontal.png` is reserved too.
pub fn is_reserved(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy();
    RESERVED_ARTIFACTS
        .iter()
        .any(|reserved| name.ends_with(reserved))
}

/// Path of the primary artifact inside `dir`.
pub fn primary_artifact_path(dir: &Path) -> PathBuf {
    dir.join(PRIMARY_ARTIFACT)
}

/// Remove every reserved artifact from `dir`.
///
/// Missing files are expected and ignored. Any other failure aborts.
pub fn clear_artifacts(dir: &Path) -> MergeResult<()> {
    for name in RESERVED_ARTIFACTS {
        let path = dir.join(name);
        match fs::remove_file(&path) {
            Ok(()) => crate::debug_event!("merge", "removed", "{}", path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => return Err(MergeError::RemoveArtifact { path, source }),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_reserved() {
        assert!(is_reserved(Path::new("/tmp/x/horizontal.png")));
        assert!(is_reserved(Path::new("vertical.png")));
        assert!(is_reserved(Path::new("/tmp/x/old-horizontal.png")));
        assert!(!is_reserved(Path::new("/tmp/x/a.png")));
        assert!(!is_reserved(Path::new("/tmp/x/horizontal.png.bak")));
        assert!(!is_reserved(Path::new("/")));
    }

    #[test]
    fn test_clear_artifacts_removes_both() {
        let temp_dir = TempDir::new().unwrap();
        for name in RESERVED_ARTIFACTS {
            fs::write(temp_dir.path().join(name), b"stale").unwrap();
        }
        fs::write(temp_dir.path().join("keep.png"), b"input").unwrap();

        clear_artifacts(temp_dir.path()).unwrap();

        for name in RESERVED_ARTIFACTS {
            assert!(!temp_dir.path().join(name).exists());
        }
        assert!(temp_dir.path().join("keep.png").exists());
    }

    #[test]
    fn test_clear_artifacts_missing_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        assert!(clear_artifacts(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_clear_artifacts_directory_in_the_way_fails() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(PRIMARY_ARTIFACT)).unwrap();

        let err = clear_artifacts(temp_dir.path()).unwrap_err();
        assert!(matches!(err, MergeError::RemoveArtifact { .. }));
    }
}
