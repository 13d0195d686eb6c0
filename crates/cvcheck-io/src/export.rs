use std::path::{Path, PathBuf};

use crate::ExportError;

/// Write `bytes` to `dir/filename`, creating `dir` when missing. An existing
/// report of the same name is replaced.
pub async fn save_report(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    tokio::fs::create_dir_all(dir).await?;

    let path = dir.join(filename);
    tokio::fs::write(&path, bytes).await?;

    tracing::info!("Report saved to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_into_existing_dir() {
        let dir = tempfile::tempdir().unwrap();

        let path = save_report(dir.path(), "report.pdf", b"%PDF-1.5").await.unwrap();

        assert_eq!(path, dir.path().join("report.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.5");
    }

    #[tokio::test]
    async fn creates_missing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("reports").join("2026");

        let path = save_report(&nested, "r.pdf", b"abc").await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn replaces_same_day_report() {
        let dir = tempfile::tempdir().unwrap();
        save_report(dir.path(), "r.pdf", b"first").await.unwrap();
        let path = save_report(dir.path(), "r.pdf", b"second").await.unwrap();

        assert_eq!(std::fs::read(path).unwrap(), b"second");
    }

    #[tokio::test]
    async fn unwritable_target_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        let err = save_report(&file, "r.pdf", b"abc").await.unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
