use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

// ─── Artifact locations ─────────────────────────────────────────────
//
// These paths are a contract with downstream consumers (CI collection
// steps); only the artifacts root is configurable.

/// `{artifacts}/grade.csv`
pub fn grade_csv_path(artifacts_dir: &Path) -> PathBuf {
    artifacts_dir.join("grade.csv")
}

/// `{artifacts}/feedback`
pub fn feedback_dir(artifacts_dir: &Path) -> PathBuf {
    artifacts_dir.join("feedback")
}

/// `{artifacts}/feedback/README.md`
pub fn feedback_readme_path(artifacts_dir: &Path) -> PathBuf {
    feedback_dir(artifacts_dir).join("README.md")
}
