//! Test helpers for staging template directories on disk

use std::fs;
use std::path::{Path, PathBuf};

/// A throwaway templates directory under the system temp dir
///
/// Each instance gets its own uniquely named directory, so parallel tests
/// never observe one another's files. The directory is removed on drop.
pub struct TempTemplates {
    dir: PathBuf,
}

impl TempTemplates {
    pub fn new(label: &str) -> Self {
        let dir = std::env::temp_dir().join(format!(
            "seo-microdata-{}-{}",
            std::process::id(),
            label
        ));
        fs::create_dir_all(&dir).expect("create temp templates dir");
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, file_name: &str, contents: &str) -> PathBuf {
        let path = self.dir.join(file_name);
        fs::write(&path, contents).expect("write template file");
        path
    }
}

impl Drop for TempTemplates {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.dir).ok();
    }
}
