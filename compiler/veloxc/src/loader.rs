//! Filesystem source loader for `include`.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use velox_parse::SourceLoader;

/// Loads included scripts from disk.
///
/// Relative paths are resolved against `base`, normally the directory of
/// the script being run; absolute paths are used as given.
#[derive(Clone, Debug)]
pub struct FileLoader {
    base: PathBuf,
}

impl FileLoader {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        FileLoader { base: base.into() }
    }

    /// Loader rooted at the directory containing `script`.
    pub fn for_script(script: &Path) -> Self {
        let base = script
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::new(base)
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        }
    }
}

impl SourceLoader for FileLoader {
    fn load(&self, path: &str) -> io::Result<String> {
        let resolved = self.resolve(path);
        debug!(path, resolved = %resolved.display(), "loading include");
        std::fs::read_to_string(resolved)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn relative_paths_use_the_script_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lib.vx"), "x = 1;").unwrap();

        let loader = FileLoader::for_script(&dir.path().join("main.vx"));
        assert_eq!(loader.base(), dir.path());
        assert_eq!(loader.load("lib.vx").unwrap(), "x = 1;");
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileLoader::new(dir.path());
        let err = loader.load("nope.vx").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
