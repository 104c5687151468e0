//! Prompt and response dumps for `--debug` runs

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Writes every prompt and raw answer to a directory, one file each.
///
/// With a runtime root set, dumps mirror the target file's location below
/// that root, so equally named files in different directories stay apart.
#[derive(Debug, Clone)]
pub struct DebugDump {
    dir: PathBuf,
    root: Option<PathBuf>,
}

impl DebugDump {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            root: None,
        }
    }

    /// Lay dumps out relative to `root`
    pub fn with_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Dump file path for `label` of the target file `file_path`,
    /// e.g. `core/Skeleton.cs.doc-prompt.txt`
    pub fn path_for(&self, file_path: &str, label: &str) -> PathBuf {
        let path = Path::new(file_path);
        let relative = self
            .root
            .as_deref()
            .and_then(|root| path.strip_prefix(root).ok())
            .filter(|rel| rel.file_name().is_some());

        let (parent, file_name) = match relative {
            Some(rel) => (rel.parent(), rel.file_name()),
            None => (None, path.file_name()),
        };

        let mut name = file_name
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("unknown"));
        name.push(format!(".{}.txt", label));

        match parent {
            Some(parent) => self.dir.join(parent).join(name),
            None => self.dir.join(name),
        }
    }

    /// Write a dump. Failures are logged, never returned.
    pub fn write(&self, file_path: &str, label: &str, content: &str) {
        let path = self.path_for(file_path, label);
        let parent = path.parent().unwrap_or(&self.dir);
        let result = std::fs::create_dir_all(parent).and_then(|_| std::fs::write(&path, content));
        if let Err(e) = result {
            warn!("Could not write debug dump {}: {}", path.display(), e);
        }
    }
}
