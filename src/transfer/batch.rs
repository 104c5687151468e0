//! Runtime-wide transfer
//!
//! Finds every target file under a runtime directory and runs the per-file
//! pipeline on each, one at a time. A failing file is counted and the batch
//! moves on.

use std::path::Path;
use std::time::Instant;

use chrono::{DateTime, Utc};
use glob::{MatchOptions, Pattern};
use serde::Serialize;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::javadoc::JavaType;
use crate::llm::TokenUsage;

use super::{FileReport, Transferer};

/// Totals of a batch run, written by `--report`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub model: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed_secs: f64,
    /// Files that finished without error, documented or not
    pub processed: usize,
    pub failed: usize,
    pub usage: TokenUsage,
    pub files: Vec<FileReport>,
}

impl BatchSummary {
    pub fn total_files(&self) -> usize {
        self.files.len()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Runtime files to process: every file under `root` whose name ends with
/// one of `extensions`, minus those matching an `exclude` glob relative to
/// `root`. Sorted by path.
pub fn collect_runtime_files<P: AsRef<Path>>(
    root: P,
    extensions: &[String],
    exclude: &[String],
) -> Vec<String> {
    let root = root.as_ref();
    let exclude_patterns: Vec<_> = exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();
    let match_opts = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_string_lossy();
            extensions.iter().any(|ext| name.ends_with(ext.as_str()))
        })
        .filter_map(|e| {
            let relative = e
                .path()
                .strip_prefix(root)
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            let excluded = exclude_patterns
                .iter()
                .any(|p| p.matches_with(&relative, match_opts));
            (!excluded).then(|| e.path().to_string_lossy().to_string())
        })
        .collect()
}

impl Transferer<'_> {
    /// Process `files` in order. `progress` sees each report as it is done,
    /// along with the file's index and the total.
    pub fn transfer_files(
        &self,
        files: &[String],
        java_types: &[JavaType],
        dry_run: bool,
        progress: &mut dyn FnMut(usize, usize, &FileReport),
    ) -> BatchSummary {
        let started_at = Utc::now();
        let clock = Instant::now();
        let mut usage = TokenUsage::default();
        let mut reports = Vec::with_capacity(files.len());
        let mut processed = 0;
        let mut failed = 0;

        for (index, file) in files.iter().enumerate() {
            info!("Processing {} ({}/{})", file, index + 1, files.len());
            let report = self.transfer_file(file, java_types, dry_run);

            usage += report.usage;
            if report.is_failed() {
                failed += 1;
            } else {
                processed += 1;
            }
            info!("File tokens: {}", report.usage);

            progress(index, files.len(), &report);
            reports.push(report);
        }

        let elapsed_secs = clock.elapsed().as_secs_f64();
        if failed > 0 {
            warn!("{} of {} files failed", failed, files.len());
        }
        info!(
            "Processed {} files in {:.1}s, {} tokens",
            processed, elapsed_secs, usage
        );

        BatchSummary {
            model: self.model().to_string(),
            started_at,
            finished_at: Utc::now(),
            elapsed_secs,
            processed,
            failed,
            usage,
            files: reports,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn extensions() -> Vec<String> {
        vec![".cs".to_string(), ".h".to_string(), ".ts".to_string()]
    }

    #[test]
    fn test_collects_by_extension_sorted() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("src/b")).unwrap();
        fs::write(root.join("src/b/Slot.cs"), "").unwrap();
        fs::write(root.join("src/Bone.cs"), "").unwrap();
        fs::write(root.join("src/Bone.java"), "").unwrap();
        fs::write(root.join("src/Bone.h"), "").unwrap();

        let files = collect_runtime_files(root, &extensions(), &[]);
        let names: Vec<String> = files
            .iter()
            .map(|f| {
                Path::new(f)
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        assert_eq!(names, vec!["src/Bone.cs", "src/Bone.h", "src/b/Slot.cs"]);
    }

    #[test]
    fn test_exclude_patterns() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("node_modules/pkg/index.ts"), "").unwrap();
        fs::write(root.join("src/Skeleton.ts"), "").unwrap();
        fs::write(root.join("src/Skeleton.d.ts"), "").unwrap();

        let exclude = vec!["**/node_modules/**".to_string(), "**/*.d.ts".to_string()];
        let files = collect_runtime_files(root, &extensions(), &exclude);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("Skeleton.ts"));
    }
}
