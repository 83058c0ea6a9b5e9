use serde::Serialize;
use std::path::PathBuf;

/// Process exit codes for a finished or aborted run.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FATAL: i32 = 1;
pub const EXIT_PARTIAL: i32 = 2;

/// A `.json` file found in the definitions directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionFile {
    pub filename: String,
    pub path: PathBuf,
    /// `None` when the filename has no usable characters.
    pub resource_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Created { resource_id: String, response: String },
    Planned { resource_id: String, url: String },
    Skipped { reason: String },
    Failed { resource_id: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub filename: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub definitions_dir: String,
    pub files: Vec<FileReport>,
}

impl RunReport {
    pub fn new(definitions_dir: impl Into<String>) -> Self {
        Self {
            definitions_dir: definitions_dir.into(),
            files: Vec::new(),
        }
    }

    pub fn push(&mut self, filename: impl Into<String>, outcome: FileOutcome) {
        self.files.push(FileReport {
            filename: filename.into(),
            outcome,
        });
    }

    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Created { .. }))
    }

    pub fn planned(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Planned { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files that were neither created nor planned.
    pub fn not_created(&self) -> usize {
        self.failed() + self.skipped()
    }

    /// [`EXIT_PARTIAL`] when any file was skipped or failed, otherwise
    /// [`EXIT_SUCCESS`]. An empty folder counts as success.
    pub fn exit_code(&self) -> i32 {
        if self.not_created() > 0 {
            EXIT_PARTIAL
        } else {
            EXIT_SUCCESS
        }
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counters() {
        let mut report = RunReport::new("./defs");
        report.push(
            "a.json",
            FileOutcome::Created {
                resource_id: "a".to_string(),
                response: "{}".to_string(),
            },
        );
        report.push(
            "___.json",
            FileOutcome::Skipped {
                reason: "no resource id".to_string(),
            },
        );
        report.push(
            "b.json",
            FileOutcome::Failed {
                resource_id: "b".to_string(),
                error: "HTTP 409".to_string(),
            },
        );

        assert_eq!(report.created(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.planned(), 0);
        assert!(report.has_failures());
    }

    fn created(resource_id: &str) -> FileOutcome {
        FileOutcome::Created {
            resource_id: resource_id.to_string(),
            response: "{}".to_string(),
        }
    }

    #[test]
    fn test_exit_code_empty_report_is_success() {
        let report = RunReport::new("./defs");
        assert_eq!(report.exit_code(), EXIT_SUCCESS);
    }

    #[test]
    fn test_exit_code_created_and_planned_is_success() {
        let mut report = RunReport::new("./defs");
        report.push("a.json", created("a"));
        report.push(
            "b.json",
            FileOutcome::Planned {
                resource_id: "b".to_string(),
                url: "https://example.com".to_string(),
            },
        );
        assert_eq!(report.exit_code(), EXIT_SUCCESS);
    }

    #[test]
    fn test_exit_code_skip_or_failure_is_partial() {
        let mut skipped = RunReport::new("./defs");
        skipped.push("a.json", created("a"));
        skipped.push(
            "___.json",
            FileOutcome::Skipped {
                reason: "no resource id".to_string(),
            },
        );
        assert_eq!(skipped.exit_code(), EXIT_PARTIAL);

        let mut failed = RunReport::new("./defs");
        failed.push(
            "b.json",
            FileOutcome::Failed {
                resource_id: "b".to_string(),
                error: "HTTP 403".to_string(),
            },
        );
        assert_eq!(failed.exit_code(), EXIT_PARTIAL);
        assert_eq!(failed.not_created(), 1);
    }

    #[test]
    fn test_report_serializes_flat_outcome() {
        let mut report = RunReport::new("./defs");
        report.push(
            "a.json",
            FileOutcome::Planned {
                resource_id: "a".to_string(),
                url: "https://example.com".to_string(),
            },
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files"][0]["status"], "planned");
        assert_eq!(json["files"][0]["filename"], "a.json");
        assert_eq!(json["files"][0]["resource_id"], "a");
    }
}
