//! Transfer integration tests
//!
//! Runs the whole pipeline (Java extraction, type extraction, matching and
//! the edit loop) against temporary source trees with a scripted model.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use docport::config::Config;
use docport::transfer::collect_runtime_files;
use docport::{
    extract_javadocs_from_dir, DocportError, Edit, FileStatus, JavaType, Llm, LlmResponse,
    LoopEnd, MatchStrategy, TokenUsage, TransferOptions, Transferer,
};

/// Replays canned answers in order; `Err` entries fail the request
struct ScriptedLlm {
    script: RefCell<VecDeque<std::result::Result<String, String>>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedLlm {
    fn new(script: Vec<std::result::Result<String, String>>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Llm for ScriptedLlm {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }

    fn complete(&self, prompt: &str, _json: bool) -> docport::Result<LlmResponse> {
        self.prompts.borrow_mut().push(prompt.to_string());
        let next = self
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err("script exhausted".to_string()));
        match next {
            Ok(text) => Ok(LlmResponse {
                text,
                usage: TokenUsage::new(100, 20, 120),
            }),
            Err(message) => Err(DocportError::Llm {
                provider: "scripted".to_string(),
                message,
            }),
        }
    }
}

fn answer(edits: &[Edit]) -> std::result::Result<String, String> {
    Ok(format!("```json\n{}\n```", serde_json::to_string(edits).unwrap()))
}

fn no_edits() -> std::result::Result<String, String> {
    Ok("[]".to_string())
}

const BONE_JAVA: &str = r#"package spine;

/** Stores a bone's current pose. */
public class Bone {
	/** The local x translation. */
	float x;
}
"#;

const SLOT_JAVA: &str = r#"package spine;

/** Stores a slot's current pose. */
public class Slot {
}
"#;

const BONE_CS: &str = "namespace Spine {\n\tpublic class Bone {\n\t\tinternal float x;\n\t}\n}\n";

const SLOT_CS: &str = "namespace Spine {\n\tpublic class Slot {\n\t}\n}\n";

/// Java tree and runtime tree under one temp dir
fn setup(root: &Path) -> Vec<JavaType> {
    fs::create_dir_all(root.join("java/spine")).unwrap();
    fs::create_dir_all(root.join("runtime/src")).unwrap();
    fs::write(root.join("java/spine/Bone.java"), BONE_JAVA).unwrap();
    fs::write(root.join("java/spine/Slot.java"), SLOT_JAVA).unwrap();
    fs::write(root.join("runtime/src/Bone.cs"), BONE_CS).unwrap();
    fs::write(root.join("runtime/src/Slot.cs"), SLOT_CS).unwrap();
    fs::write(root.join("runtime/src/main.cpp"), "int main() { return 0; }\n").unwrap();
    extract_javadocs_from_dir(root.join("java"))
}

fn heuristic() -> TransferOptions {
    TransferOptions {
        matcher: MatchStrategy::Heuristic,
        ..Default::default()
    }
}

fn runtime_files(root: &Path) -> Vec<String> {
    let config = Config::default();
    collect_runtime_files(
        root.join("runtime"),
        &config.transfer.extensions,
        &config.transfer.exclude,
    )
}

fn bone_summary_edit() -> Edit {
    Edit::new(
        "\tpublic class Bone {",
        "\t/// <summary>Stores a bone's current pose.</summary>\n\tpublic class Bone {",
    )
}

// =============================================================================
// Batch runs
// =============================================================================

mod batch_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_documents_runtime_and_persists() {
        let temp = tempfile::tempdir().unwrap();
        let java_types = setup(temp.path());
        let files = runtime_files(temp.path());
        assert_eq!(files.len(), 3);

        // files run in name order: Bone.cs, Slot.cs, main.cpp
        let llm = ScriptedLlm::new(vec![
            answer(&[bone_summary_edit()]),
            no_edits(),
            no_edits(),
        ]);
        let transferer = Transferer::new(&llm, heuristic()).unwrap();

        let mut seen = Vec::new();
        let summary = transferer.transfer_files(&files, &java_types, false, &mut |i, total, r| {
            seen.push((i, total, r.path.clone()));
        });

        assert_eq!(seen.len(), 3);
        assert_eq!(summary.total_files(), 3);
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.usage, TokenUsage::new(300, 60, 360));
        assert_eq!(summary.model, "scripted-1");

        let bone = fs::read_to_string(temp.path().join("runtime/src/Bone.cs")).unwrap();
        assert!(bone.contains("\t/// <summary>Stores a bone's current pose.</summary>\n\tpublic class Bone {"));
        let slot = fs::read_to_string(temp.path().join("runtime/src/Slot.cs")).unwrap();
        assert_eq!(slot, SLOT_CS);

        assert!(matches!(summary.files[2].status, FileStatus::NoTypes));
        match &summary.files[0].status {
            FileStatus::Documented(outcome) => {
                assert_eq!(outcome.applied, 1);
                assert_eq!(outcome.passes, 1);
                assert_eq!(outcome.end, LoopEnd::Converged);
            }
            other => panic!("unexpected status {:?}", other),
        }
    }

    #[test]
    fn test_prompts_carry_only_matched_docs() {
        let temp = tempfile::tempdir().unwrap();
        let java_types = setup(temp.path());
        let files = runtime_files(temp.path());

        let llm = ScriptedLlm::new(vec![no_edits(), no_edits()]);
        let transferer = Transferer::new(&llm, heuristic()).unwrap();
        transferer.transfer_files(&files, &java_types, false, &mut |_, _, _| {});

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("spine.Bone"));
        assert!(prompts[0].contains("The local x translation."));
        assert!(!prompts[0].contains("spine.Slot"));
        assert!(prompts[1].contains("spine.Slot"));
        assert!(!prompts[1].contains("spine.Bone"));
    }

    #[test]
    fn test_failed_file_keeps_partial_usage() {
        let temp = tempfile::tempdir().unwrap();
        let java_types = setup(temp.path());
        let files = runtime_files(temp.path());

        let llm = ScriptedLlm::new(vec![
            answer(&[bone_summary_edit()]),
            Err("rate limited".to_string()),
            no_edits(),
        ]);
        let transferer = Transferer::new(&llm, heuristic()).unwrap();
        let summary = transferer.transfer_files(&files, &java_types, false, &mut |_, _, _| {});

        assert_eq!(summary.failed, 1);
        assert_eq!(summary.processed, 2);

        let bone = &summary.files[0];
        assert!(bone.is_failed());
        assert_eq!(bone.usage, TokenUsage::new(100, 20, 120));
        assert_eq!(summary.usage.total_tokens, 240);

        // the generate pass reached disk before the correction failed
        let on_disk = fs::read_to_string(&bone.path).unwrap();
        assert!(on_disk.contains("/// <summary>Stores a bone's current pose.</summary>"));
    }

    #[test]
    fn test_report_serializes() {
        let temp = tempfile::tempdir().unwrap();
        let java_types = setup(temp.path());
        let files = runtime_files(temp.path());

        let llm = ScriptedLlm::new(vec![no_edits(), no_edits()]);
        let transferer = Transferer::new(&llm, heuristic()).unwrap();
        let summary = transferer.transfer_files(&files, &java_types, false, &mut |_, _, _| {});

        let path = temp.path().join("report.json");
        summary.save(&path).unwrap();
        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

        assert_eq!(report["processed"], 3);
        assert_eq!(report["usage"]["totalTokens"], 240);
        assert_eq!(report["files"][0]["status"], "documented");
        assert_eq!(report["files"][0]["detail"]["end"], "converged");
        assert_eq!(report["files"][2]["status"], "noTypes");
        assert!(report["startedAt"].is_string());
    }
}

// =============================================================================
// Single files
// =============================================================================

mod file_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dry_run_leaves_file_untouched() {
        let temp = tempfile::tempdir().unwrap();
        let java_types = setup(temp.path());
        let path = temp.path().join("runtime/src/Bone.cs");

        let llm = ScriptedLlm::new(vec![answer(&[bone_summary_edit()]), no_edits()]);
        let transferer = Transferer::new(&llm, heuristic()).unwrap();
        let report = transferer.transfer_file(&path.to_string_lossy(), &java_types, true);

        assert_eq!(fs::read_to_string(&path).unwrap(), BONE_CS);
        let code = report.code().unwrap();
        assert!(code.contains("/// <summary>Stores a bone's current pose.</summary>"));
    }

    #[test]
    fn test_llm_mapping_with_unknown_names() {
        let temp = tempfile::tempdir().unwrap();
        let java_types = setup(temp.path());
        let path = temp.path().join("runtime/src/Bone.cs");

        // mapping answer names a type that does not exist
        let llm = ScriptedLlm::new(vec![Ok(r#"["spine.Nope"]"#.to_string())]);
        let transferer = Transferer::new(&llm, TransferOptions::default()).unwrap();
        let report = transferer.transfer_file(&path.to_string_lossy(), &java_types, false);

        assert_eq!(report.status, FileStatus::NoMatches);
        assert_eq!(report.usage.total_tokens, 120);
        assert!(llm.prompts()[0].contains("# Task: Map C# Types to Java Types"));
    }

    #[test]
    fn test_missing_file_fails_without_requests() {
        let temp = tempfile::tempdir().unwrap();
        let llm = ScriptedLlm::new(Vec::new());
        let transferer = Transferer::new(&llm, heuristic()).unwrap();

        let missing = temp.path().join("Missing.cs");
        let report = transferer.transfer_file(&missing.to_string_lossy(), &[], false);

        assert!(report.is_failed());
        assert!(llm.prompts().is_empty());
    }
}
