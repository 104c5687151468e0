//! Extraction integration tests
//!
//! Java documentation trees and runtime type listings built from files on
//! disk.

use std::fs;

use docport::javadoc::{count_source_files, count_types};
use docport::{
    extract_javadocs_from_dir, extract_types_from_dir, load_javadocs, save_javadocs,
    ExtractOptions, JavaTypeKind,
};

const ANIMATION_STATE_JAVA: &str = r#"package com.esotericsoftware.spine;

/** Applies animations over time, queues animations for later playback, and mixes between animations. */
public class AnimationState {
	/** Returns the track entry for the animation currently playing on the track. */
	public TrackEntry getCurrent (int trackIndex) {
		return null;
	}

	static public class TrackEntry {
		/** The animation to apply for this track entry. */
		Animation animation;
	}

	/** The type of event that occurred. */
	static public enum EventType {
		/** Fired when this entry starts. */
		start,
		end
	}
}
"#;

const SKIN_JAVA: &str = r#"package com.esotericsoftware.spine;

/** Stores attachments by slot index and name. */
public interface Skin {
}
"#;

// =============================================================================
// Java documentation
// =============================================================================

mod javadoc_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_tree_and_counts() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("spine");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("AnimationState.java"), ANIMATION_STATE_JAVA).unwrap();
        fs::write(dir.join("Skin.java"), SKIN_JAVA).unwrap();
        fs::write(dir.join("README.md"), "not java").unwrap();

        let types = extract_javadocs_from_dir(temp.path());
        let names: Vec<&str> = types.iter().map(|t| t.full_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "com.esotericsoftware.spine.AnimationState",
                "com.esotericsoftware.spine.Skin"
            ]
        );
        assert_eq!(count_types(&types), 4);
        assert_eq!(count_source_files(&types), 2);

        let state = &types[0];
        assert_eq!(state.members.len(), 1);
        assert_eq!(state.members[0].signature, "TrackEntry getCurrent(int trackIndex)");

        let nested: Vec<&str> = state.nested_types.iter().map(|t| t.simple_name.as_str()).collect();
        assert_eq!(nested, vec!["TrackEntry", "EventType"]);
        assert_eq!(state.nested_types[0].members[0].signature, "Animation animation");

        let event_type = &state.nested_types[1];
        assert_eq!(event_type.kind, JavaTypeKind::Enum);
        let constants = event_type.enum_constants.as_ref().unwrap();
        // undocumented constants are left out
        assert_eq!(constants.len(), 1);
        assert_eq!(constants[0].name, "start");
        assert_eq!(constants[0].javadoc, "/** Fired when this entry starts. */");

        assert_eq!(types[1].kind, JavaTypeKind::Interface);
    }

    #[test]
    fn test_saved_tree_loads_back() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("AnimationState.java"), ANIMATION_STATE_JAVA).unwrap();

        let types = extract_javadocs_from_dir(temp.path());
        let path = temp.path().join("javadocs.json");
        save_javadocs(&path, &types).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"fullName\": \"com.esotericsoftware.spine.AnimationState\""));
        assert!(json.contains("\"kind\": \"enum\""));

        assert_eq!(load_javadocs(&path).unwrap(), types);
    }

    #[test]
    fn test_loads_legacy_type_field() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("javadocs.json");
        fs::write(
            &path,
            r#"[{
                "simpleName": "Bone",
                "fullName": "spine.Bone",
                "packageName": "spine",
                "type": "class",
                "javadoc": "/** A bone. */",
                "members": [],
                "nestedTypes": [],
                "sourcePath": "Bone.java"
            }]"#,
        )
        .unwrap();

        let types = load_javadocs(&path).unwrap();
        assert_eq!(types[0].kind, JavaTypeKind::Class);
        assert!(types[0].enum_constants.is_none());
    }
}

// =============================================================================
// Runtime types
// =============================================================================

mod runtime_type_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_types_per_file() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("csharp")).unwrap();
        fs::create_dir_all(root.join("include/spine")).unwrap();
        fs::create_dir_all(root.join("ts")).unwrap();

        fs::write(
            root.join("csharp/Skin.cs"),
            "namespace Spine {\n\tpublic class Skin {\n\t\tpublic struct SkinEntry {}\n\t}\n}\n",
        )
        .unwrap();
        fs::write(
            root.join("include/spine/Skin.h"),
            "namespace spine {\nclass SP_API Skin : public SpineObject {\npublic:\n\tSkin();\n};\n}\n",
        )
        .unwrap();
        fs::write(
            root.join("ts/Skin.ts"),
            "export class Skin {}\nexport interface SkinEntry {}\n",
        )
        .unwrap();
        fs::write(root.join("include/spine/Skin.cpp"), "Skin::Skin() {}\n").unwrap();

        let infos = extract_types_from_dir(root, &ExtractOptions::default());
        assert_eq!(infos.len(), 3);

        let by_suffix = |suffix: &str| {
            infos
                .iter()
                .find(|i| i.file.replace('\\', "/").ends_with(suffix))
                .map(|i| i.types.clone())
                .unwrap()
        };
        assert_eq!(by_suffix("csharp/Skin.cs"), vec!["Skin", "SkinEntry"]);
        assert_eq!(by_suffix("spine/Skin.h"), vec!["Skin"]);
        assert_eq!(by_suffix("ts/Skin.ts"), vec!["Skin", "SkinEntry"]);
    }
}
