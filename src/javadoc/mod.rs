//! Java documentation model
//!
//! The documentation tree pulled out of the Java reference implementation.
//! Every node carries its verbatim Javadoc, the documented members and enum
//! constants, and its nested types. Undocumented members and constants are
//! never stored.
//!
//! The tree round-trips through `javadocs.json` so a transfer run can reuse
//! an earlier extraction.

pub mod extractor;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::Result;

pub use extractor::extract_java_types;

/// Declaration kind of a Java type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JavaTypeKind {
    Class,
    Interface,
    Enum,
}

impl JavaTypeKind {
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "class_declaration" => Some(JavaTypeKind::Class),
            "interface_declaration" => Some(JavaTypeKind::Interface),
            "enum_declaration" => Some(JavaTypeKind::Enum),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JavaTypeKind::Class => "class",
            JavaTypeKind::Interface => "interface",
            JavaTypeKind::Enum => "enum",
        }
    }
}

impl std::fmt::Display for JavaTypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A documented field, method or constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaMember {
    /// `type name`, `returnType name(params)` or `Name(params)`
    pub signature: String,
    pub javadoc: String,
}

/// A documented enum constant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaEnumConstant {
    pub name: String,
    pub javadoc: String,
}

/// A class, interface or enum and everything documented inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaType {
    pub simple_name: String,
    /// Package-qualified name; nested types append to their parent's
    pub full_name: String,
    pub package_name: String,
    // older dumps call this field "type"
    #[serde(alias = "type")]
    pub kind: JavaTypeKind,
    /// Verbatim comment text including delimiters, or empty
    pub javadoc: String,
    pub members: Vec<JavaMember>,
    /// Present for enums only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_constants: Option<Vec<JavaEnumConstant>>,
    pub nested_types: Vec<JavaType>,
    pub source_path: String,
}

impl JavaType {
    /// This type and all nested types, depth first
    pub fn walk(&self) -> Vec<&JavaType> {
        let mut out = vec![self];
        for nested in &self.nested_types {
            out.extend(nested.walk());
        }
        out
    }
}

/// Total number of types in a forest, nested types included
pub fn count_types(types: &[JavaType]) -> usize {
    types.iter().map(|t| t.walk().len()).sum()
}

/// Number of distinct source files the forest was extracted from
pub fn count_source_files(types: &[JavaType]) -> usize {
    types
        .iter()
        .map(|t| t.source_path.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Extract the documentation tree of every `.java` file under `root`.
///
/// Files are visited in file-name order. A file that cannot be read is
/// logged and contributes nothing.
pub fn extract_javadocs_from_dir<P: AsRef<Path>>(root: P) -> Vec<JavaType> {
    let mut all_types = Vec::new();

    for entry in WalkDir::new(root.as_ref())
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "java"))
    {
        let path = entry.path().to_string_lossy().to_string();
        let source = match std::fs::read_to_string(entry.path()) {
            Ok(source) => source,
            Err(e) => {
                warn!("Error reading {}: {}", path, e);
                continue;
            }
        };

        let types = extract_java_types(&source, &path);
        if types.is_empty() {
            debug!("No types found in {}", path);
        } else {
            debug!("Extracted {} types from {}", types.len(), path);
        }
        all_types.extend(types);
    }

    info!(
        "Extracted {} Java types from {} files",
        count_types(&all_types),
        count_source_files(&all_types)
    );
    all_types
}

/// Write the documentation tree as pretty-printed JSON
pub fn save_javadocs<P: AsRef<Path>>(path: P, types: &[JavaType]) -> Result<()> {
    let json = serde_json::to_string_pretty(types)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read a documentation tree written by [`save_javadocs`]
pub fn load_javadocs<P: AsRef<Path>>(path: P) -> Result<Vec<JavaType>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, source: &str) -> JavaType {
        JavaType {
            simple_name: name.to_string(),
            full_name: format!("com.esotericsoftware.spine.{}", name),
            package_name: "com.esotericsoftware.spine".to_string(),
            kind: JavaTypeKind::Class,
            javadoc: String::new(),
            members: Vec::new(),
            enum_constants: None,
            nested_types: Vec::new(),
            source_path: source.to_string(),
        }
    }

    #[test]
    fn test_count_includes_nested() {
        let mut outer = leaf("AnimationState", "AnimationState.java");
        let mut entry = leaf("TrackEntry", "AnimationState.java");
        entry.nested_types.push(leaf("Deep", "AnimationState.java"));
        outer.nested_types.push(entry);
        let types = vec![outer, leaf("Bone", "Bone.java")];

        assert_eq!(count_types(&types), 4);
        assert_eq!(count_source_files(&types), 2);
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(leaf("Bone", "Bone.java")).unwrap();
        assert_eq!(value["simpleName"], "Bone");
        assert_eq!(value["kind"], "class");
        assert!(value.get("enumConstants").is_none());
        assert!(value["nestedTypes"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_reads_legacy_type_field() {
        let json = r#"[{
            "simpleName": "BlendMode",
            "fullName": "com.esotericsoftware.spine.BlendMode",
            "packageName": "com.esotericsoftware.spine",
            "type": "enum",
            "javadoc": "",
            "members": [],
            "enumConstants": [{"name": "normal", "javadoc": "/** Normal. */"}],
            "nestedTypes": [],
            "sourcePath": "BlendMode.java"
        }]"#;
        let types: Vec<JavaType> = serde_json::from_str(json).unwrap();
        assert_eq!(types[0].kind, JavaTypeKind::Enum);
        assert_eq!(types[0].enum_constants.as_ref().unwrap().len(), 1);
    }
}
