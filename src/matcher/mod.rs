//! Type matching
//!
//! Narrows the Java documentation tree down to the types a single target
//! file actually ports. Two steps:
//!
//! 1. **Mapping**: target type names -> fully-qualified Java names. Either a
//!    model is shown a flat summary of every Java type and asked to pick, or
//!    names are compared directly ([`MatchStrategy::Heuristic`]).
//! 2. **Filtering**: the tree is walked and every type whose full name was
//!    picked is projected into a flat [`MinimalJavaType`]. Nesting is dropped
//!    because the documentation prompt only needs per-type context.

pub mod similarity;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::javadoc::{JavaEnumConstant, JavaMember, JavaType, JavaTypeKind};
use crate::llm::{Llm, TokenUsage};
use crate::transfer::debug::DebugDump;
use crate::transfer::prompts::Prompts;
use crate::transfer::response::parse_type_names;

/// Flat documentation record handed to the documentation prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalJavaType {
    pub full_name: String,
    pub javadoc: String,
    pub members: Vec<JavaMember>,
    pub enum_constants: Vec<JavaEnumConstant>,
}

impl From<&JavaType> for MinimalJavaType {
    fn from(ty: &JavaType) -> Self {
        Self {
            full_name: ty.full_name.clone(),
            javadoc: ty.javadoc.clone(),
            members: ty.members.clone(),
            enum_constants: ty.enum_constants.clone().unwrap_or_default(),
        }
    }
}

/// One line of the summary shown to the mapping prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSummary {
    pub name: String,
    pub kind: JavaTypeKind,
}

/// Every type in the forest as `{name, kind}`, nested types flattened in
/// depth-first order
pub fn summarize(types: &[JavaType]) -> Vec<TypeSummary> {
    types
        .iter()
        .flat_map(|t| t.walk())
        .filter(|t| !t.full_name.is_empty())
        .map(|t| TypeSummary {
            name: t.full_name.clone(),
            kind: t.kind,
        })
        .collect()
}

/// Project every type whose full name is in `relevant`, at any depth.
///
/// Emission follows depth-first order. Children are visited whether or not
/// their parent matched. An empty result is a normal outcome.
pub fn filter_java_types(types: &[JavaType], relevant: &HashSet<String>) -> Vec<MinimalJavaType> {
    if relevant.is_empty() {
        return Vec::new();
    }

    types
        .iter()
        .flat_map(|t| t.walk())
        .filter(|t| relevant.contains(&t.full_name))
        .map(MinimalJavaType::from)
        .collect()
}

/// Map target type names to Java full names by name comparison.
///
/// Each target name is compared with the last segment of every Java full
/// name, see [`similarity::names_match`]. All matching Java types are kept,
/// so a name shared by several nested types maps to each of them.
pub fn heuristic_matches(source_types: &[String], summary: &[TypeSummary]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for source in source_types {
        for entry in summary {
            let java_name = similarity::simple_name(&entry.name);
            if similarity::names_match(source, java_name) && seen.insert(entry.name.clone()) {
                matches.push(entry.name.clone());
            }
        }
    }

    matches
}

// ============================================================================
// Mapping step
// ============================================================================

/// How target types are mapped to Java types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// Ask the model (default)
    #[default]
    Llm,
    /// Deterministic name comparison, no tokens spent
    Heuristic,
}

impl std::str::FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "llm" => Ok(MatchStrategy::Llm),
            "heuristic" => Ok(MatchStrategy::Heuristic),
            _ => Err(format!("Unknown matcher: {}", s)),
        }
    }
}

/// Result of the mapping step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMapping {
    /// Fully-qualified Java names judged relevant
    pub java_types: Vec<String>,
    pub usage: TokenUsage,
}

/// Runs the mapping step with the configured strategy
pub struct TypeMapper<'a> {
    pub strategy: MatchStrategy,
    pub llm: &'a dyn Llm,
    pub prompts: &'a Prompts,
    pub debug: Option<&'a DebugDump>,
}

impl TypeMapper<'_> {
    pub fn map(
        &self,
        source_types: &[String],
        java_types: &[JavaType],
        file_path: &str,
    ) -> Result<TypeMapping> {
        let summary = summarize(java_types);

        let mapping = match self.strategy {
            MatchStrategy::Heuristic => TypeMapping {
                java_types: heuristic_matches(source_types, &summary),
                usage: TokenUsage::default(),
            },
            MatchStrategy::Llm => {
                let prompt = self.prompts.type_mapping(source_types, &summary, file_path)?;
                if let Some(dump) = self.debug {
                    dump.write(file_path, "type-mapping-prompt", &prompt);
                }

                let response = self.llm.complete(&prompt, false)?;
                if let Some(dump) = self.debug {
                    dump.write(file_path, "type-mapping-response", &response.text);
                }

                TypeMapping {
                    java_types: parse_type_names(&response.text),
                    usage: response.usage,
                }
            }
        };

        info!("Found {} matches", mapping.java_types.len());
        for name in &mapping.java_types {
            debug!("  mapped to {}", name);
        }
        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn java_type(full_name: &str, kind: JavaTypeKind, nested: Vec<JavaType>) -> JavaType {
        JavaType {
            simple_name: similarity::simple_name(full_name).to_string(),
            full_name: full_name.to_string(),
            package_name: "spine".to_string(),
            kind,
            javadoc: format!("/** {} */", full_name),
            members: Vec::new(),
            enum_constants: (kind == JavaTypeKind::Enum).then(Vec::new),
            nested_types: nested,
            source_path: "AnimationState.java".to_string(),
        }
    }

    fn forest() -> Vec<JavaType> {
        vec![
            java_type(
                "spine.AnimationState",
                JavaTypeKind::Class,
                vec![
                    java_type("spine.AnimationState.TrackEntry", JavaTypeKind::Class, vec![]),
                    java_type("spine.AnimationState.EventType", JavaTypeKind::Enum, vec![]),
                ],
            ),
            java_type("spine.Bone", JavaTypeKind::Class, vec![]),
        ]
    }

    fn names(types: &[MinimalJavaType]) -> Vec<&str> {
        types.iter().map(|t| t.full_name.as_str()).collect()
    }

    #[test]
    fn test_summary_is_flat() {
        let summary = summarize(&forest());
        let names: Vec<&str> = summary.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "spine.AnimationState",
                "spine.AnimationState.TrackEntry",
                "spine.AnimationState.EventType",
                "spine.Bone"
            ]
        );
        assert_eq!(summary[2].kind, JavaTypeKind::Enum);
    }

    #[test]
    fn test_filter_reaches_nested_without_parent() {
        let relevant: HashSet<String> = ["spine.AnimationState.TrackEntry", "spine.Bone"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let filtered = filter_java_types(&forest(), &relevant);
        assert_eq!(names(&filtered), vec!["spine.AnimationState.TrackEntry", "spine.Bone"]);
    }

    #[test]
    fn test_filter_defaults_enum_constants() {
        let relevant: HashSet<String> = ["spine.AnimationState", "spine.AnimationState.EventType"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let filtered = filter_java_types(&forest(), &relevant);
        assert_eq!(names(&filtered), vec!["spine.AnimationState", "spine.AnimationState.EventType"]);
        assert!(filtered.iter().all(|t| t.enum_constants.is_empty()));

        let json = serde_json::to_value(&filtered[0]).unwrap();
        assert!(json["enumConstants"].as_array().unwrap().is_empty());
        assert!(json.get("nestedTypes").is_none());
    }

    #[test]
    fn test_empty_relevant_set() {
        assert!(filter_java_types(&forest(), &HashSet::new()).is_empty());
    }

    #[test]
    fn test_heuristic_matches() {
        let summary = summarize(&forest());
        let source = vec![
            "AnimationState".to_string(),
            "TrackEntry".to_string(),
            "EventQueue".to_string(),
        ];
        assert_eq!(
            heuristic_matches(&source, &summary),
            vec!["spine.AnimationState", "spine.AnimationState.TrackEntry"]
        );
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("LLM".parse::<MatchStrategy>(), Ok(MatchStrategy::Llm));
        assert_eq!("heuristic".parse::<MatchStrategy>(), Ok(MatchStrategy::Heuristic));
        assert!("fuzzy".parse::<MatchStrategy>().is_err());
    }
}
