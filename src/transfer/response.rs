//! Tolerant parsing of model answers
//!
//! Every prompt asks for a single JSON array. Models wrap it in a markdown
//! fence, put raw newlines and tabs inside string literals, or answer with
//! something else entirely. The first two are repaired; anything that still
//! is not an array counts as an empty answer.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use super::edits::Edit;

static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\s*([\s\S]*?)```").unwrap());

static STRING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(?:[^"\\]|\\.)*""#).unwrap());

/// Escape raw control characters inside JSON string literals
fn escape_string_literals(text: &str) -> String {
    STRING_LITERAL
        .replace_all(text, |caps: &regex::Captures| {
            caps[0]
                .replace('\t', "\\t")
                .replace('\n', "\\n")
                .replace('\r', "\\r")
        })
        .into_owned()
}

/// Body of the first fenced code block, or the whole text
fn strip_fence(text: &str) -> &str {
    if !text.contains("```") {
        return text;
    }
    FENCED_BLOCK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|body| !body.is_empty())
        .unwrap_or(text)
}

/// Parse the JSON array in a model answer. Malformed or non-array answers
/// are logged and yield an empty vector.
pub fn parse_json_array(text: &str) -> Vec<Value> {
    let json = escape_string_literals(strip_fence(text));

    match serde_json::from_str::<Value>(&json) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("Error parsing JSON response: expected an array");
            debug!("Response was:\n{}", text);
            Vec::new()
        }
        Err(e) => {
            warn!("Error parsing JSON response: {}", e);
            debug!("Response was:\n{}", text);
            Vec::new()
        }
    }
}

/// Edits in a documentation or correction answer.
///
/// Elements that are not edit objects become empty edits, which the apply
/// step skips.
pub fn parse_edits(text: &str) -> Vec<Edit> {
    parse_json_array(text)
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect()
}

/// Java type names in a mapping answer; non-string elements are dropped
pub fn parse_type_names(text: &str) -> Vec<String> {
    parse_json_array(text)
        .into_iter()
        .filter_map(|item| match item {
            Value::String(name) => Some(name),
            _ => None,
        })
        .collect()
}
