//! Call-syntax detection over model output text.
//!
//! The detector recognizes one fixed grammar embedded anywhere in a
//! response:
//!
//! ```text
//! [TOOL_CALL: tool_name(key=value, other="quoted value")]
//! ```
//!
//! Matching is case-insensitive for the marker and the tool name, and the
//! returned call carries the name lowercased. Detection is a pure function
//! of its input: no state is kept between invocations, so scanning the
//! same text twice yields the same calls.
//!
//! ```
//! use gtooling::detect_tool_calls;
//!
//! let calls = detect_tool_calls("Sure. [TOOL_CALL: get_weather(city=Paris)]");
//! assert_eq!(calls.len(), 1);
//! assert_eq!(calls[0].name, "get_weather");
//! assert_eq!(calls[0].parameters.get("city").map(String::as_str), Some("Paris"));
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::ToolCall;

/// Marker, tool identifier, then an unnested parenthesized parameter list.
static CALL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[TOOL_CALL:\s*([a-z_][a-z0-9_]*)\((.*?)\)\]").expect("valid regex")
});

/// Scans `text` and returns every well-formed tool call, in order of
/// appearance.
pub fn detect_tool_calls(text: &str) -> Vec<ToolCall> {
    CALL_PATTERN
        .captures_iter(text)
        .map(|captures| ToolCall {
            name: captures[1].to_lowercase(),
            parameters: parse_parameters(&captures[2]),
        })
        .collect()
}

/// True when `text` contains at least one well-formed tool call.
pub fn contains_tool_call(text: &str) -> bool {
    CALL_PATTERN.is_match(text)
}

/// Parses `key=value` fragments separated by commas.
///
/// Keys and values are trimmed and one layer of surrounding quotes is
/// stripped from values. Fragments without `=` or with an empty key are
/// skipped rather than failing the whole call.
fn parse_parameters(raw: &str) -> BTreeMap<String, String> {
    let mut parameters = BTreeMap::new();

    for fragment in raw.split(',') {
        let Some((key, value)) = fragment.split_once('=') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        let value = value.trim().trim_matches('"').trim_matches('\'');
        parameters.insert(key.to_string(), value.to_string());
    }

    parameters
}
