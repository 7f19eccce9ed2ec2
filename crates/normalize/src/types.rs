//! Typed view over provider response payloads.
//!
//! Provider schemas differ across vendors and API versions, so a payload
//! arrives as an untyped [`serde_json::Value`]. [`RawResponse::classify`]
//! probes the known shapes in priority order and returns the first one that
//! actually carries text; anything else lands in [`RawResponse::Unknown`],
//! which still renders to a string.
//!
//! | Priority | Shape                                   | Variant        |
//! |----------|-----------------------------------------|----------------|
//! | 1        | `"plain string"`                        | `Text`         |
//! | 2        | `{ "output_text": "..." }`              | `OutputText`   |
//! | 3        | `{ "output": ["..."] }` / `[{ "content": "..." }]` | `OutputEntry` |
//! | 3        | `{ "output": [{ "content": [parts] }] }` | `OutputParts` |
//! | 4        | `{ "choices": [{ "text" \| "message": {..} }] }` | `Choice` |
//! | 5        | `{ "candidates": [{ "content": { "parts": [..] } }] }` | `Candidate` |
//! | 6        | anything else                           | `Unknown`      |

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A provider payload classified into one of the recognized shapes.
///
/// Variants borrow from the original value; classification never clones the
/// payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawResponse<'a> {
    /// The payload is itself a string.
    Text(&'a str),
    /// A single combined `output_text` field.
    OutputText(&'a str),
    /// First `output` entry, either a bare string or a string `content`.
    OutputEntry(&'a str),
    /// First `output` entry whose `content` is a list of parts.
    OutputParts(&'a [Value]),
    /// First `choices` entry: direct `text` or `message.content`.
    Choice(&'a str),
    /// First `candidates` entry, rendered with its own fallbacks.
    Candidate(&'a Value),
    /// No recognized shape; rendered as compact JSON.
    Unknown(&'a Value),
}

/// Coarse label for the recognized shape, for logs and reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    Text,
    OutputText,
    Output,
    Choices,
    Candidates,
    Unknown,
}

impl ResponseShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseShape::Text => "text",
            ResponseShape::OutputText => "output_text",
            ResponseShape::Output => "output",
            ResponseShape::Choices => "choices",
            ResponseShape::Candidates => "candidates",
            ResponseShape::Unknown => "unknown",
        }
    }
}

impl<'a> RawResponse<'a> {
    /// Match `raw` against the known provider shapes, first match wins.
    pub fn classify(raw: &'a Value) -> Self {
        if let Value::String(text) = raw {
            return RawResponse::Text(text);
        }

        if let Some(text) = non_empty_str(raw.get("output_text")) {
            return RawResponse::OutputText(text);
        }

        if let Some(entry) = first_entry(raw, "output") {
            if let Value::String(text) = entry {
                return RawResponse::OutputEntry(text);
            }
            match entry.get("content") {
                Some(Value::String(text)) if !text.is_empty() => {
                    return RawResponse::OutputEntry(text);
                }
                Some(Value::Array(parts)) if !parts.is_empty() => {
                    return RawResponse::OutputParts(parts);
                }
                _ => {}
            }
        }

        if let Some(choice) = first_entry(raw, "choices") {
            let text = non_empty_str(choice.get("text")).or_else(|| {
                non_empty_str(choice.get("message").and_then(|message| message.get("content")))
            });
            if let Some(text) = text {
                return RawResponse::Choice(text);
            }
        }

        if let Some(candidate) = first_entry(raw, "candidates") {
            return RawResponse::Candidate(candidate);
        }

        RawResponse::Unknown(raw)
    }

    /// Which provider shape was recognized.
    pub fn shape(&self) -> ResponseShape {
        match self {
            RawResponse::Text(_) => ResponseShape::Text,
            RawResponse::OutputText(_) => ResponseShape::OutputText,
            RawResponse::OutputEntry(_) | RawResponse::OutputParts(_) => ResponseShape::Output,
            RawResponse::Choice(_) => ResponseShape::Choices,
            RawResponse::Candidate(_) => ResponseShape::Candidates,
            RawResponse::Unknown(_) => ResponseShape::Unknown,
        }
    }

    /// Render the classified payload as plain text.
    pub fn into_text(self) -> String {
        match self {
            RawResponse::Text(text)
            | RawResponse::OutputText(text)
            | RawResponse::OutputEntry(text)
            | RawResponse::Choice(text) => text.to_string(),
            RawResponse::OutputParts(parts) => parts
                .iter()
                .map(part_text)
                .collect::<Vec<_>>()
                .join("\n"),
            RawResponse::Candidate(candidate) => candidate_text(candidate),
            RawResponse::Unknown(raw) => stringify(raw),
        }
    }
}

/// Candidates prefer `content.parts[*].text`, then a direct `text`/`output`,
/// then whatever `content` holds, then the candidate itself.
fn candidate_text(candidate: &Value) -> String {
    let parts: Vec<&str> = candidate
        .get("content")
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| non_empty_str(part.get("text")))
                .collect()
        })
        .unwrap_or_default();
    if !parts.is_empty() {
        return parts.join("\n");
    }

    if let Some(text) =
        non_empty_str(candidate.get("text")).or_else(|| non_empty_str(candidate.get("output")))
    {
        return text.to_string();
    }

    match candidate.get("content") {
        Some(content) if !content.is_null() => stringify(content),
        _ => stringify(candidate),
    }
}

fn part_text(part: &Value) -> String {
    match part {
        Value::Object(_) => match part.get("text") {
            Some(Value::String(text)) => text.clone(),
            _ => stringify(part),
        },
        other => stringify(other),
    }
}

/// Strings render raw; everything else as compact JSON.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn first_entry<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key).and_then(Value::as_array).and_then(|list| list.first())
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|text| !text.is_empty())
}
