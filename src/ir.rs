use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// One subject-predicate-object row as served by the relation store.
///
/// Only the fields the layout engine reads are typed; everything else is kept
/// in `extra` and passed through untouched for the display layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelationRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub relation_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subject_key: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub object_text: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub predicate: String,
    #[serde(default, deserialize_with = "lenient_confidence")]
    pub confidence: f32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_count: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RelationRecord {
    pub fn new(
        relation_id: impl Into<String>,
        subject_key: impl Into<String>,
        predicate: impl Into<String>,
        object_text: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            relation_id: relation_id.into(),
            subject_key: subject_key.into(),
            predicate: predicate.into(),
            object_text: object_text.into(),
            confidence,
            ..Default::default()
        }
    }

    pub fn with_updated_at(mut self, updated_at: impl Into<String>) -> Self {
        self.updated_at = updated_at.into();
        self
    }

    /// Confidence as seen by ranking and statistics: anything non-finite or
    /// outside `[0, 1]` counts as zero.
    pub fn confidence_score(&self) -> f32 {
        sanitize_confidence(self.confidence)
    }
}

pub fn sanitize_confidence(value: f32) -> f32 {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        value
    } else {
        0.0
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
    Other(IgnoredAny),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val as f32),
            NumberOrString::String(val) => val.trim().parse::<f32>().ok(),
            NumberOrString::Other(_) => None,
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        // Integral floats print without a fraction, so `1.0` ids read as "1".
        Some(Value::Number(n)) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(u)) => u.to_string(),
            _ => format!("{}", n.as_f64().unwrap_or(0.0)),
        },
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_confidence<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NumberOrString>::deserialize(deserializer)?
        .and_then(|v| v.as_f32())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0))
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("relation input is not valid JSON: {0}")]
    Json(String),
    #[error("relation input must be an array or an object with an `items` or `relations` array")]
    UnsupportedShape,
}

/// Parses relation records from a JSON document.
///
/// Accepts a bare array, or a page envelope carrying the rows under `items`
/// or `relations`. Falls back to JSON5 so hand-edited fixtures may carry
/// comments and trailing commas.
pub fn parse_relations(input: &str) -> Result<Vec<RelationRecord>, InputError> {
    let value = match serde_json::from_str::<Value>(input) {
        Ok(value) => value,
        Err(strict_err) => json5::from_str::<Value>(input)
            .map_err(|_| InputError::Json(strict_err.to_string()))?,
    };

    let rows = match value {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("items").or_else(|| map.remove("relations")) {
            Some(Value::Array(rows)) => rows,
            _ => return Err(InputError::UnsupportedShape),
        },
        _ => return Err(InputError::UnsupportedShape),
    };

    let mut relations = Vec::with_capacity(rows.len());
    for row in rows {
        // Rows that are not objects carry nothing to draw.
        if !row.is_object() {
            continue;
        }
        let record = serde_json::from_value::<RelationRecord>(row)
            .map_err(|err| InputError::Json(err.to_string()))?;
        relations.push(record);
    }
    Ok(relations)
}
