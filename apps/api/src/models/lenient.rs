//! Field deserializers for model-produced JSON.
//!
//! Chat models drift on scalar types (a GPA as `3.8` or `"3.8"`), on list vs
//! single value (`description` as one paragraph or several bullets) and on null.
//! These helpers accept those variations and reject everything else, so a
//! structurally wrong response still fails to decode.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s.trim().to_string(),
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// String field that also accepts numbers, booleans and null (→ empty).
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_text)
        .unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Scalar),
    Many(Vec<Option<Scalar>>),
}

/// List-of-strings field that also accepts a single string or null.
/// A single string containing newlines is split into one entry per line.
pub fn text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => s
            .into_text()
            .lines()
            .map(|l| l.trim().to_string())
            .collect(),
        Some(OneOrMany::Many(items)) => items
            .into_iter()
            .flatten()
            .map(Scalar::into_text)
            .collect(),
    };
    Ok(items.into_iter().filter(|s| !s.is_empty()).collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SkillShape {
    Flat(Vec<Option<Scalar>>),
    Grouped(serde_json::Map<String, serde_json::Value>),
    Single(Scalar),
}

/// Skills accept a flat list, a comma-separated string, or a map of
/// category → list. Categories are flattened in the order the model wrote them
/// (`serde_json` is built with `preserve_order`).
pub fn skill_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let skills = match Option::<SkillShape>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(SkillShape::Flat(items)) => items
            .into_iter()
            .flatten()
            .map(Scalar::into_text)
            .collect(),
        Some(SkillShape::Single(s)) => s
            .into_text()
            .split(',')
            .map(|p| p.trim().to_string())
            .collect(),
        Some(SkillShape::Grouped(groups)) => {
            let mut out = Vec::new();
            for (category, value) in groups {
                let items: Vec<String> = match value {
                    serde_json::Value::Array(items) => items
                        .into_iter()
                        .filter_map(|v| match v {
                            serde_json::Value::String(s) => Some(s.trim().to_string()),
                            _ => None,
                        })
                        .collect(),
                    serde_json::Value::String(s) => {
                        s.split(',').map(|p| p.trim().to_string()).collect()
                    }
                    _ => {
                        return Err(serde::de::Error::custom(format!(
                            "skill category '{category}' must be a list of strings"
                        )))
                    }
                };
                out.extend(items);
            }
            out
        }
    };
    Ok(skills.into_iter().filter(|s| !s.is_empty()).collect())
}
