use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::resume::{ParsedResume, ResumeVariant};

/// A rendered preview the user chose to keep. Append-only per document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedTemplate {
    pub version_index: usize,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// An uploaded document and everything cached against its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub id: Uuid,
    pub name: String,
    pub media_type: String,
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub parsed: Option<ParsedResume>,
    #[serde(default)]
    pub variants: Option<Vec<ResumeVariant>>,
    #[serde(default)]
    pub templates: Vec<RenderedTemplate>,
}

impl UploadedDocument {
    pub fn new(id: Uuid, upload: NewDocument) -> Self {
        Self {
            id,
            name: upload.name,
            media_type: upload.media_type,
            bytes: upload.bytes,
            uploaded_at: Utc::now(),
            parsed: None,
            variants: None,
            templates: Vec::new(),
        }
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id,
            name: self.name.clone(),
            media_type: self.media_type.clone(),
            size_bytes: self.bytes.len(),
            uploaded_at: self.uploaded_at,
            parsed: self.parsed.is_some(),
            mutated: self.variants.is_some(),
            template_count: self.templates.len(),
        }
    }
}

/// Input to `DocumentStore::put`.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// List entry: identity plus flags for which pipeline stages are cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub name: String,
    pub media_type: String,
    pub size_bytes: usize,
    pub uploaded_at: DateTime<Utc>,
    pub parsed: bool,
    pub mutated: bool,
    pub template_count: usize,
}

mod base64_bytes {
    use base64::prelude::{Engine as _, BASE64_STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64_STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64_STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
