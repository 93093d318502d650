//! `POST /ingest`: multipart PDF upload with optional curriculum metadata.

use serde::{Deserialize, Serialize};

pub const INGEST_PATH: &str = "/ingest";

/// Multipart part carrying the PDF bytes.
pub const FILE_PART: &str = "file";

/// Optional text parts sent alongside the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestFields {
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub chapter: Option<String>,
}

impl IngestFields {
    /// `(part name, value)` pairs for every field that has a value.
    pub fn form_parts(&self) -> Vec<(&'static str, &str)> {
        [
            ("grade", &self.grade),
            ("subject", &self.subject),
            ("chapter", &self.chapter),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestResponse {
    #[serde(default)]
    pub status: String,
    pub filename: String,
    pub chunks_indexed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_present_fields_become_parts() {
        let fields = IngestFields {
            grade: Some("7".to_string()),
            subject: None,
            chapter: Some("Nutrition in Plants".to_string()),
        };
        assert_eq!(
            fields.form_parts(),
            vec![("grade", "7"), ("chapter", "Nutrition in Plants")]
        );
    }

    #[test]
    fn decodes_backend_confirmation() {
        let resp: IngestResponse = serde_json::from_str(
            r#"{"status": "success", "chunks_indexed": 42, "filename": "sci.pdf"}"#,
        )
        .unwrap();
        assert_eq!(resp.chunks_indexed, 42);
        assert_eq!(resp.filename, "sci.pdf");
    }
}
