//! `POST /adapt`: chapter explanation tailored to a learner profile.

use catalog::Grade;
use foundation::Profile;
use serde::{Deserialize, Serialize};

pub const ADAPT_PATH: &str = "/adapt";

/// Request body. Absent fields are omitted from the JSON rather than sent as
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptRequest {
    pub query: String,

    #[serde(default, with = "profile_field", skip_serializing_if = "profile_field::skip")]
    pub disability_profile: Option<Profile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
}

impl AdaptRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            disability_profile: None,
            grade: None,
            subject: None,
            chapter: None,
        }
    }

    pub fn with_profile(mut self, profile: Option<Profile>) -> Self {
        self.disability_profile = profile;
        self
    }

    pub fn with_grade(mut self, grade: Option<Grade>) -> Self {
        self.grade = grade;
        self
    }

    pub fn with_subject(mut self, subject: Option<String>) -> Self {
        self.subject = subject.filter(|s| !s.is_empty());
        self
    }

    pub fn with_chapter(mut self, chapter: Option<String>) -> Self {
        self.chapter = chapter.filter(|s| !s.is_empty());
        self
    }
}

/// `General` is a UI choice only; the backend sees no profile.
mod profile_field {
    use foundation::Profile;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn skip(profile: &Option<Profile>) -> bool {
        profile.and_then(Profile::wire_name).is_none()
    }

    pub fn serialize<S: Serializer>(profile: &Option<Profile>, s: S) -> Result<S::Ok, S::Error> {
        match profile.and_then(Profile::wire_name) {
            Some(name) => s.serialize_some(name),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Profile>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|raw| raw.parse().map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Adapted content sections, in display order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Section {
    Simplified,
    VisualDescription,
    TtsScript,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptResponse {
    /// Markdown.
    #[serde(default)]
    pub simplified: Option<String>,
    /// Markdown.
    #[serde(default)]
    pub visual_description: Option<String>,
    /// Markdown.
    #[serde(default)]
    pub tts_script: Option<String>,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl AdaptResponse {
    /// Present, non-blank sections in fixed display order.
    pub fn sections(&self) -> Vec<(Section, &str)> {
        [
            (Section::Simplified, &self.simplified),
            (Section::VisualDescription, &self.visual_description),
            (Section::TtsScript, &self.tts_script),
        ]
        .into_iter()
        .filter_map(|(section, text)| {
            let text = text.as_deref()?;
            (!text.trim().is_empty()).then_some((section, text))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sections().is_empty() && self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn unset_fields_are_omitted() {
        let req = AdaptRequest::new("Explain fractions");
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v, json!({ "query": "Explain fractions" }));
    }

    #[test]
    fn general_profile_is_omitted() {
        let req = AdaptRequest::new("q").with_profile(Some(Profile::General));
        let v = serde_json::to_value(&req).unwrap();
        assert!(v.get("disability_profile").is_none());
    }

    #[test]
    fn full_request_shape() {
        let req = AdaptRequest::new("q")
            .with_profile(Some(Profile::HearingImpairment))
            .with_grade(Some(Grade::new(9).unwrap()))
            .with_subject(Some("Science".to_string()))
            .with_chapter(Some("Motion".to_string()));
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            json!({
                "query": "q",
                "disability_profile": "hearing_impairment",
                "grade": 9,
                "subject": "Science",
                "chapter": "Motion"
            })
        );
    }

    #[test]
    fn blank_subject_and_chapter_are_dropped() {
        let req = AdaptRequest::new("q")
            .with_subject(Some(String::new()))
            .with_chapter(Some(String::new()));
        assert_eq!(req.subject, None);
        assert_eq!(req.chapter, None);
    }

    #[test]
    fn response_sections_follow_display_order() {
        let resp: AdaptResponse = serde_json::from_value(json!({
            "tts_script": "Say it",
            "simplified": "Short",
            "visual_description": "   ",
            "sources": ["science-6.pdf"]
        }))
        .unwrap();
        let sections: Vec<Section> = resp.sections().into_iter().map(|(s, _)| s).collect();
        assert_eq!(sections, vec![Section::Simplified, Section::TtsScript]);
        assert_eq!(resp.sources, vec!["science-6.pdf".to_string()]);
    }

    #[test]
    fn missing_sources_default_to_empty() {
        let resp: AdaptResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.is_empty());
    }
}
