//! Adapted-content panel on the chapter screen.
//!
//! Chapter fetches take tokens from one sequence; only the response for the
//! newest token is allowed to change the panel. Ask-box answers claim the
//! panel on arrival through [`Preview::take_over`], so a failing ask never
//! strands a chapter fetch.

use catalog::Grade;
use foundation::{AdaptedSections, RequestToken, TokenSequence};
use protocol::{AdaptResponse, ApiError};

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewPanel {
    Empty,
    Loading {
        sections: AdaptedSections,
    },
    Ready {
        title: String,
        response: AdaptResponse,
    },
    /// Backend has nothing indexed for this chapter yet.
    NotIndexed {
        subject: Option<String>,
    },
    Failed {
        message: String,
    },
}

/// Where an adapt request came from; decides how failures surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdaptOrigin {
    /// Automatic fetch after selecting a chapter. Failures render inline.
    Chapter { chapter: String },
    /// Free-text "ask" box. Failures become a toast.
    Ask { query: String },
}

impl AdaptOrigin {
    pub fn title(&self) -> &str {
        match self {
            AdaptOrigin::Chapter { chapter } => chapter,
            AdaptOrigin::Ask { query } => query,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Preview {
    panel: PreviewPanel,
    tokens: TokenSequence,
}

impl Default for Preview {
    fn default() -> Self {
        Self {
            panel: PreviewPanel::Empty,
            tokens: TokenSequence::new(),
        }
    }
}

impl Preview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self) -> &PreviewPanel {
        &self.panel
    }

    /// Back to the empty placeholder; responses still in flight are dropped.
    pub fn reset(&mut self) {
        self.panel = PreviewPanel::Empty;
        self.tokens.invalidate();
    }

    pub fn begin_loading(&mut self, sections: AdaptedSections) -> RequestToken {
        self.panel = PreviewPanel::Loading { sections };
        self.tokens.issue()
    }

    /// Newest chapter token handed out, `None` before the first one.
    pub fn mark(&self) -> Option<RequestToken> {
        self.tokens.latest()
    }

    /// Show `panel` unless a chapter fetch started or the panel was reset
    /// after `mark` was taken. Chapter fetches still in flight are dropped.
    pub fn take_over(&mut self, mark: Option<RequestToken>, panel: PreviewPanel) -> bool {
        if self.tokens.latest() != mark {
            return false;
        }
        self.tokens.invalidate();
        self.panel = panel;
        true
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.tokens.is_latest(token)
    }

    pub fn show(&mut self, panel: PreviewPanel) {
        self.panel = panel;
    }
}

/// Panel for a finished chapter fetch.
pub fn chapter_outcome(
    chapter: &str,
    subject: Option<&str>,
    result: Result<AdaptResponse, ApiError>,
) -> PreviewPanel {
    match result {
        Ok(response) => PreviewPanel::Ready {
            title: chapter.to_string(),
            response,
        },
        Err(err) if err.is_not_indexed() => PreviewPanel::NotIndexed {
            subject: subject.map(str::to_string),
        },
        Err(err) => PreviewPanel::Failed {
            message: err.to_string(),
        },
    }
}

pub fn chapter_query(chapter: &str, subject: Option<&str>, grade: Option<Grade>) -> String {
    let grade = grade.map(|g| g.to_string()).unwrap_or_default();
    format!(
        "Explain the chapter \"{chapter}\" from {} Grade {grade}",
        subject.unwrap_or("")
    )
}

/// Text seeded into the ask box when a chapter is picked.
pub fn ask_prompt(chapter: &str) -> String {
    format!("Explain \"{chapter}\" in a way that's easy to understand.")
}

/// Ask-box placeholder after picking a subject.
pub fn ask_placeholder(first_chapter: Option<&str>) -> String {
    match first_chapter {
        Some(ch) => format!("e.g. Explain \"{ch}\" simply…"),
        None => "Ask anything about this subject…".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_becomes_upload_guidance() {
        let panel = chapter_outcome(
            "Motion",
            Some("Science"),
            Err(ApiError::NotIndexed { detail: None }),
        );
        assert_eq!(
            panel,
            PreviewPanel::NotIndexed {
                subject: Some("Science".to_string())
            }
        );
    }

    #[test]
    fn other_failures_keep_detail() {
        let panel = chapter_outcome(
            "Motion",
            None,
            Err(ApiError::Status {
                status: 500,
                message: "LLM call failed".to_string(),
            }),
        );
        assert_eq!(
            panel,
            PreviewPanel::Failed {
                message: "LLM call failed".to_string()
            }
        );
    }

    #[test]
    fn stale_token_is_not_current() {
        let mut p = Preview::new();
        let a = p.begin_loading(AdaptedSections::default());
        let b = p.begin_loading(AdaptedSections::default());
        assert!(!p.is_current(a));
        assert!(p.is_current(b));
        p.reset();
        assert!(!p.is_current(b));
        assert_eq!(p.panel(), &PreviewPanel::Empty);
    }

    #[test]
    fn take_over_supersedes_pending_fetch_but_not_later_ones() {
        let mut p = Preview::new();
        let pending = p.begin_loading(AdaptedSections::default());
        let mark = p.mark();
        assert!(p.take_over(mark, PreviewPanel::Empty));
        assert!(!p.is_current(pending));

        let mark = p.mark();
        p.begin_loading(AdaptedSections::default());
        assert!(!p.take_over(mark, PreviewPanel::Empty));
        assert!(matches!(p.panel(), PreviewPanel::Loading { .. }));
    }

    #[test]
    fn chapter_query_text() {
        assert_eq!(
            chapter_query("Sorting Materials", Some("Science"), Grade::new(6).ok()),
            "Explain the chapter \"Sorting Materials\" from Science Grade 6"
        );
    }

    #[test]
    fn placeholder_without_chapters_is_generic() {
        assert_eq!(
            ask_placeholder(Some("Addition")),
            "e.g. Explain \"Addition\" simply…"
        );
        assert!(!ask_placeholder(None).contains('"'));
    }
}
