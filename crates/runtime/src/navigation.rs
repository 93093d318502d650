use catalog::{CatalogError, Curriculum, Grade};
use foundation::{Profile, UnknownProfile};

/// Selections made so far. Lives for the page session only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    pub profile: Option<Profile>,
    pub curriculum: Curriculum,
    /// Set once the curriculum screen has been passed.
    pub curriculum_chosen: bool,
    pub grade: Option<Grade>,
    pub subject: Option<String>,
    pub chapter: Option<String>,
}

impl NavState {
    pub fn profile_label(&self) -> &'static str {
        Profile::label_or_general(self.profile)
    }

    fn grade_text(&self) -> String {
        self.grade.map(|g| g.to_string()).unwrap_or_else(|| "-".to_string())
    }

    pub fn crumb_curriculum(&self) -> String {
        format!("{} / Choose Curriculum", self.profile_label())
    }

    pub fn crumb_grade(&self) -> String {
        format!(
            "{} / {} / Choose Grade",
            self.profile_label(),
            self.curriculum.display_name()
        )
    }

    pub fn crumb_subject(&self) -> String {
        format!(
            "{} / {} / Grade {} / Subject",
            self.profile_label(),
            self.curriculum.display_name(),
            self.grade_text()
        )
    }

    pub fn crumb_chapter(&self) -> String {
        format!(
            "{} / Grade {} / {}",
            self.profile_label(),
            self.grade_text(),
            self.subject.as_deref().unwrap_or("")
        )
    }

    pub fn chapter_intro(&self, chapter_count: usize) -> String {
        format!(
            "{chapter_count} chapters for Grade {}. Select a chapter to get an AI-adapted explanation tailored for your learning profile.",
            self.grade_text()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    UnknownProfile(String),
    UnknownCurriculum(String),
    InvalidGrade(u8),
    ChapterOutOfRange { index: usize, count: usize },
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::UnknownProfile(p) => write!(f, "unknown profile: {p:?}"),
            SelectionError::UnknownCurriculum(c) => write!(f, "unknown curriculum: {c:?}"),
            SelectionError::InvalidGrade(g) => write!(f, "invalid grade: {g}"),
            SelectionError::ChapterOutOfRange { index, count } => {
                write!(f, "chapter index {index} out of range (0..{count})")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

impl From<UnknownProfile> for SelectionError {
    fn from(e: UnknownProfile) -> Self {
        SelectionError::UnknownProfile(e.0)
    }
}

impl From<CatalogError> for SelectionError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::InvalidGrade(g) => SelectionError::InvalidGrade(g),
            CatalogError::UnknownCurriculum(c) => SelectionError::UnknownCurriculum(c),
            other => SelectionError::UnknownCurriculum(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breadcrumbs() {
        let nav = NavState {
            profile: Some(Profile::Dyslexia),
            grade: Some(Grade::new(6).unwrap()),
            subject: Some("Science".to_string()),
            ..NavState::default()
        };
        assert_eq!(nav.crumb_curriculum(), "📖 Dyslexia / Choose Curriculum");
        assert_eq!(nav.crumb_grade(), "📖 Dyslexia / NCERT / Choose Grade");
        assert_eq!(nav.crumb_subject(), "📖 Dyslexia / NCERT / Grade 6 / Subject");
        assert_eq!(nav.crumb_chapter(), "📖 Dyslexia / Grade 6 / Science");
    }

    #[test]
    fn unset_profile_crumb_reads_general() {
        assert_eq!(
            NavState::default().crumb_grade(),
            "General / NCERT / Choose Grade"
        );
    }

    #[test]
    fn zero_chapter_intro() {
        let nav = NavState {
            grade: Some(Grade::new(2).unwrap()),
            ..NavState::default()
        };
        assert!(nav.chapter_intro(0).starts_with("0 chapters for Grade 2."));
    }
}
