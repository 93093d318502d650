use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

const NCERT_JSON: &str = include_str!("../data/ncert.json");

pub const MIN_GRADE: u8 = 1;
pub const MAX_GRADE: u8 = 12;

/// School grade, always within `MIN_GRADE..=MAX_GRADE`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Grade(u8);

impl Grade {
    pub fn new(n: u8) -> Result<Self, CatalogError> {
        if (MIN_GRADE..=MAX_GRADE).contains(&n) {
            Ok(Grade(n))
        } else {
            Err(CatalogError::InvalidGrade(n))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Grade {
    type Error = CatalogError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Grade::new(n)
    }
}

impl From<Grade> for u8 {
    fn from(g: Grade) -> u8 {
        g.0
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supported curricula. Only NCERT is indexed today.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Curriculum {
    #[default]
    Ncert,
}

impl Curriculum {
    pub fn as_str(self) -> &'static str {
        match self {
            Curriculum::Ncert => "ncert",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Curriculum::Ncert => "NCERT",
        }
    }
}

impl std::str::FromStr for Curriculum {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ncert" => Ok(Curriculum::Ncert),
            other => Err(CatalogError::UnknownCurriculum(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    pub chapters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeEntry {
    pub grade: Grade,
    /// Authored order; the subject grid follows it.
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Corrupt(String),
    InvalidGrade(u8),
    DuplicateGrade(u8),
    EmptyGrade(u8),
    DuplicateSubject { grade: u8, subject: String },
    EmptySubject { grade: u8, subject: String },
    UnknownCurriculum(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Corrupt(msg) => write!(f, "curriculum data corrupt: {msg}"),
            CatalogError::InvalidGrade(g) => {
                write!(f, "grade {g} outside {MIN_GRADE}..={MAX_GRADE}")
            }
            CatalogError::DuplicateGrade(g) => write!(f, "grade {g} listed twice"),
            CatalogError::EmptyGrade(g) => write!(f, "grade {g} has no subjects"),
            CatalogError::DuplicateSubject { grade, subject } => {
                write!(f, "grade {grade} lists subject {subject:?} twice")
            }
            CatalogError::EmptySubject { grade, subject } => {
                write!(f, "grade {grade} subject {subject:?} has no chapters")
            }
            CatalogError::UnknownCurriculum(name) => write!(f, "unknown curriculum: {name:?}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Immutable grade → subject → chapters table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurriculumCatalog {
    // Sorted by grade.
    grades: Vec<GradeEntry>,
}

impl CurriculumCatalog {
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let grades = serde_json::from_str::<Vec<GradeEntry>>(raw)
            .map_err(|e| CatalogError::Corrupt(e.to_string()))?;
        Self::from_entries(grades)
    }

    pub fn from_entries(mut grades: Vec<GradeEntry>) -> Result<Self, CatalogError> {
        grades.sort_by_key(|g| g.grade);
        for pair in grades.windows(2) {
            if pair[0].grade == pair[1].grade {
                return Err(CatalogError::DuplicateGrade(pair[0].grade.get()));
            }
        }
        for entry in &grades {
            let grade = entry.grade.get();
            if entry.subjects.is_empty() {
                return Err(CatalogError::EmptyGrade(grade));
            }
            for (i, subject) in entry.subjects.iter().enumerate() {
                if entry.subjects[..i].iter().any(|s| s.name == subject.name) {
                    return Err(CatalogError::DuplicateSubject {
                        grade,
                        subject: subject.name.clone(),
                    });
                }
                if subject.chapters.is_empty() {
                    return Err(CatalogError::EmptySubject {
                        grade,
                        subject: subject.name.clone(),
                    });
                }
            }
        }
        Ok(Self { grades })
    }

    /// Grades in ascending order.
    pub fn grades(&self) -> impl Iterator<Item = Grade> + '_ {
        self.grades.iter().map(|g| g.grade)
    }

    pub fn subjects(&self, grade: Grade) -> &[Subject] {
        self.grades
            .binary_search_by_key(&grade, |g| g.grade)
            .map(|i| self.grades[i].subjects.as_slice())
            .unwrap_or(&[])
    }

    /// Chapters for `(grade, subject)`; empty when either is unknown.
    pub fn chapters(&self, grade: Grade, subject: &str) -> &[String] {
        self.subjects(grade)
            .iter()
            .find(|s| s.name == subject)
            .map(|s| s.chapters.as_slice())
            .unwrap_or(&[])
    }
}

/// The bundled NCERT catalog, parsed on first use.
pub fn ncert() -> Result<&'static CurriculumCatalog, CatalogError> {
    static NCERT: OnceLock<Result<CurriculumCatalog, CatalogError>> = OnceLock::new();
    NCERT
        .get_or_init(|| CurriculumCatalog::from_json_str(NCERT_JSON))
        .as_ref()
        .map_err(Clone::clone)
}

pub fn subject_icon(subject: &str) -> &'static str {
    match subject {
        "Mathematics" => "📐",
        "Science" => "🔬",
        "Physics" => "⚛️",
        "Chemistry" => "🧪",
        "Biology" => "🧬",
        "Social Science" => "🌍",
        "English" => "📝",
        "Hindi" => "🇮🇳",
        "Computer Science" => "💻",
        _ => "📚",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grade(n: u8) -> Grade {
        Grade::new(n).unwrap()
    }

    #[test]
    fn bundled_catalog_covers_grades_one_to_twelve() {
        let cat = ncert().unwrap();
        let grades: Vec<u8> = cat.grades().map(Grade::get).collect();
        assert_eq!(grades, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn every_subject_has_chapters() {
        let cat = ncert().unwrap();
        for g in cat.grades() {
            assert!(!cat.subjects(g).is_empty(), "grade {g} has no subjects");
            for s in cat.subjects(g) {
                assert!(!s.chapters.is_empty(), "grade {g} {} is empty", s.name);
            }
        }
    }

    #[test]
    fn grade_six_mathematics_has_fourteen_chapters() {
        let chapters = ncert().unwrap().chapters(grade(6), "Mathematics");
        assert_eq!(chapters.len(), 14);
        assert_eq!(chapters[0], "Knowing Our Numbers");
    }

    #[test]
    fn subjects_keep_authored_order() {
        let names: Vec<&str> = ncert()
            .unwrap()
            .subjects(grade(6))
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["Mathematics", "Science", "Social Science", "English", "Hindi"]
        );
    }

    #[test]
    fn unknown_subject_yields_no_chapters() {
        let cat = ncert().unwrap();
        assert!(cat.chapters(grade(1), "Physics").is_empty());
    }

    #[test]
    fn grade_out_of_range_is_rejected() {
        assert_eq!(Grade::new(0), Err(CatalogError::InvalidGrade(0)));
        assert_eq!(Grade::new(13), Err(CatalogError::InvalidGrade(13)));
        let err = CurriculumCatalog::from_json_str(
            r#"[{"grade": 13, "subjects": [{"name": "X", "chapters": ["a"]}]}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Corrupt(_)));
    }

    #[test]
    fn empty_subject_is_rejected() {
        let err = CurriculumCatalog::from_json_str(
            r#"[{"grade": 3, "subjects": [{"name": "Art", "chapters": []}]}]"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::EmptySubject {
                grade: 3,
                subject: "Art".to_string()
            }
        );
    }

    #[test]
    fn duplicate_grade_is_rejected() {
        let err = CurriculumCatalog::from_json_str(
            r#"[{"grade": 2, "subjects": [{"name": "A", "chapters": ["x"]}]},
                {"grade": 2, "subjects": [{"name": "B", "chapters": ["y"]}]}]"#,
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateGrade(2));
    }

    #[test]
    fn curriculum_parse_is_case_insensitive() {
        assert_eq!("NCERT".parse::<Curriculum>(), Ok(Curriculum::Ncert));
        assert!("cbse-ib".parse::<Curriculum>().is_err());
    }

    #[test]
    fn unknown_subject_gets_default_icon() {
        assert_eq!(subject_icon("Science"), "🔬");
        assert_eq!(subject_icon("EVS"), "📚");
    }
}
