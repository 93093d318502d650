//! PDF upload panel. `F` is the platform file handle (`web_sys::File` in the
//! browser); the flow only needs its name.

use protocol::IngestFields;

use crate::navigation::NavState;

pub const DROP_ZONE_IDLE: &str = "📁 Click or drag PDF here";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile<F> {
    pub name: String,
    pub file: F,
}

/// Raw values typed into the upload panel's optional fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOverrides {
    pub grade: String,
    pub subject: String,
    pub chapter: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestJob<F> {
    pub file: F,
    pub file_name: String,
    pub fields: IngestFields,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UploadError {
    NoFile,
    Busy,
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::NoFile => f.write_str("Please pick a PDF first"),
            UploadError::Busy => f.write_str("An upload is already in progress"),
        }
    }
}

impl std::error::Error for UploadError {}

#[derive(Debug, Clone)]
pub struct UploadFlow<F> {
    open: bool,
    busy: bool,
    pending: Option<PendingFile<F>>,
}

impl<F> Default for UploadFlow<F> {
    fn default() -> Self {
        Self {
            open: false,
            busy: false,
            pending: None,
        }
    }
}

impl<F: Clone> UploadFlow<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn pending(&self) -> Option<&PendingFile<F>> {
        self.pending.as_ref()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Drag-and-drop only takes PDFs; anything else is ignored.
    pub fn offer_dropped(&mut self, name: &str, file: F) -> bool {
        if !is_pdf_name(name) {
            return false;
        }
        self.pick(name, file);
        true
    }

    /// File picker selection; the input's `accept` attribute already filters.
    pub fn pick(&mut self, name: &str, file: F) {
        self.pending = Some(PendingFile {
            name: name.to_string(),
            file,
        });
    }

    pub fn drop_zone_label(&self) -> String {
        match &self.pending {
            Some(p) => format!("✅ {}", p.name),
            None => DROP_ZONE_IDLE.to_string(),
        }
    }

    /// Start an upload. Non-blank panel fields win over the current
    /// navigation selections.
    pub fn begin(
        &mut self,
        overrides: &UploadOverrides,
        nav: &NavState,
    ) -> Result<IngestJob<F>, UploadError> {
        if self.busy {
            return Err(UploadError::Busy);
        }
        let pending = self.pending.as_ref().ok_or(UploadError::NoFile)?;
        let fields = IngestFields {
            grade: non_blank(&overrides.grade).or_else(|| nav.grade.map(|g| g.to_string())),
            subject: non_blank(&overrides.subject).or_else(|| nav.subject.clone()),
            chapter: non_blank(&overrides.chapter).or_else(|| nav.chapter.clone()),
        };
        let job = IngestJob {
            file: pending.file.clone(),
            file_name: pending.name.clone(),
            fields,
        };
        self.busy = true;
        Ok(job)
    }

    /// Indexed: close the panel and forget the file.
    pub fn succeeded(&mut self) {
        self.busy = false;
        self.open = false;
        self.pending = None;
    }

    /// Keep the panel open with the same file so the user can retry.
    pub fn failed(&mut self) {
        self.busy = false;
    }
}

/// Drop-zone filter. Matches `.pdf` ASCII case-insensitively, so
/// `Science-8.PDF` is accepted even though a browser drop handler checking
/// only the lowercase suffix would reject it. The ingest endpoint lowercases
/// the name before its own check. A bare `.pdf` has no stem and is refused.
pub fn is_pdf_name(name: &str) -> bool {
    name.len() > 4 && name.to_ascii_lowercase().ends_with(".pdf")
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Grade;
    use pretty_assertions::assert_eq;

    fn nav() -> NavState {
        NavState {
            grade: Some(Grade::new(8).unwrap()),
            subject: Some("Science".to_string()),
            chapter: Some("Force and Pressure".to_string()),
            ..NavState::default()
        }
    }

    #[test]
    fn drop_accepts_only_pdf_names() {
        let mut flow = UploadFlow::new();
        assert!(!flow.offer_dropped("notes.docx", 1));
        assert!(flow.pending().is_none());
        assert!(flow.offer_dropped("Science-8.PDF", 2));
        assert_eq!(flow.pending().unwrap().file, 2);
        assert_eq!(flow.drop_zone_label(), "✅ Science-8.PDF");
    }

    #[test]
    fn pdf_suffix_match_ignores_case_and_needs_a_stem() {
        assert!(is_pdf_name("notes.PdF"));
        assert!(!is_pdf_name(".pdf"));
        assert!(!is_pdf_name("notes.pdf.txt"));
    }

    #[test]
    fn picker_skips_extension_check() {
        let mut flow = UploadFlow::new();
        flow.pick("scan.jpeg", 7);
        assert_eq!(flow.pending().unwrap().name, "scan.jpeg");
    }

    #[test]
    fn upload_without_file_is_rejected() {
        let mut flow: UploadFlow<u8> = UploadFlow::new();
        assert_eq!(
            flow.begin(&UploadOverrides::default(), &nav()),
            Err(UploadError::NoFile)
        );
        assert!(!flow.is_busy());
    }

    #[test]
    fn explicit_fields_override_navigation() {
        let mut flow = UploadFlow::new();
        flow.pick("sci.pdf", 1);
        let overrides = UploadOverrides {
            grade: " 9 ".to_string(),
            subject: "".to_string(),
            chapter: "Motion".to_string(),
        };
        let job = flow.begin(&overrides, &nav()).unwrap();
        assert_eq!(
            job.fields,
            IngestFields {
                grade: Some("9".to_string()),
                subject: Some("Science".to_string()),
                chapter: Some("Motion".to_string()),
            }
        );
        assert_eq!(job.file_name, "sci.pdf");
        assert!(flow.is_busy());
        assert_eq!(
            flow.begin(&overrides, &nav()),
            Err(UploadError::Busy)
        );
    }

    #[test]
    fn empty_state_sends_no_fields() {
        let mut flow = UploadFlow::new();
        flow.pick("a.pdf", 0);
        let job = flow
            .begin(&UploadOverrides::default(), &NavState::default())
            .unwrap();
        assert!(job.fields.form_parts().is_empty());
    }

    #[test]
    fn success_clears_file_and_closes() {
        let mut flow = UploadFlow::new();
        flow.open();
        flow.pick("a.pdf", 0);
        flow.begin(&UploadOverrides::default(), &nav()).unwrap();
        flow.succeeded();
        assert!(!flow.is_open());
        assert!(flow.pending().is_none());
        assert_eq!(flow.drop_zone_label(), DROP_ZONE_IDLE);
    }

    #[test]
    fn failure_keeps_file_for_retry() {
        let mut flow = UploadFlow::new();
        flow.open();
        flow.pick("a.pdf", 0);
        flow.begin(&UploadOverrides::default(), &nav()).unwrap();
        flow.failed();
        assert!(flow.is_open());
        assert!(!flow.is_busy());
        assert!(flow.pending().is_some());
    }
}
