//! HTML fragments for the dynamic parts of the page. Pure string building so
//! it can be tested natively; `lib.rs` writes the results into the DOM.

use catalog::{Grade, Subject, subject_icon};
use foundation::AdaptedSections;
use markdown::{Options as MarkdownOptions, to_html_with_options};
use protocol::{AdaptResponse, Section};
use runtime::PreviewPanel;

pub const LOADING_TITLE: &str = "⚡ AI is preparing your content…";
pub const NOT_INDEXED_TITLE: &str = "📄 No PDF Indexed Yet";

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn markdown_options() -> MarkdownOptions {
    // Backend text is model output; raw HTML in it stays escaped.
    MarkdownOptions::gfm()
}

pub fn markdown_html(input: &str) -> String {
    let trimmed = input.trim();
    to_html_with_options(trimmed, &markdown_options())
        .unwrap_or_else(|_| format!("<p>{}</p>", escape_html(trimmed)))
}

pub fn grade_grid(grades: impl Iterator<Item = Grade>, stagger_ms: u32) -> String {
    grades
        .enumerate()
        .map(|(i, g)| {
            format!(
                r#"<div class="grade-card" data-grade="{g}" style="animation-delay:{delay}ms"><div class="grade-num">{g}</div><div class="grade-lbl">Grade</div></div>"#,
                delay = stagger(i, stagger_ms),
            )
        })
        .collect()
}

pub fn subject_grid(subjects: &[Subject], stagger_ms: u32) -> String {
    subjects
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let name = escape_html(&s.name);
            format!(
                r#"<div class="subject-card" data-subject="{name}" style="animation-delay:{delay}ms"><div class="sub-icon">{icon}</div><div class="sub-name">{name}</div><div class="sub-count">{count} chapters</div></div>"#,
                delay = stagger(i, stagger_ms),
                icon = subject_icon(&s.name),
                count = s.chapters.len(),
            )
        })
        .collect()
}

/// Items start hidden; the shell adds `reveal` one by one.
pub fn chapter_items(chapters: &[String]) -> String {
    chapters
        .iter()
        .enumerate()
        .map(|(i, ch)| {
            format!(
                r#"<div class="ch-item" data-idx="{i}"><div class="ch-num">{n}</div><div class="ch-name">{name}</div></div>"#,
                n = i + 1,
                name = escape_html(ch),
            )
        })
        .collect()
}

fn stagger(index: usize, step_ms: u32) -> u64 {
    index as u64 * u64::from(step_ms)
}

fn section_label(section: Section) -> (&'static str, &'static str) {
    match section {
        Section::Simplified => ("📝 Simplified", ""),
        Section::VisualDescription => ("👁️ Visual Description", " visual"),
        Section::TtsScript => ("🔊 TTS Script", " tts"),
    }
}

/// Preview content for a panel state; `None` means show the empty
/// placeholder instead.
pub fn preview_html(panel: &PreviewPanel) -> Option<String> {
    match panel {
        PreviewPanel::Empty => None,
        PreviewPanel::Loading { sections } => Some(loading_html(*sections)),
        PreviewPanel::Ready { title, response } => Some(ready_html(title, response)),
        PreviewPanel::NotIndexed { subject } => Some(not_indexed_html(subject.as_deref())),
        PreviewPanel::Failed { message } => Some(failed_html(message)),
    }
}

pub fn loading_html(sections: AdaptedSections) -> String {
    let mut expected = Vec::new();
    if sections.simplified {
        expected.push("Simplified");
    }
    if sections.visual_description {
        expected.push("Visual Description");
    }
    if sections.tts_script {
        expected.push("TTS Script");
    }
    format!(
        r#"<div class="preview-title">{LOADING_TITLE}</div><div class="loading-dots"><span></span><span></span><span></span></div><div class="preview-expect">{}</div>"#,
        expected.join(" · ")
    )
}

pub const EMPTY_RESPONSE_NOTE: &str = "The server returned no content for this request.";

/// Section bodies use `preview-body`; `preview-content` is the panel
/// container the shell shows and hides.
pub fn ready_html(title: &str, response: &AdaptResponse) -> String {
    let mut html = format!(r#"<div class="preview-title">📖 {}</div>"#, escape_html(title));
    if response.is_empty() {
        html.push_str(&format!(r#"<div class="preview-note">{EMPTY_RESPONSE_NOTE}</div>"#));
        return html;
    }
    for (section, text) in response.sections() {
        let (label, class) = section_label(section);
        html.push_str(&format!(
            r#"<div class="preview-section{class}"><div class="preview-section-label">{label}</div><div class="preview-body">{}</div></div>"#,
            markdown_html(text)
        ));
    }
    if !response.sources.is_empty() {
        html.push_str(r#"<div class="preview-sources">"#);
        for source in &response.sources {
            html.push_str(&format!(
                r#"<span class="source-badge">📄 {}</span>"#,
                escape_html(source)
            ));
        }
        html.push_str("</div>");
    }
    html
}

pub fn not_indexed_html(subject: Option<&str>) -> String {
    let subject = escape_html(subject.unwrap_or(""));
    format!(
        r#"<div class="preview-title">{NOT_INDEXED_TITLE}</div><p class="preview-note">No educational content has been indexed for this chapter yet.<br/><br/><strong>How to fix:</strong> Click the <strong>⬆ Upload PDF</strong> button (bottom right) and upload your {subject} textbook PDF. Then try selecting this chapter again.</p>"#
    )
}

pub fn failed_html(message: &str) -> String {
    format!(
        r#"<div class="preview-title error">⚠️ Error</div><p class="preview-note">{}</p>"#,
        escape_html(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grade(g: u8) -> Grade {
        Grade::new(g).unwrap()
    }

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn grade_cards_are_staggered() {
        let html = grade_grid([grade(1), grade(2)].into_iter(), 40);
        assert!(html.contains(r#"data-grade="1" style="animation-delay:0ms""#));
        assert!(html.contains(r#"data-grade="2" style="animation-delay:40ms""#));
    }

    #[test]
    fn subject_card_shows_icon_and_count() {
        let subjects = vec![Subject {
            name: "Science".to_string(),
            chapters: vec!["A".to_string(), "B".to_string()],
        }];
        let html = subject_grid(&subjects, 60);
        assert!(html.contains("🔬"));
        assert!(html.contains("2 chapters"));
        assert!(html.contains(r#"data-subject="Science""#));
    }

    #[test]
    fn chapter_names_with_quotes_stay_inert() {
        let html = chapter_items(&["Food: Where Does It Come From?".to_string(), "Tom's <Day>".to_string()]);
        assert!(html.contains(r#"data-idx="1""#));
        assert!(html.contains(r#"<div class="ch-num">2</div>"#));
        assert!(html.contains("Tom&#39;s &lt;Day&gt;"));
    }

    #[test]
    fn ready_sections_in_fixed_order_without_blanks() {
        let response = AdaptResponse {
            simplified: Some("**Plants** make food".to_string()),
            visual_description: Some("   ".to_string()),
            tts_script: Some("Read aloud".to_string()),
            sources: vec!["science6.pdf".to_string()],
        };
        let html = ready_html("Food", &response);
        let simplified = html.find("📝 Simplified").unwrap();
        let tts = html.find("🔊 TTS Script").unwrap();
        assert!(simplified < tts);
        assert!(!html.contains("Visual Description"));
        assert!(html.contains("<strong>Plants</strong>"));
        assert!(html.contains("📄 science6.pdf"));
    }

    #[test]
    fn section_bodies_do_not_reuse_panel_container_class() {
        let response = AdaptResponse {
            simplified: Some("Plants make food".to_string()),
            ..AdaptResponse::default()
        };
        let html = ready_html("Food", &response);
        assert!(html.contains(r#"<div class="preview-body"><p>Plants make food</p>"#));
        assert!(!html.contains("preview-content"));
    }

    #[test]
    fn empty_response_gets_a_note_instead_of_blank_panel() {
        let html = ready_html("Food", &AdaptResponse::default());
        assert!(html.contains(EMPTY_RESPONSE_NOTE));
        assert!(!html.contains("preview-section"));
    }

    #[test]
    fn markdown_does_not_pass_raw_html() {
        let html = markdown_html("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn not_indexed_mentions_subject() {
        let html = preview_html(&PreviewPanel::NotIndexed {
            subject: Some("Science".to_string()),
        })
        .unwrap();
        assert!(html.contains(NOT_INDEXED_TITLE));
        assert!(html.contains("upload your Science textbook PDF"));
    }

    #[test]
    fn loading_lists_expected_sections() {
        let html = loading_html(AdaptedSections {
            simplified: true,
            visual_description: false,
            tts_script: true,
        });
        assert!(html.starts_with(&format!(r#"<div class="preview-title">{LOADING_TITLE}"#)));
        assert!(html.contains("Simplified · TTS Script"));
    }

    #[test]
    fn empty_panel_has_no_content() {
        assert_eq!(preview_html(&PreviewPanel::Empty), None);
    }
}
