//! Owned application context.
//!
//! Handlers mutate the session and return the commands the shell must carry
//! out: which parts of the page to re-render, which screen to show, and which
//! requests and timers to start. Nothing here touches the DOM or the network.

use catalog::{CurriculumCatalog, Curriculum, Grade};
use foundation::{Profile, RequestToken, TimeMs, TokenSequence};
use protocol::{AdaptRequest, AdaptResponse, ApiError, IngestResponse};

use crate::carousel::{CardClick, Carousel};
use crate::config::UiConfig;
use crate::event_bus::EventBus;
use crate::navigation::{NavState, SelectionError};
use crate::preview::{self, AdaptOrigin, Preview, PreviewPanel};
use crate::screen::{ScreenController, ScreenId};
use crate::toast::{ToastKind, ToastTicket, Toaster};
use crate::upload::{IngestJob, UploadError, UploadFlow, UploadOverrides};

pub const ASK_IDLE_LABEL: &str = "Get Adapted Explanation →";
pub const ASK_BUSY_LABEL: &str = "⏳ Thinking…";
pub const UPLOAD_IDLE_LABEL: &str = "⬆ Upload & Index";
pub const UPLOAD_BUSY_LABEL: &str = "⏳ Indexing…";

/// Page regions the shell re-renders from session state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum View {
    /// `data-profile` attribute on the document root.
    ProfileTheme,
    /// Profile badges and the curriculum breadcrumb.
    ProfileBadges,
    Carousel { animate: bool },
    GradeGrid,
    SubjectGrid,
    /// Chapter screen header, intro, ask placeholder and the list itself.
    ChapterList,
    ChapterHighlight,
    Preview,
    AskInput,
    AskButton,
    UploadPanel,
    Toast,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command<F> {
    Render(View),
    /// Activate one screen and scroll to the top.
    ShowScreen(ScreenId),
    Adapt {
        token: RequestToken,
        origin: AdaptOrigin,
        request: AdaptRequest,
    },
    Ingest(IngestJob<F>),
    /// Replace any pending toast hide timer.
    ScheduleToastHide { ticket: ToastTicket, after_ms: u32 },
    /// Replace any pending hover timer.
    ScheduleHover { token: RequestToken, after_ms: u32 },
    CancelHover,
}

/// Free-text ask box under the chapter list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AskBox {
    pub value: String,
    pub placeholder: String,
    pub busy: bool,
}

impl AskBox {
    pub fn button_label(&self) -> &'static str {
        if self.busy { ASK_BUSY_LABEL } else { ASK_IDLE_LABEL }
    }
}

pub struct Session<F> {
    config: UiConfig,
    catalog: &'static CurriculumCatalog,
    nav: NavState,
    /// Profile currently applied to the page theme; cleared by `go_home`.
    theme: Option<Profile>,
    screens: ScreenController,
    carousel: Carousel,
    chapters: &'static [String],
    selected_chapter: Option<usize>,
    preview: Preview,
    ask: AskBox,
    ask_tokens: TokenSequence,
    /// Panel mark taken when the ask in flight was sent.
    ask_mark: Option<RequestToken>,
    upload: UploadFlow<F>,
    toaster: Toaster,
    bus: EventBus,
}

type Commands<F> = Vec<Command<F>>;

impl<F: Clone> Session<F> {
    pub fn new(config: UiConfig, catalog: &'static CurriculumCatalog) -> Self {
        let toaster = Toaster::new(config.toast_duration_ms);
        Self {
            config,
            catalog,
            nav: NavState::default(),
            theme: None,
            screens: ScreenController::new(),
            carousel: Carousel::new(Profile::ALL.len()),
            chapters: &[],
            selected_chapter: None,
            preview: Preview::new(),
            ask: AskBox::default(),
            ask_tokens: TokenSequence::new(),
            ask_mark: None,
            upload: UploadFlow::new(),
            toaster,
            bus: EventBus::new(),
        }
    }

    // ── Accessors for the rendering layer ────────────────────

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn catalog(&self) -> &'static CurriculumCatalog {
        self.catalog
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    pub fn theme(&self) -> Option<Profile> {
        self.theme
    }

    pub fn active_screen(&self) -> ScreenId {
        self.screens.active()
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn chapters(&self) -> &'static [String] {
        self.chapters
    }

    pub fn selected_chapter(&self) -> Option<usize> {
        self.selected_chapter
    }

    pub fn preview(&self) -> &PreviewPanel {
        self.preview.panel()
    }

    pub fn ask(&self) -> &AskBox {
        &self.ask
    }

    pub fn upload(&self) -> &UploadFlow<F> {
        &self.upload
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    // ── Screens ──────────────────────────────────────────────

    fn show(&mut self, id: ScreenId, out: &mut Commands<F>) {
        self.screens.show(id);
        out.push(Command::ShowScreen(id));
    }

    pub fn go_home(&mut self) -> Commands<F> {
        let mut out = Vec::new();
        self.theme = None;
        out.push(Command::Render(View::ProfileTheme));
        self.show(ScreenId::Home, &mut out);
        out
    }

    // ── Carousel ─────────────────────────────────────────────

    pub fn carousel_click(&mut self, index: usize) -> Commands<F> {
        match self.carousel.click(index) {
            CardClick::Select(i) => match Profile::ALL.get(i) {
                Some(profile) => self.select_profile(*profile),
                None => Vec::new(),
            },
            CardClick::Recentered(_) => vec![
                Command::CancelHover,
                Command::Render(View::Carousel { animate: true }),
            ],
            CardClick::Ignored => Vec::new(),
        }
    }

    pub fn carousel_hover_enter(&mut self, index: usize) -> Commands<F> {
        match self.carousel.hover_enter(index) {
            Some(token) => vec![Command::ScheduleHover {
                token,
                after_ms: self.config.hover_delay_ms,
            }],
            None => Vec::new(),
        }
    }

    pub fn carousel_hover_leave(&mut self) -> Commands<F> {
        self.carousel.hover_leave();
        vec![Command::CancelHover]
    }

    pub fn carousel_hover_elapsed(&mut self, token: RequestToken) -> Commands<F> {
        if self.carousel.hover_elapsed(token) {
            vec![Command::Render(View::Carousel { animate: true })]
        } else {
            Vec::new()
        }
    }

    // ── Selection handlers ───────────────────────────────────

    pub fn select_profile(&mut self, profile: Profile) -> Commands<F> {
        let mut out = Vec::new();
        self.nav.profile = Some(profile);
        self.theme = Some(profile);
        self.bus.emit("nav", format!("profile={profile}"));
        out.push(Command::Render(View::ProfileTheme));
        out.push(Command::Render(View::ProfileBadges));
        self.show(ScreenId::Curriculum, &mut out);
        out
    }

    pub fn select_profile_named(&mut self, name: &str) -> Result<Commands<F>, SelectionError> {
        let profile: Profile = name.parse()?;
        Ok(self.select_profile(profile))
    }

    pub fn select_curriculum(&mut self, name: &str) -> Result<Commands<F>, SelectionError> {
        let curriculum: Curriculum = name.parse()?;
        let mut out = Vec::new();
        self.nav.curriculum = curriculum;
        self.nav.curriculum_chosen = true;
        self.bus.emit("nav", format!("curriculum={}", curriculum.as_str()));
        out.push(Command::Render(View::GradeGrid));
        self.show(ScreenId::Grade, &mut out);
        Ok(out)
    }

    pub fn select_grade(&mut self, grade: u8) -> Result<Commands<F>, SelectionError> {
        let grade = Grade::new(grade)?;
        let mut out = Vec::new();
        self.nav.grade = Some(grade);
        self.bus.emit("nav", format!("grade={grade}"));
        out.push(Command::Render(View::SubjectGrid));
        self.show(ScreenId::Subject, &mut out);
        Ok(out)
    }

    /// Unknown `(grade, subject)` pairs give an empty chapter list.
    pub fn select_subject(&mut self, subject: &str) -> Commands<F> {
        let mut out = Vec::new();
        self.nav.subject = Some(subject.to_string());
        self.nav.chapter = None;
        self.chapters = match self.nav.grade {
            Some(g) => self.catalog.chapters(g, subject),
            None => &[],
        };
        self.selected_chapter = None;
        self.ask.placeholder =
            preview::ask_placeholder(self.chapters.first().map(String::as_str));
        self.preview.reset();
        self.bus.emit(
            "nav",
            format!("subject={subject} chapters={}", self.chapters.len()),
        );
        out.push(Command::Render(View::ChapterList));
        out.push(Command::Render(View::Preview));
        self.show(ScreenId::Chapter, &mut out);
        out
    }

    pub fn select_chapter(&mut self, index: usize, name: &str) -> Commands<F> {
        let mut out = Vec::new();
        self.nav.chapter = Some(name.to_string());
        self.selected_chapter = Some(index);
        self.ask.value = preview::ask_prompt(name);
        self.bus.emit("nav", format!("chapter[{index}]={name}"));
        out.push(Command::Render(View::ChapterHighlight));
        out.push(Command::Render(View::AskInput));
        out.extend(self.fetch_adapted_preview(name));
        out
    }

    /// Pick a chapter of the current subject by position.
    pub fn select_chapter_at(&mut self, index: usize) -> Result<Commands<F>, SelectionError> {
        let chapters = self.chapters;
        let name = chapters.get(index).ok_or(SelectionError::ChapterOutOfRange {
            index,
            count: chapters.len(),
        })?;
        Ok(self.select_chapter(index, name))
    }

    // ── Preview fetcher ──────────────────────────────────────

    fn adapt_request(&self, query: String, chapter: Option<&str>) -> AdaptRequest {
        AdaptRequest::new(query)
            .with_profile(self.nav.profile)
            .with_grade(self.nav.grade)
            .with_subject(self.nav.subject.clone())
            .with_chapter(chapter.map(str::to_string))
    }

    pub fn fetch_adapted_preview(&mut self, chapter: &str) -> Commands<F> {
        let sections = self.nav.profile.unwrap_or(Profile::General).adapted_sections();
        let token = self.preview.begin_loading(sections);
        let query = preview::chapter_query(chapter, self.nav.subject.as_deref(), self.nav.grade);
        let request = self.adapt_request(query, Some(chapter));
        self.bus.emit("adapt", format!("request {token} chapter={chapter}"));
        vec![
            Command::Render(View::Preview),
            Command::Adapt {
                token,
                origin: AdaptOrigin::Chapter {
                    chapter: chapter.to_string(),
                },
                request,
            },
        ]
    }

    /// Manual question from the ask box. `input` is the box's current text.
    pub fn send_adapt_query(&mut self, input: &str, now: TimeMs) -> Commands<F> {
        let query = input.trim();
        if self.ask.busy {
            return Vec::new();
        }
        if query.is_empty() {
            return self.toast("Please type a question first", ToastKind::Err, now);
        }
        self.ask.value = query.to_string();
        self.ask.busy = true;
        let token = self.ask_tokens.issue();
        self.ask_mark = self.preview.mark();
        let request = self.adapt_request(query.to_string(), self.nav.chapter.as_deref());
        self.bus.emit("adapt", format!("ask {token} query={query}"));
        vec![
            Command::Render(View::AskButton),
            Command::Adapt {
                token,
                origin: AdaptOrigin::Ask {
                    query: query.to_string(),
                },
                request,
            },
        ]
    }

    /// An adapt round trip finished. Chapter responses for superseded tokens
    /// are dropped. Ask answers replace the panel unless a chapter was picked
    /// or the panel reset after the ask was sent; ask failures always toast.
    pub fn adapt_finished(
        &mut self,
        token: RequestToken,
        origin: AdaptOrigin,
        result: Result<AdaptResponse, ApiError>,
        now: TimeMs,
    ) -> Commands<F> {
        if let Err(err) = &result {
            let title = origin.title();
            self.bus.emit("adapt", format!("response {token} for \"{title}\" failed: {err}"));
        }
        match origin {
            AdaptOrigin::Chapter { chapter } => {
                if !self.preview.is_current(token) {
                    self.bus.emit("adapt", format!("stale response {token} discarded"));
                    return Vec::new();
                }
                let panel = preview::chapter_outcome(&chapter, self.nav.subject.as_deref(), result);
                self.preview.show(panel);
                vec![Command::Render(View::Preview)]
            }
            AdaptOrigin::Ask { query } => {
                self.ask.busy = false;
                let mark = self.ask_mark.take();
                let mut out = vec![Command::Render(View::AskButton)];
                match result {
                    Ok(response) => {
                        let panel = PreviewPanel::Ready {
                            title: query,
                            response,
                        };
                        if self.ask_tokens.is_latest(token) && self.preview.take_over(mark, panel) {
                            out.push(Command::Render(View::Preview));
                        } else {
                            self.bus.emit("adapt", format!("ask {token} superseded"));
                        }
                    }
                    Err(err) => out.extend(self.toast(err.to_string(), ToastKind::Err, now)),
                }
                out
            }
        }
    }

    // ── Upload flow ──────────────────────────────────────────

    pub fn open_upload(&mut self) -> Commands<F> {
        self.upload.open();
        vec![Command::Render(View::UploadPanel)]
    }

    pub fn close_upload(&mut self) -> Commands<F> {
        self.upload.close();
        vec![Command::Render(View::UploadPanel)]
    }

    pub fn file_dropped(&mut self, name: &str, file: F) -> Commands<F> {
        if self.upload.offer_dropped(name, file) {
            vec![Command::Render(View::UploadPanel)]
        } else {
            self.bus.emit("upload", format!("ignored non-PDF drop: {name}"));
            Vec::new()
        }
    }

    pub fn file_picked(&mut self, name: &str, file: F) -> Commands<F> {
        self.upload.pick(name, file);
        vec![Command::Render(View::UploadPanel)]
    }

    pub fn do_upload(&mut self, overrides: &UploadOverrides, now: TimeMs) -> Commands<F> {
        match self.upload.begin(overrides, &self.nav) {
            Ok(job) => {
                self.bus.emit("upload", format!("ingest {}", job.file_name));
                vec![Command::Render(View::UploadPanel), Command::Ingest(job)]
            }
            Err(UploadError::Busy) => Vec::new(),
            Err(err @ UploadError::NoFile) => self.toast(err.to_string(), ToastKind::Err, now),
        }
    }

    /// Successful ingest refreshes the open chapter so new content shows up
    /// without another click.
    pub fn upload_finished(
        &mut self,
        result: Result<IngestResponse, ApiError>,
        now: TimeMs,
    ) -> Commands<F> {
        let mut out = Vec::new();
        match result {
            Ok(resp) => {
                self.upload.succeeded();
                self.bus.emit(
                    "upload",
                    format!("{} indexed ({} chunks)", resp.filename, resp.chunks_indexed),
                );
                out.extend(self.toast(
                    format!("✅ {} indexed ({} chunks)", resp.filename, resp.chunks_indexed),
                    ToastKind::Ok,
                    now,
                ));
                out.push(Command::Render(View::UploadPanel));
                if let Some(chapter) = self.nav.chapter.clone() {
                    out.extend(self.fetch_adapted_preview(&chapter));
                }
            }
            Err(err) => {
                self.upload.failed();
                self.bus.emit("upload", format!("failed: {err}"));
                out.extend(self.toast(format!("Upload failed: {err}"), ToastKind::Err, now));
                out.push(Command::Render(View::UploadPanel));
            }
        }
        out
    }

    // ── Toast ────────────────────────────────────────────────

    pub fn toast(&mut self, message: impl Into<String>, kind: ToastKind, now: TimeMs) -> Commands<F> {
        let ticket = self.toaster.show(message, kind, now);
        vec![
            Command::Render(View::Toast),
            Command::ScheduleToastHide {
                ticket,
                after_ms: self.toaster.duration_ms(),
            },
        ]
    }

    pub fn toast_elapsed(&mut self, ticket: ToastTicket) -> Commands<F> {
        if self.toaster.expire(ticket) {
            vec![Command::Render(View::Toast)]
        } else {
            Vec::new()
        }
    }
}
