use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};

use console_error_panic_hook::set_once;
use gloo_events::{EventListener, EventListenerOptions};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{DragEvent, Event, File, HtmlButtonElement, KeyboardEvent};

use foundation::TimeMs;
use runtime::{
    Carousel, CarouselGeometry, Command, ScreenId, Session, ToastKind, UploadOverrides, View,
    fade_in_delay_ms, positions_around,
};

mod api;
mod config;
mod dom;
mod render;

static INITIALIZED: AtomicBool = AtomicBool::new(false);

const PROFILE_BADGES: [&str; 4] = [
    "profile-badge-c",
    "profile-badge-g",
    "profile-badge-s",
    "profile-badge-ch",
];

type Commands = Vec<Command<File>>;

/// Browser binding for the session. Timers and listeners are only held so
/// that dropping or replacing them cancels them.
struct Shell {
    session: Session<File>,
    #[allow(dead_code)]
    toast_timer: Option<Timeout>,
    #[allow(dead_code)]
    hover_timer: Option<Timeout>,
    #[allow(dead_code)]
    reveal_timers: Vec<Timeout>,
    #[allow(dead_code)]
    fade_timers: Vec<Timeout>,
    #[allow(dead_code)]
    listeners: Vec<EventListener>,
}

thread_local! {
    static SHELL: RefCell<Option<Shell>> = const { RefCell::new(None) };
}

fn with_shell<R>(f: impl FnOnce(&mut Shell) -> Result<R, JsValue>) -> Result<R, JsValue> {
    SHELL
        .try_with(|cell| {
            let mut slot = cell
                .try_borrow_mut()
                .map_err(|_| JsValue::from_str("session already borrowed"))?;
            let shell = slot
                .as_mut()
                .ok_or_else(|| JsValue::from_str("session not started"))?;
            f(shell)
        })
        .map_err(|_| JsValue::from_str("session torn down"))?
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn log_err(result: Result<(), JsValue>) {
    if let Err(err) = result {
        web_sys::console::error_1(&err);
    }
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn now() -> TimeMs {
    TimeMs(js_sys::Date::now())
}

/// Run one session handler and carry out the commands it returns.
fn dispatch<H>(handler: H) -> Result<(), JsValue>
where
    H: FnOnce(&mut Session<File>, TimeMs) -> Result<Commands, JsValue>,
{
    let now = now();
    with_shell(|shell| {
        let result = handler(&mut shell.session, now).map(|commands| {
            for command in commands {
                log_err(shell.execute(command));
            }
        });
        shell.flush_events();
        result
    })
}

impl Shell {
    fn new(session: Session<File>) -> Self {
        Self {
            session,
            toast_timer: None,
            hover_timer: None,
            reveal_timers: Vec::new(),
            fade_timers: Vec::new(),
            listeners: Vec::new(),
        }
    }

    fn flush_events(&mut self) {
        for event in self.session.bus_mut().drain() {
            log(&format!("[{} #{}] {}", event.kind, event.seq, event.message));
        }
    }

    fn execute(&mut self, command: Command<File>) -> Result<(), JsValue> {
        match command {
            Command::Render(view) => self.render(view),
            Command::ShowScreen(id) => show_screen(id),
            Command::Adapt {
                token,
                origin,
                request,
            } => {
                let base = self.session.config().backend_base_url.clone();
                spawn_local(async move {
                    let result = api::post_adapt(&base, &request).await;
                    log_err(dispatch(move |s, now| {
                        Ok(s.adapt_finished(token, origin, result, now))
                    }));
                });
                Ok(())
            }
            Command::Ingest(job) => {
                let base = self.session.config().backend_base_url.clone();
                spawn_local(async move {
                    let result = api::post_ingest(&base, &job).await;
                    log_err(dispatch(move |s, now| Ok(s.upload_finished(result, now))));
                });
                Ok(())
            }
            Command::ScheduleToastHide { ticket, after_ms } => {
                // Replacing the slot drops, and so cancels, the earlier timer.
                self.toast_timer = Some(Timeout::new(after_ms, move || {
                    log_err(dispatch(move |s, _| Ok(s.toast_elapsed(ticket))));
                }));
                Ok(())
            }
            Command::ScheduleHover { token, after_ms } => {
                self.hover_timer = Some(Timeout::new(after_ms, move || {
                    log_err(dispatch(move |s, _| Ok(s.carousel_hover_elapsed(token))));
                }));
                Ok(())
            }
            Command::CancelHover => {
                self.hover_timer = None;
                Ok(())
            }
        }
    }

    fn render(&mut self, view: View) -> Result<(), JsValue> {
        let s = &self.session;
        let nav = s.nav();
        match view {
            View::ProfileTheme => {
                let root = dom::document()?
                    .document_element()
                    .ok_or_else(|| JsValue::from_str("no root element"))?;
                match s.theme() {
                    Some(profile) => root.set_attribute("data-profile", profile.as_str())?,
                    None => root.remove_attribute("data-profile")?,
                }
            }
            View::ProfileBadges => {
                let label = nav.profile_label();
                for id in PROFILE_BADGES {
                    if let Ok(el) = dom::by_id(id) {
                        el.set_text_content(Some(label));
                    }
                }
                dom::set_text("crumb-curriculum", &nav.crumb_curriculum())?;
            }
            View::Carousel { animate } => {
                apply_carousel(s.carousel(), &s.config().carousel, animate)?;
            }
            View::GradeGrid => {
                dom::set_text("crumb-grade", &nav.crumb_grade())?;
                let html = render::grade_grid(s.catalog().grades(), s.config().grade_stagger_ms);
                dom::set_html("grade-grid", &html)?;
            }
            View::SubjectGrid => {
                dom::set_text("crumb-subject", &nav.crumb_subject())?;
                let subjects = match nav.grade {
                    Some(grade) => s.catalog().subjects(grade),
                    None => &[],
                };
                let html = render::subject_grid(subjects, s.config().subject_stagger_ms);
                dom::set_html("subject-grid", &html)?;
            }
            View::ChapterList => {
                let chapters = s.chapters();
                dom::set_text("crumb-chapter", &nav.crumb_chapter())?;
                dom::set_text("chapter-subject-title", nav.subject.as_deref().unwrap_or(""))?;
                dom::set_text("chapter-intro", &nav.chapter_intro(chapters.len()))?;
                dom::input_by_id("ask-input")?.set_placeholder(&s.ask().placeholder);
                dom::by_id("upload-fab")?.class_list().add_1("show")?;
                dom::set_html("chapter-items", &render::chapter_items(chapters))?;

                let step = s.config().chapter_reveal_step_ms;
                let timers = dom::select_all("#chapter-items .ch-item")?
                    .into_iter()
                    .enumerate()
                    .map(|(i, item)| {
                        let delay = step.saturating_mul(i as u32);
                        Timeout::new(delay, move || {
                            let _ = item.class_list().add_1("reveal");
                        })
                    })
                    .collect();
                self.reveal_timers = timers;
            }
            View::ChapterHighlight => {
                let selected = s.selected_chapter().map(|i| i.to_string());
                for item in dom::select_all("#chapter-items .ch-item")? {
                    let on = item.get_attribute("data-idx") == selected;
                    dom::toggle_class(&item, "selected", on)?;
                }
            }
            View::Preview => {
                let panel = dom::by_id("preview-panel")?;
                match render::preview_html(s.preview()) {
                    Some(html) => {
                        dom::toggle_class(&panel, "has-content", true)?;
                        dom::set_display("preview-empty", "none")?;
                        dom::set_display("preview-content", "block")?;
                        dom::set_html("preview-content", &html)?;
                    }
                    None => {
                        dom::toggle_class(&panel, "has-content", false)?;
                        dom::set_display("preview-empty", "flex")?;
                        dom::set_display("preview-content", "none")?;
                    }
                }
            }
            View::AskInput => {
                dom::input_by_id("ask-input")?.set_value(&s.ask().value);
            }
            View::AskButton => {
                let btn = dom::by_id("ask-send")?.dyn_into::<HtmlButtonElement>()?;
                btn.set_disabled(s.ask().busy);
                btn.set_text_content(Some(s.ask().button_label()));
            }
            View::UploadPanel => {
                let upload = s.upload();
                dom::toggle_class(&dom::by_id("upload-overlay")?, "open", upload.is_open())?;
                let drop_zone = dom::by_id("drop-zone")?;
                drop_zone.set_text_content(Some(&upload.drop_zone_label()));
                dom::toggle_class(&drop_zone, "got-file", upload.pending().is_some())?;
                let btn = dom::by_id("upload-btn")?.dyn_into::<HtmlButtonElement>()?;
                btn.set_disabled(upload.is_busy());
                btn.set_text_content(Some(if upload.is_busy() {
                    runtime::UPLOAD_BUSY_LABEL
                } else {
                    runtime::UPLOAD_IDLE_LABEL
                }));
                if upload.pending().is_none() {
                    dom::input_by_id("file-input")?.set_value("");
                }
            }
            View::Toast => {
                let el = dom::by_id("toast")?;
                match s.toaster().current() {
                    Some(toast) => {
                        el.set_text_content(Some(&toast.message));
                        let class = format!("toast show {}", toast.kind.css_class());
                        el.set_class_name(class.trim_end());
                    }
                    None => el.class_list().remove_1("show")?,
                }
            }
        }
        Ok(())
    }
}

fn show_screen(id: ScreenId) -> Result<(), JsValue> {
    for screen in dom::select_all(".screen")? {
        dom::toggle_class(&screen, "active", false)?;
    }
    dom::by_id(id.dom_id())?.class_list().add_1("active")?;
    dom::scroll_to_top();
    Ok(())
}

fn apply_carousel(
    carousel: &Carousel,
    geometry: &CarouselGeometry,
    animate: bool,
) -> Result<(), JsValue> {
    let cards = dom::select_all(".d-card")?;
    for (i, (card, t)) in cards.iter().zip(carousel.positions(geometry)).enumerate() {
        let style = card.style();
        style.set_property("z-index", &t.z_index.to_string())?;
        style.set_property("transform", &t.css_transform())?;
        if animate {
            style.set_property("opacity", &t.opacity.to_string())?;
            style.set_property("filter", &t.css_filter())?;
        }
        dom::toggle_class(card, "active", i == carousel.current())?;
    }
    Ok(())
}

/// Lay the cards out around the first one, then fade each in on its own
/// delay.
fn init_carousel(session: &Session<File>) -> Result<Vec<Timeout>, JsValue> {
    let config = session.config();
    if session.carousel().is_empty() {
        return Ok(Vec::new());
    }
    apply_carousel(session.carousel(), &config.carousel, false)?;
    let targets = positions_around(session.carousel().len(), 0, &config.carousel);
    let cards = dom::select_all(".d-card")?;
    Ok(cards
        .into_iter()
        .zip(targets)
        .enumerate()
        .map(|(i, (card, t))| {
            let delay =
                fade_in_delay_ms(i, config.card_fade_in_base_ms, config.card_fade_in_step_ms);
            Timeout::new(delay, move || {
                let style = card.style();
                let _ = style.set_property("opacity", &t.opacity.to_string());
                let _ = style.set_property("filter", &t.css_filter());
            })
        })
        .collect())
}

// ── Event wiring ─────────────────────────────────────────────

fn on_document_click(event: &Event) -> Result<(), JsValue> {
    if let Some(el) = dom::closest(event, "[data-action]") {
        return match el.get_attribute("data-action").as_deref() {
            Some("home") => go_home(),
            Some("open-upload") => open_upload(),
            Some("close-upload") => close_upload(),
            Some("upload") => do_upload(),
            Some("ask") => send_adapt_query(),
            Some("pick-file") => {
                dom::html_by_id("file-input")?.click();
                Ok(())
            }
            _ => Ok(()),
        };
    }
    let target_id = event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .map(|el| el.id());
    if target_id.as_deref() == Some("upload-overlay") {
        return close_upload();
    }
    if let Some(card) = dom::closest(event, ".d-card[data-index]") {
        let index = card
            .get_attribute("data-index")
            .and_then(|i| i.parse::<usize>().ok());
        if let Some(index) = index {
            return dispatch(move |s, _| Ok(s.carousel_click(index)));
        }
    }
    if let Some(el) = dom::closest(event, "[data-curriculum]") {
        let name = el.get_attribute("data-curriculum").unwrap_or_default();
        return select_curriculum(&name);
    }
    if let Some(el) = dom::closest(event, ".grade-card[data-grade]") {
        let grade = el
            .get_attribute("data-grade")
            .and_then(|g| g.parse::<u8>().ok())
            .ok_or_else(|| JsValue::from_str("bad data-grade"))?;
        return select_grade(grade);
    }
    if let Some(el) = dom::closest(event, ".subject-card[data-subject]") {
        let name = el.get_attribute("data-subject").unwrap_or_default();
        return select_subject(&name);
    }
    if let Some(el) = dom::closest(event, ".ch-item[data-idx]") {
        let index = el
            .get_attribute("data-idx")
            .and_then(|i| i.parse::<usize>().ok())
            .ok_or_else(|| JsValue::from_str("bad data-idx"))?;
        return dispatch(move |s, _| s.select_chapter_at(index).map_err(js_err));
    }
    Ok(())
}

fn wire_events() -> Result<Vec<EventListener>, JsValue> {
    let document = dom::document()?;
    let mut listeners = vec![EventListener::new(&document, "click", |event| {
        log_err(on_document_click(event));
    })];

    for (i, card) in dom::select_all(".d-card")?.into_iter().enumerate() {
        card.set_attribute("data-index", &i.to_string())?;
        listeners.push(EventListener::new(&card, "mouseenter", move |_| {
            log_err(dispatch(move |s, _| Ok(s.carousel_hover_enter(i))));
        }));
        listeners.push(EventListener::new(&card, "mouseleave", |_| {
            log_err(dispatch(|s, _| Ok(s.carousel_hover_leave())));
        }));
    }

    let drop_zone = dom::by_id("drop-zone")?;
    {
        let zone = drop_zone.clone();
        listeners.push(EventListener::new_with_options(
            &drop_zone,
            "dragover",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                log_err(dom::toggle_class(&zone, "over", true));
            },
        ));
    }
    {
        let zone = drop_zone.clone();
        listeners.push(EventListener::new(&drop_zone, "dragleave", move |_| {
            log_err(dom::toggle_class(&zone, "over", false));
        }));
    }
    {
        let zone = drop_zone.clone();
        listeners.push(EventListener::new_with_options(
            &drop_zone,
            "drop",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                log_err(dom::toggle_class(&zone, "over", false));
                let file = event
                    .dyn_ref::<DragEvent>()
                    .and_then(|e| e.data_transfer())
                    .and_then(|dt| dt.files())
                    .and_then(|files| files.get(0));
                if let Some(file) = file {
                    let name = file.name();
                    log_err(dispatch(move |s, _| Ok(s.file_dropped(&name, file))));
                }
            },
        ));
    }

    let file_input = dom::input_by_id("file-input")?;
    {
        let input = file_input.clone();
        listeners.push(EventListener::new(&file_input, "change", move |_| {
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                let name = file.name();
                log_err(dispatch(move |s, _| Ok(s.file_picked(&name, file))));
            }
        }));
    }

    let ask_input = dom::by_id("ask-input")?;
    listeners.push(EventListener::new(&ask_input, "keydown", |event| {
        let enter = event
            .dyn_ref::<KeyboardEvent>()
            .is_some_and(|e| e.key() == "Enter");
        if enter {
            log_err(send_adapt_query());
        }
    }));

    Ok(listeners)
}

// ── Entry points ─────────────────────────────────────────────

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Avoid double-initialization (can happen during hot-reload edge cases).
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    set_once();

    let catalog = catalog::ncert().map_err(js_err)?;
    let config = config::ui_config_from_window();
    log(&format!(
        "eureka: {} grades loaded, backend {}",
        catalog.grades().count(),
        if config.backend_base_url.is_empty() {
            "(same origin)"
        } else {
            config.backend_base_url.as_str()
        }
    ));

    let mut shell = Shell::new(Session::new(config, catalog));
    shell.listeners = wire_events()?;
    shell.fade_timers = init_carousel(&shell.session)?;
    SHELL
        .try_with(|cell| *cell.borrow_mut() = Some(shell))
        .map_err(js_err)?;
    Ok(())
}

#[wasm_bindgen]
pub fn go_home() -> Result<(), JsValue> {
    dispatch(|s, _| Ok(s.go_home()))
}

#[wasm_bindgen]
pub fn select_profile(profile: &str) -> Result<(), JsValue> {
    dispatch(|s, _| s.select_profile_named(profile).map_err(js_err))
}

#[wasm_bindgen]
pub fn select_curriculum(curriculum: &str) -> Result<(), JsValue> {
    dispatch(|s, _| s.select_curriculum(curriculum).map_err(js_err))
}

#[wasm_bindgen]
pub fn select_grade(grade: u8) -> Result<(), JsValue> {
    dispatch(|s, _| s.select_grade(grade).map_err(js_err))
}

#[wasm_bindgen]
pub fn select_subject(subject: &str) -> Result<(), JsValue> {
    dispatch(|s, _| Ok(s.select_subject(subject)))
}

#[wasm_bindgen]
pub fn select_chapter(index: usize, name: &str) -> Result<(), JsValue> {
    dispatch(|s, _| Ok(s.select_chapter(index, name)))
}

#[wasm_bindgen]
pub fn fetch_adapted_preview(chapter: &str) -> Result<(), JsValue> {
    dispatch(|s, _| Ok(s.fetch_adapted_preview(chapter)))
}

#[wasm_bindgen]
pub fn send_adapt_query() -> Result<(), JsValue> {
    let input = dom::input_value("ask-input")?;
    dispatch(move |s, now| Ok(s.send_adapt_query(&input, now)))
}

#[wasm_bindgen]
pub fn open_upload() -> Result<(), JsValue> {
    dispatch(|s, _| Ok(s.open_upload()))
}

#[wasm_bindgen]
pub fn close_upload() -> Result<(), JsValue> {
    dispatch(|s, _| Ok(s.close_upload()))
}

#[wasm_bindgen]
pub fn do_upload() -> Result<(), JsValue> {
    let overrides = UploadOverrides {
        grade: dom::input_value("u-grade")?,
        subject: dom::input_value("u-subject")?,
        chapter: dom::input_value("u-chapter")?,
    };
    dispatch(move |s, now| Ok(s.do_upload(&overrides, now)))
}

#[wasm_bindgen]
pub fn toast(message: &str, kind: &str) -> Result<(), JsValue> {
    let kind = ToastKind::parse(kind);
    dispatch(|s, now| Ok(s.toast(message, kind, now)))
}
