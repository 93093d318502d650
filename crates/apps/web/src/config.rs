use runtime::UiConfig;
use wasm_bindgen::JsValue;

const BACKEND_URL_GLOBAL: &str = "__eurekaBackendUrl";
const HOVER_DELAY_GLOBAL: &str = "__eurekaHoverDelayMs";

fn window_global(name: &str) -> Option<JsValue> {
    let window = web_sys::window()?;
    let val = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;
    if val.is_undefined() || val.is_null() {
        None
    } else {
        Some(val)
    }
}

fn backend_base_url() -> Option<String> {
    let s = window_global(BACKEND_URL_GLOBAL)?.as_string()?;
    let s = s.trim().to_string();
    if s.is_empty() { None } else { Some(s) }
}

fn hover_delay_ms() -> Option<u32> {
    let ms = window_global(HOVER_DELAY_GLOBAL)?.as_f64()?;
    (ms.is_finite() && ms >= 0.0).then(|| ms.min(f64::from(u32::MAX)) as u32)
}

/// Defaults overridden by whatever page globals are set before the module
/// starts.
pub fn ui_config_from_window() -> UiConfig {
    let mut config = UiConfig::default();
    if let Some(url) = backend_base_url() {
        config = config.with_backend_base_url(url);
    }
    if let Some(ms) = hover_delay_ms() {
        config.hover_delay_ms = ms;
    }
    config
}
