use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement};

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn by_id(id: &str) -> Result<Element, JsValue> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))
}

pub fn html_by_id(id: &str) -> Result<HtmlElement, JsValue> {
    by_id(id)?.dyn_into::<HtmlElement>().map_err(JsValue::from)
}

pub fn input_by_id(id: &str) -> Result<HtmlInputElement, JsValue> {
    by_id(id)?.dyn_into::<HtmlInputElement>().map_err(JsValue::from)
}

pub fn input_value(id: &str) -> Result<String, JsValue> {
    Ok(input_by_id(id)?.value())
}

pub fn set_text(id: &str, text: &str) -> Result<(), JsValue> {
    by_id(id)?.set_text_content(Some(text));
    Ok(())
}

pub fn set_html(id: &str, html: &str) -> Result<(), JsValue> {
    by_id(id)?.set_inner_html(html);
    Ok(())
}

pub fn toggle_class(el: &Element, class: &str, on: bool) -> Result<(), JsValue> {
    el.class_list().toggle_with_force(class, on)?;
    Ok(())
}

pub fn set_display(id: &str, value: &str) -> Result<(), JsValue> {
    html_by_id(id)?.style().set_property("display", value)
}

pub fn select_all(selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let list = document()?.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<HtmlElement>().ok())
        .collect())
}

/// Nearest ancestor of the event target (inclusive) matching `selector`.
pub fn closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

pub fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}
