use folio_protocol::{Rect, ScrollBehavior};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, ScrollIntoViewOptions, ScrollLogicalPosition,
    ScrollToOptions, Window,
};

use crate::error::{DomError, js_message};

pub(crate) fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoWindow)
}

pub(crate) fn document(window: &Window) -> Result<Document, DomError> {
    window.document().ok_or(DomError::NoDocument)
}

/// All elements matching `selector`, in document order.
pub(crate) fn query_all(root: &Document, selector: &str) -> Result<Vec<Element>, DomError> {
    let list = root
        .query_selector_all(selector)
        .map_err(|e| DomError::selector(selector, &e))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// First element matching `selector`; `None` when absent.
pub(crate) fn query(root: &Document, selector: &str) -> Result<Option<Element>, DomError> {
    root.query_selector(selector)
        .map_err(|e| DomError::selector(selector, &e))
}

pub(crate) fn rect_of(element: &Element) -> Rect {
    let r = element.get_bounding_client_rect();
    Rect::new(r.x(), r.y(), r.width(), r.height())
}

/// Whether the event started on an element matching `selector` that lives
/// inside `container` (the container itself does not count).
pub(crate) fn from_descendant(event: &Event, container: &Element, selector: &str) -> bool {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return false;
    };
    match target.closest(selector) {
        Ok(Some(hit)) => hit != *container && container.contains(Some(&*hit)),
        _ => false,
    }
}

/// Position among `items` of the nearest ancestor of the event target that
/// matches `selector`.
pub(crate) fn enclosing_index(event: &Event, selector: &str, items: &[Element]) -> Option<usize> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let hit = target.closest(selector).ok()??;
    items.iter().position(|item| *item == hit)
}

pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
    if element.class_list().toggle_with_force(class, on).is_err() {
        tracing::debug!(class, "class toggle rejected");
    }
}

fn web_behavior(behavior: ScrollBehavior) -> web_sys::ScrollBehavior {
    match behavior {
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
    }
}

/// Scroll `element`'s own content horizontally.
pub(crate) fn scroll_left_to(element: &Element, offset: f64, behavior: ScrollBehavior) {
    let options = ScrollToOptions::new();
    options.set_left(offset);
    options.set_behavior(web_behavior(behavior));
    element.scroll_to_with_scroll_to_options(&options);
}

/// Bring `element` into view within its scroll containers.
pub(crate) fn scroll_into_view(
    element: &Element,
    behavior: ScrollBehavior,
    block: ScrollLogicalPosition,
    inline: ScrollLogicalPosition,
) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(web_behavior(behavior));
    options.set_block(block);
    options.set_inline(inline);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

pub(crate) fn set_attr(element: &Element, name: &str, value: &str) {
    if let Err(err) = element.set_attribute(name, value) {
        tracing::debug!(name, error = %js_message(&err), "attribute rejected");
    }
}

pub(crate) fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(err) = element.style().set_property(property, value) {
        tracing::debug!(property, error = %js_message(&err), "style property rejected");
    }
}

pub(crate) fn focus(element: &Element) {
    if let Some(el) = element.dyn_ref::<HtmlElement>()
        && el.focus().is_err()
    {
        tracing::debug!("focus rejected");
    }
}

pub(crate) fn viewport_rect(window: &Window) -> Rect {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Rect::new(0.0, 0.0, dim(window.inner_width()), dim(window.inner_height()))
}
