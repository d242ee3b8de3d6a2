mod carousel;
mod dom;
mod error;
mod host;
mod logging;
mod page;

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::config::PageConfig;
use gloo::events::EventListener;
use wasm_bindgen::prelude::*;

pub use error::DomError;

use crate::host::Page;

thread_local! {
    static MOUNTED: RefCell<Option<Rc<Page>>> = const { RefCell::new(None) };
}

/// Module entry point: mount with the default configuration once the
/// document has been parsed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = dom::window().map_err(|e| JsError::new(&e.to_string()))?;
    let document = dom::document(&window).map_err(|e| JsError::new(&e.to_string()))?;
    if !defer_until_parsed(&document.ready_state()) {
        return mount(None).map_err(JsValue::from);
    }
    EventListener::once(&document, "DOMContentLoaded", |_| {
        if let Err(err) = mount(None) {
            web_sys::console::error_1(&JsValue::from(err));
        }
    })
    .forget();
    Ok(())
}

/// Elements are only queryable after parsing; a module loaded from `<head>`
/// starts while the document is still `loading`.
fn defer_until_parsed(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Bind every page behaviour. `config_json` overrides any subset of the
/// default configuration. Mounting again replaces the previous bindings.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<(), JsError> {
    mount_page(config_json.as_deref()).map_err(|e| JsError::new(&e.to_string()))
}

/// Remove every listener and observer installed by [`mount`].
#[wasm_bindgen]
pub fn unmount() {
    if let Some(page) = MOUNTED.with(|m| m.borrow_mut().take()) {
        page.teardown();
        tracing::debug!("page unmounted");
    }
}

/// The default configuration as pretty-printed JSON, for page authors.
#[wasm_bindgen]
pub fn default_config_json() -> Result<String, JsError> {
    serde_json::to_string_pretty(&PageConfig::default()).map_err(|e| JsError::new(&e.to_string()))
}

fn mount_page(config_json: Option<&str>) -> Result<(), DomError> {
    let config = match config_json {
        Some(json) => PageConfig::from_json(json)?,
        None => PageConfig::default(),
    };
    logging::init(config.log_filter()?);

    let window = dom::window()?;
    let document = dom::document(&window)?;

    unmount();
    let page = Page::bind(config, window, document)?;
    if let Err(err) = install(&page) {
        page.teardown();
        return Err(err);
    }

    tracing::info!("folio mounted");
    MOUNTED.with(|m| *m.borrow_mut() = Some(page));
    Ok(())
}

fn install(page: &Rc<Page>) -> Result<(), DomError> {
    carousel::install(page);
    page::install_anchors(page)?;
    page::install_overlay(page)?;
    page::install_reveal(page);
    page::install_timeline(page)?;
    page::install_parallax(page);
    page::install_email(page);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_waits_only_while_loading() {
        assert!(defer_until_parsed("loading"));
        assert!(!defer_until_parsed("interactive"));
        assert!(!defer_until_parsed("complete"));
    }
}
