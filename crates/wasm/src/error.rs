use folio_core::ConfigError;
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },
    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

impl DomError {
    pub(crate) fn selector(selector: &str, err: &JsValue) -> Self {
        Self::Selector {
            selector: selector.to_string(),
            message: js_message(err),
        }
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn js_message(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{err:?}"))
}
