use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no <head>")]
    NoHead,
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
