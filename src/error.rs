use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("2d drawing surface unavailable")]
    SurfaceUnavailable,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("js error: {0}")]
    Js(String),
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<wasm_bindgen::JsValue> for EngineError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        EngineError::Js(format!("{value:?}"))
    }
}

impl From<EngineError> for wasm_bindgen::JsValue {
    fn from(err: EngineError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
