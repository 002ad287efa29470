/// Error types for Color Proven
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The request was rejected or came back with a non-success status
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// The response body was not the shape we expected
    #[error("unexpected response from {url}: {message}")]
    Parse { url: String, message: String },

    /// A page element had no label text where one was expected
    #[error("element has no label text")]
    MissingLabel,

    /// Something the host page should provide is missing or refused the call
    #[error("host page: {0}")]
    Host(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Wrap a JS exception coming out of a web-sys call
    pub fn host(context: &str, value: wasm_bindgen::JsValue) -> Error {
        Error::Host(format!("{}: {:?}", context, value))
    }
}
