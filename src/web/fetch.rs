/// `fetch`-based implementation of the data loader
use log::debug;
use url::Url;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::loader::{elements_url, parse_elements, parse_latest_version, DataLoader, ElementsData, LoadReason};

pub struct FetchLoader {
    api_base: Url,
    meta_url: String,
}

impl FetchLoader {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(FetchLoader {
            api_base: config.api_base()?,
            meta_url: config.meta_url.clone(),
        })
    }
}

fn network(url: &str, value: JsValue) -> Error {
    Error::Network {
        url: url.to_string(),
        message: format!("{:?}", value),
    }
}

/// GET `url` and return the body; non-2xx is a network failure
async fn fetch_text(url: &str) -> Result<String> {
    let window = web_sys::window().ok_or_else(|| Error::Host("no window".to_string()))?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| network(url, e))?;
    let response: Response = response.dyn_into().map_err(|e| network(url, e))?;

    if !response.ok() {
        return Err(Error::Network {
            url: url.to_string(),
            message: format!("HTTP {}", response.status()),
        });
    }

    let text = response.text().map_err(|e| network(url, e))?;
    let body = JsFuture::from(text).await.map_err(|e| network(url, e))?;
    body.as_string().ok_or_else(|| Error::Parse {
        url: url.to_string(),
        message: "body is not text".to_string(),
    })
}

impl DataLoader for FetchLoader {
    async fn load_classification_data(&self, reason: LoadReason) -> Result<ElementsData> {
        let url = elements_url(&self.api_base, reason)?;
        let body = fetch_text(url.as_str()).await?;
        let data = parse_elements(url.as_str(), &body)?;
        debug!(
            "Fetched {} proven / {} disproven ({})",
            data.proven.len(),
            data.disproven.len(),
            reason
        );
        Ok(data)
    }

    async fn fetch_latest_version(&self) -> Result<String> {
        let body = fetch_text(&self.meta_url).await?;
        parse_latest_version(&self.meta_url, &body)
    }
}
