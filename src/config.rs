/// Runtime configuration, overridable from the userscript loader
use serde::{Deserialize, Serialize};
use url::Url;
use wasm_bindgen::JsValue;

use crate::error::{Error, Result};
use crate::painter::Palette;
use crate::refresh::RefreshSettings;

/// Version baked in at build time
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Base of the classification API; `get-elements` is appended
    pub api_base_url: String,
    /// Published userscript metadata (JSON)
    pub meta_url: String,
    pub palette: Palette,
    pub refresh: RefreshSettings,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: "https://icbe.rman.dev/api".to_string(),
            meta_url: "https://userscripts.rman.dev/infinite-craft/color-proven/meta.json".to_string(),
            palette: Palette::default(),
            refresh: RefreshSettings::default(),
        }
    }
}

impl Config {
    /// Read options passed from JS; `undefined` or `null` gives the defaults
    pub fn from_js(options: JsValue) -> Result<Config> {
        let config = if options.is_undefined() || options.is_null() {
            Config::default()
        } else {
            serde_wasm_bindgen::from_value(options).map_err(|e| Error::Config(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.api_base()?;
        Url::parse(&self.meta_url).map_err(|e| Error::Config(format!("metaUrl {:?}: {}", self.meta_url, e)))?;
        if self.refresh.busy_frames.is_empty() {
            return Err(Error::Config("refresh.busyFrames must not be empty".to_string()));
        }
        if self.refresh.frame_interval_ms == 0 {
            return Err(Error::Config("refresh.frameIntervalMs must be positive".to_string()));
        }
        Ok(())
    }

    pub fn api_base(&self) -> Result<Url> {
        Url::parse(&self.api_base_url)
            .map_err(|e| Error::Config(format!("apiBaseUrl {:?}: {}", self.api_base_url, e)))
    }
}
