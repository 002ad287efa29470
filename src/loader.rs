/// Remote data: classification lists and userscript metadata
use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Why the classification data is being requested (sent to the server)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadReason {
    Load,
    Update,
}

impl LoadReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadReason::Load => "load",
            LoadReason::Update => "update",
        }
    }
}

impl fmt::Display for LoadReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `GET {base}/get-elements`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementsData {
    pub proven: Vec<String>,
    pub disproven: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserscriptMetaHeaders {
    pub name: String,
    #[serde(rename = "match")]
    pub match_pattern: String,
    pub version: String,
    pub description: String,
}

/// Body of the published userscript metadata file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserscriptMeta {
    pub headers: UserscriptMetaHeaders,
}

/// Network boundary. One request per call, no retry.
#[allow(async_fn_in_trait)]
pub trait DataLoader {
    async fn load_classification_data(&self, reason: LoadReason) -> Result<ElementsData>;

    async fn fetch_latest_version(&self) -> Result<String>;
}

/// Build `{base}/get-elements?why=<reason>`
pub fn elements_url(base: &Url, reason: LoadReason) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let mut url = base
        .join("get-elements")
        .map_err(|e| Error::Config(format!("cannot build elements URL from {}: {}", base, e)))?;
    url.query_pairs_mut().append_pair("why", reason.as_str());
    Ok(url)
}

pub fn parse_elements(url: &str, body: &str) -> Result<ElementsData> {
    serde_json::from_str(body).map_err(|e| Error::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Only `headers.version` is used
pub fn parse_latest_version(url: &str, body: &str) -> Result<String> {
    let meta: UserscriptMeta = serde_json::from_str(body).map_err(|e| Error::Parse {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    Ok(meta.headers.version)
}
