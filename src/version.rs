/// Startup advisory check against the latest published version
use log::{info, warn};

use crate::error::Result;
use crate::loader::DataLoader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub current: String,
    pub latest: String,
}

impl VersionInfo {
    /// Any difference counts, we do not try to order versions
    pub fn is_outdated(&self) -> bool {
        self.current != self.latest
    }

    /// Lines shown in the advisory toast
    pub fn advisory_lines(&self) -> Vec<String> {
        vec![
            "You are using an outdated version of the color-proven userscript.\n".to_string(),
            "Please update to the latest version.\n".to_string(),
            format!("Current version: {}", self.current),
            format!("Latest version: {}\n", self.latest),
        ]
    }
}

/// Fetch the latest version once. `Ok(None)` means up to date.
pub async fn check_version<L: DataLoader>(loader: &L, current: &str) -> Result<Option<VersionInfo>> {
    let latest = loader.fetch_latest_version().await?;
    let info = VersionInfo {
        current: current.to_string(),
        latest,
    };
    info!("Userscript version: current {}, latest {}", info.current, info.latest);

    if info.is_outdated() {
        Ok(Some(info))
    } else {
        info!("Userscript is up to date");
        Ok(None)
    }
}

/// Check once and hand the advisory to `notify` when outdated.
///
/// Fetch and display failures are logged here and never reach the caller.
pub async fn advise<L, F>(loader: &L, current: &str, notify: F)
where
    L: DataLoader,
    F: FnOnce(Vec<String>) -> Result<()>,
{
    match check_version(loader, current).await {
        Ok(Some(info)) => {
            if let Err(e) = notify(info.advisory_lines()) {
                warn!("Could not show update notice: {}", e);
            }
        }
        Ok(None) => {}
        Err(e) => warn!("Version check failed: {}", e),
    }
}
