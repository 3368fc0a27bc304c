use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::allowlist::origin::Origin;
use crate::allowlist::AllowList;
use crate::error::WlResult;

/// Bridge settings as read from the YAML configuration file: a global list of
/// allowed origins plus per-application overrides.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub allowed_origins: Vec<Origin>,
    #[serde(default)]
    pub applications: BTreeMap<String, AppConfig>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub allowed_origins: Vec<Origin>,
}

impl BridgeConfig {
    pub fn from_yaml(content: &str) -> WlResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> WlResult<Self> {
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }

    /// Builds the effective allow list for one application: the global
    /// origins plus the application's own. Unknown application names fall
    /// back to the global origins alone. An invalid configured address fails
    /// the whole build, so misconfiguration surfaces at load time.
    pub fn allow_list_for(&self, application: &str) -> WlResult<AllowList> {
        let mut origins = self.allowed_origins.clone();
        if let Some(app) = self.applications.get(application) {
            origins.extend(app.allowed_origins.iter().cloned());
        } else {
            tracing::debug!(application, "no application-specific origins configured");
        }

        let allow_list = AllowList::new();
        allow_list.populate(&origins)?;
        Ok(allow_list)
    }
}
