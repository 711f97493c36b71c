//! App registry: the per-user JSON file mapping app names to project
//! locations and Xcode identifiers.
//!
//! ```json
//! {
//!   "shop": {
//!     "project_path": "/Users/me/code/shop",
//!     "xcodeproj": "Shop.xcodeproj",
//!     "target": "Shop"
//!   }
//! }
//! ```

use crate::error::{ReleaseError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the registry inside the home directory
pub const REGISTRY_FILE_NAME: &str = ".projects.config.json";

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct RegistryEntry {
    project_path: PathBuf,
    #[serde(default)]
    xcodeproj: Option<String>,
    #[serde(default)]
    target: Option<String>,
}

/// One registered application
#[derive(Debug, Clone, PartialEq)]
pub struct AppProfile {
    pub app_name: String,
    pub project_path: PathBuf,
    /// Xcode project descriptor, e.g. `Shop.xcodeproj`
    pub xcodeproj: Option<String>,
    /// Xcode build target
    pub target: Option<String>,
}

/// Read-only map of app name to [AppProfile]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppRegistry {
    apps: BTreeMap<String, AppProfile>,
}

impl AppRegistry {
    /// `~/.projects.config.json`
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(REGISTRY_FILE_NAME))
            .ok_or_else(|| ReleaseError::config("cannot determine home directory"))
    }

    /// Load the registry from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ReleaseError::config(format!(
                "cannot read app registry {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let entries: BTreeMap<String, RegistryEntry> = serde_json::from_str(content)?;
        let apps = entries
            .into_iter()
            .map(|(name, entry)| {
                let profile = AppProfile {
                    app_name: name.clone(),
                    project_path: entry.project_path,
                    xcodeproj: entry.xcodeproj,
                    target: entry.target,
                };
                (name, profile)
            })
            .collect();
        Ok(AppRegistry { apps })
    }

    /// Look up an app, failing with a validation error that lists the known apps
    pub fn get(&self, app_name: &str) -> Result<&AppProfile> {
        self.apps.get(app_name).ok_or_else(|| {
            ReleaseError::validation(format!(
                "App Name: {} not found. Available apps are: [{}]",
                app_name,
                self.names().join(", ")
            ))
        })
    }

    /// Registered app names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.apps.keys().map(|k| k.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}
