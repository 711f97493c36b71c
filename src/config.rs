use crate::domain::Environment;
use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Tool settings for app-release.
///
/// Holds the build-tool program, git remote, tag format options, per-platform
/// directories and the per-environment pipeline selection.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub tool: ToolConfig,

    #[serde(default)]
    pub git: GitConfig,

    #[serde(default)]
    pub tag: TagConfig,

    #[serde(default)]
    pub ios: IosConfig,

    #[serde(default)]
    pub android: AndroidConfig,

    #[serde(default)]
    pub environments: HashMap<String, EnvironmentConfig>,
}

fn default_program() -> String {
    "fastlane".to_string()
}

/// External build tool invocation
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ToolConfig {
    #[serde(default = "default_program")]
    pub program: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        ToolConfig {
            program: default_program(),
        }
    }
}

/// Remote used by the push stages. `None` lets the build tool pick its default.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct GitConfig {
    #[serde(default)]
    pub remote: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct TagConfig {
    /// Append `.{build_number}` to the release tag
    #[serde(default)]
    pub include_build_number: bool,
}

/// What happens to the iOS build number during a version bump
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BuildNumberPolicy {
    #[default]
    Keep,
    Increment,
    Reset,
}

fn default_ios_directory() -> String {
    "ios".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IosConfig {
    #[serde(default = "default_ios_directory")]
    pub directory: String,

    #[serde(default)]
    pub build_number: BuildNumberPolicy,
}

impl Default for IosConfig {
    fn default() -> Self {
        IosConfig {
            directory: default_ios_directory(),
            build_number: BuildNumberPolicy::default(),
        }
    }
}

fn default_android_directory() -> String {
    "android".to_string()
}

fn default_gradle_file() -> String {
    "./app/build.gradle".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AndroidConfig {
    #[serde(default = "default_android_directory")]
    pub directory: String,

    /// File staged before the version bump commit, relative to the Android directory
    #[serde(default = "default_gradle_file")]
    pub gradle_file: String,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        AndroidConfig {
            directory: default_android_directory(),
            gradle_file: default_gradle_file(),
        }
    }
}

/// Pipeline variants an environment can select
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PipelineKind {
    /// bump -> commit -> push -> tag -> push tag
    #[default]
    Staging,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct EnvironmentConfig {
    #[serde(default)]
    pub pipeline: PipelineKind,
}

impl Settings {
    /// Pipeline selected for `environment`; staging unless configured otherwise
    pub fn pipeline_for(&self, environment: Environment) -> PipelineKind {
        self.environments
            .get(environment.as_str())
            .map(|env| env.pipeline)
            .unwrap_or_default()
    }

    /// Rejects `[environments.*]` keys that name no known environment
    pub fn validate(&self) -> Result<()> {
        for name in self.environments.keys() {
            name.parse::<Environment>()
                .map_err(|_| ReleaseError::config(format!("unknown environment '{}'", name)))?;
        }
        if self.tool.program.trim().is_empty() {
            return Err(ReleaseError::config("tool.program must not be empty"));
        }
        Ok(())
    }
}

/// Loads settings from file or returns defaults.
///
/// Attempts to load settings in the following order:
/// 1. Custom path provided as parameter
/// 2. `release.toml` in current directory
/// 3. `.release.toml` in user config directory
/// 4. Default settings if no file found
///
/// # Returns
/// * `Ok(Settings)` - Loaded or default settings
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_settings(settings_path: Option<&Path>) -> Result<Settings> {
    let settings_str = if let Some(path) = settings_path {
        fs::read_to_string(path).map_err(|e| {
            ReleaseError::config(format!("cannot read {}: {}", path.display(), e))
        })?
    } else if Path::new("./release.toml").exists() {
        fs::read_to_string("./release.toml")?
    } else if let Some(path) = dirs::config_dir().map(|dir| dir.join(".release.toml")) {
        if path.exists() {
            fs::read_to_string(path)?
        } else {
            return Ok(Settings::default());
        }
    } else {
        return Ok(Settings::default());
    };

    let settings: Settings = toml::from_str(&settings_str)?;
    settings.validate()?;
    Ok(settings)
}
