pub mod gcloud;

use std::path::PathBuf;

use crate::error::DeployResult;
use crate::model::ConfigFile;

/// Inputs for staging a descriptor-based application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandardStagingConfig {
    pub source_directory: PathBuf,
    pub staging_directory: PathBuf,
    pub enable_quickstart: bool,
    pub disable_update_check: bool,
    pub enable_jar_splitting: bool,
    pub jar_splitting_excludes: Vec<String>,
    pub compile_encoding: Option<String>,
    pub delete_jsps: bool,
    pub enable_jar_classes: bool,
    pub disable_jar_jsps: bool,
    pub runtime: Option<String>,
}

/// Inputs for staging an `app.yaml` based application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppYamlStagingConfig {
    pub app_engine_directory: PathBuf,
    pub docker_directory: PathBuf,
    pub artifact: PathBuf,
    pub staging_directory: PathBuf,
    pub extra_files_directories: Vec<PathBuf>,
}

/// A fully resolved `app deploy` request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployConfig {
    pub deployables: Vec<PathBuf>,
    pub project_id: String,
    /// `None` lets the SDK generate a version.
    pub version: Option<String>,
    pub bucket: Option<String>,
    pub image_url: Option<String>,
    pub promote: Option<bool>,
    pub server: Option<String>,
    pub stop_previous_version: Option<bool>,
}

/// Target of a single auxiliary configuration deploy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployProjectConfig {
    pub app_engine_directory: PathBuf,
    pub project_id: String,
    pub server: Option<String>,
}

/// The external Cloud SDK that performs staging and deployment.
pub trait CloudSdk {
    /// Check that the SDK is installed and usable.
    fn check_prerequisites(&self) -> DeployResult<()> {
        Ok(())
    }

    /// The project id from the SDK's active configuration, if one
    /// is set.
    fn project_from_config(&self) -> DeployResult<Option<String>>;

    /// Stage a descriptor-based application.
    fn stage_standard(&self, config: &StandardStagingConfig) -> DeployResult<()>;

    /// Stage an `app.yaml` based application.
    fn stage_app_yaml(&self, config: &AppYamlStagingConfig) -> DeployResult<()>;

    /// Deploy the given deployables.
    fn deploy(&self, config: &DeployConfig) -> DeployResult<()>;

    /// Deploy one auxiliary configuration file. The file is looked
    /// up by its fixed name inside `config.app_engine_directory`.
    fn deploy_config(&self, file: ConfigFile, config: &DeployProjectConfig) -> DeployResult<()>;
}
