use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{DeployError, DeployResult};
use crate::model::{DeploymentModel, GENERATED_CONFIG_DIR};
use crate::reader::ConfigReader;
use crate::sdk::CloudSdk;
use crate::value::{APPENGINE_CONFIG, ConfigValue, GCLOUD_CONFIG};

/// Resolves raw project id and version settings to final values,
/// and locates the auxiliary configuration directory, according to
/// the deployment model.
#[derive(Debug, Clone)]
pub struct ConfigProcessor {
    model: DeploymentModel,
    reader: ConfigReader,
    descriptor: PathBuf,
    app_engine_directory: PathBuf,
}

impl ConfigProcessor {
    /// Build a processor for `model`.
    ///
    /// `descriptor` is only read under the descriptor model and
    /// `app_engine_directory` is only used under the manifest model.
    #[must_use]
    pub const fn new(
        model: DeploymentModel,
        descriptor: PathBuf,
        app_engine_directory: PathBuf,
    ) -> Self {
        Self {
            model,
            reader: ConfigReader::new(),
            descriptor,
            app_engine_directory,
        }
    }

    #[must_use]
    pub fn descriptor_based(descriptor: impl Into<PathBuf>) -> Self {
        Self::new(
            DeploymentModel::DescriptorBased,
            descriptor.into(),
            PathBuf::new(),
        )
    }

    #[must_use]
    pub fn manifest_based(app_engine_directory: impl Into<PathBuf>) -> Self {
        Self::new(
            DeploymentModel::ManifestBased,
            PathBuf::new(),
            app_engine_directory.into(),
        )
    }

    #[must_use]
    pub const fn model(&self) -> DeploymentModel {
        self.model
    }

    pub fn process_project_id(
        &self,
        raw: &ConfigValue,
        sdk: &dyn CloudSdk,
    ) -> DeployResult<String> {
        let project = match raw {
            ConfigValue::Unset => return Err(self.missing(Setting::ProjectId)),
            ConfigValue::Literal(value) => value.clone(),
            ConfigValue::Gcloud => self.reader.project_id_from_sdk(sdk)?,
            ConfigValue::Descriptor => match self.model {
                DeploymentModel::DescriptorBased => {
                    self.reader.project_id_from_descriptor(&self.descriptor)?
                }
                DeploymentModel::ManifestBased => {
                    return Err(self.missing(Setting::ProjectId));
                }
            },
        };
        debug!(%raw, %project, "resolved project id");
        Ok(project)
    }

    /// `None` means the SDK generates the version at deploy time.
    pub fn process_version(&self, raw: &ConfigValue) -> DeployResult<Option<String>> {
        let version = match raw {
            ConfigValue::Unset => return Err(self.missing(Setting::Version)),
            ConfigValue::Literal(value) => Some(value.clone()),
            ConfigValue::Gcloud => None,
            ConfigValue::Descriptor => match self.model {
                DeploymentModel::DescriptorBased => {
                    Some(self.reader.version_from_descriptor(&self.descriptor)?)
                }
                DeploymentModel::ManifestBased => {
                    return Err(self.missing(Setting::Version));
                }
            },
        };
        debug!(%raw, ?version, "resolved version");
        Ok(version)
    }

    /// Directory holding `cron.yaml`, `dispatch.yaml` and friends.
    ///
    /// Under the descriptor model it is generated inside the staging
    /// directory; under the manifest model it is the configured (or
    /// default) source directory.
    #[must_use]
    pub fn process_app_engine_directory(&self, staging_directory: &Path) -> PathBuf {
        match self.model {
            DeploymentModel::DescriptorBased => staging_directory.join(GENERATED_CONFIG_DIR),
            DeploymentModel::ManifestBased => self.app_engine_directory.clone(),
        }
    }

    fn missing(&self, setting: Setting) -> DeployError {
        let (name, sample, gcloud, descriptor) = match setting {
            Setting::ProjectId => (
                "project_id",
                "my-project-id",
                "to use the project from gcloud config",
                "to use <application> from appengine-web.xml",
            ),
            Setting::Version => (
                "version",
                "my-version",
                "to have gcloud generate a version",
                "to use <version> from appengine-web.xml",
            ),
        };
        let flag = name.replace('_', "-");
        let third = match self.model {
            DeploymentModel::DescriptorBased => {
                format!("Set {name}(\"{APPENGINE_CONFIG}\") {descriptor}")
            }
            DeploymentModel::ManifestBased => {
                format!("{APPENGINE_CONFIG} is not allowed for app.yaml based projects")
            }
        };
        DeployError::MissingConfiguration {
            setting: name.to_string(),
            options: format!(
                "1. Set {name}(\"{sample}\") or pass --{flag} {sample}\n\
                 2. Set {name}(\"{GCLOUD_CONFIG}\") {gcloud}\n\
                 3. {third}"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Setting {
    ProjectId,
    Version,
}
