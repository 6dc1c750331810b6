use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{DeployError, DeployResult};
use crate::model::DeploymentModel;
use crate::project::{AppEngine, Project};
use crate::sdk::{AppYamlStagingConfig, CloudSdk, StandardStagingConfig};

/// Prepares the staging directory for one deployment model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stager {
    /// Descriptor-based: the SDK's standard staging tool converts the
    /// exploded web application.
    Standard(StandardStagingConfig),
    /// `app.yaml` based: the manifest, Docker context, extra files
    /// and artifact are assembled.
    AppYaml(AppYamlStagingConfig),
    /// The packaging cannot be deployed; staging does nothing.
    Noop,
}

impl Stager {
    /// Build the stager for an already-detected model.
    #[must_use]
    pub fn for_model(model: DeploymentModel, project: &Project, appengine: &AppEngine) -> Self {
        let settings = &appengine.stage;
        let staging_directory = settings.staging_directory(project);
        match model {
            DeploymentModel::DescriptorBased => Self::Standard(StandardStagingConfig {
                source_directory: project.source_directory(),
                staging_directory,
                enable_quickstart: settings.enable_quickstart,
                disable_update_check: settings.disable_update_check,
                enable_jar_splitting: settings.enable_jar_splitting,
                jar_splitting_excludes: settings.jar_splitting_excludes.clone(),
                compile_encoding: settings.compile_encoding.clone(),
                delete_jsps: settings.delete_jsps,
                enable_jar_classes: settings.enable_jar_classes,
                disable_jar_jsps: settings.disable_jar_jsps,
                runtime: settings.runtime.clone(),
            }),
            DeploymentModel::ManifestBased => Self::AppYaml(AppYamlStagingConfig {
                app_engine_directory: settings.app_engine_directory(project),
                docker_directory: settings.docker_directory(project),
                artifact: project.artifact(),
                staging_directory,
                extra_files_directories: settings.extra_files_directories.clone(),
            }),
        }
    }

    #[must_use]
    pub const fn model(&self) -> Option<DeploymentModel> {
        match self {
            Self::Standard(_) => Some(DeploymentModel::DescriptorBased),
            Self::AppYaml(_) => Some(DeploymentModel::ManifestBased),
            Self::Noop => None,
        }
    }

    #[must_use]
    pub fn staging_directory(&self) -> Option<&Path> {
        match self {
            Self::Standard(config) => Some(config.staging_directory.as_path()),
            Self::AppYaml(config) => Some(config.staging_directory.as_path()),
            Self::Noop => None,
        }
    }

    /// Wipe and recreate the staging directory, then hand over to
    /// the SDK's staging primitive for this model.
    pub fn stage(&self, sdk: &dyn CloudSdk) -> DeployResult<()> {
        let Some(staging_directory) = self.staging_directory() else {
            debug!("packaging is not deployable, skipping staging");
            return Ok(());
        };

        info!(dir = %staging_directory.display(), "staging application");
        recreate_dir(staging_directory)?;

        let staged = match self {
            Self::Standard(config) => sdk.stage_standard(config),
            Self::AppYaml(config) => sdk.stage_app_yaml(config),
            Self::Noop => Ok(()),
        };
        staged.map_err(DeployError::staging)
    }
}

/// Select the stager for a project.
///
/// Incompatible packaging gets [`Stager::Noop`]; otherwise the
/// artifact must already exist and the model is detected from the
/// exploded web application.
pub fn create(project: &Project, appengine: &AppEngine) -> DeployResult<Stager> {
    if !project.packaging.is_compatible() {
        info!(packaging = %project.packaging, "packaging is not deployable to App Engine");
        return Ok(Stager::Noop);
    }
    require_artifact(project)?;
    let model = DeploymentModel::detect(&project.source_directory());
    Ok(Stager::for_model(model, project, appengine))
}

pub(crate) fn require_artifact(project: &Project) -> DeployResult<PathBuf> {
    let artifact = project.artifact();
    if artifact.exists() {
        Ok(artifact)
    } else {
        Err(DeployError::ArtifactNotFound(artifact))
    }
}

fn recreate_dir(dir: &Path) -> DeployResult<()> {
    let io_err = |source| DeployError::StagingIo {
        path: dir.to_path_buf(),
        source,
    };
    if dir.exists() {
        debug!(dir = %dir.display(), "removing previous staging directory");
        fs::remove_dir_all(dir).map_err(io_err)?;
    }
    fs::create_dir_all(dir).map_err(io_err)
}
