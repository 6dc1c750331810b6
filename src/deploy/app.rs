use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use tracing::{debug, info, warn};

use crate::deploy::Deployer;
use crate::deploy::builder::ConfigBuilder;
use crate::error::{DeployError, DeployResult};
use crate::model::{APP_YAML, ConfigFile, DeploymentModel};
use crate::sdk::CloudSdk;
use crate::stage::Stager;

/// Stages with a model-specific [`Stager`] and deploys through the
/// Cloud SDK.
///
/// Project id and version are resolved before staging starts, so a
/// misconfiguration never leaves a half-built staging directory
/// behind.
pub struct AppDeployer {
    stager: Stager,
    staging_directory: PathBuf,
    builder: ConfigBuilder,
    sdk: Box<dyn CloudSdk>,
}

impl AppDeployer {
    /// `None` when `stager` is [`Stager::Noop`], which has nothing to
    /// deploy.
    pub(crate) fn new(
        stager: Stager,
        builder: ConfigBuilder,
        sdk: Box<dyn CloudSdk>,
    ) -> Option<Self> {
        let staging_directory = stager.staging_directory()?.to_path_buf();
        Some(Self {
            stager,
            staging_directory,
            builder,
            sdk,
        })
    }

    #[must_use]
    pub const fn stager(&self) -> &Stager {
        &self.stager
    }

    #[must_use]
    pub const fn builder(&self) -> &ConfigBuilder {
        &self.builder
    }

    /// The single deployable for [`Deployer::deploy`]: the staging
    /// directory, unless an `app.yaml` based project lists its own.
    fn deployables(&self, staging_directory: &Path) -> Vec<PathBuf> {
        let explicit = &self.builder.settings().deployables;
        if explicit.is_empty() {
            return vec![staging_directory.to_path_buf()];
        }
        match self.builder.processor().model() {
            DeploymentModel::ManifestBased => explicit
                .iter()
                .cloned()
                .collect::<IndexSet<_>>()
                .into_iter()
                .collect(),
            DeploymentModel::DescriptorBased => {
                warn!("deployables are ignored for appengine-web.xml based projects");
                vec![staging_directory.to_path_buf()]
            }
        }
    }

    fn deploy_config_file(&self, file: ConfigFile) -> DeployResult<()> {
        let sdk = self.sdk.as_ref();
        let project_id = self.builder.resolve_project_id(sdk)?;
        self.stager.stage(sdk)?;

        let app_engine_directory = self
            .builder
            .processor()
            .process_app_engine_directory(&self.staging_directory);
        info!(
            %file,
            dir = %app_engine_directory.display(),
            project = %project_id,
            "deploying configuration"
        );
        let config = self.builder.project_config(project_id, app_engine_directory);
        sdk.deploy_config(file, &config).map_err(DeployError::deployment)
    }
}

impl Deployer for AppDeployer {
    fn deploy(&self) -> DeployResult<()> {
        let sdk = self.sdk.as_ref();
        let target = self.builder.resolve(sdk)?;
        self.stager.stage(sdk)?;

        let deployables = self.deployables(&self.staging_directory);
        info!(
            project = %target.project_id,
            version = target.version.as_deref().unwrap_or("<generated>"),
            "deploying application"
        );
        let config = self.builder.deploy_config(&target, deployables);
        sdk.deploy(&config).map_err(DeployError::deployment)
    }

    fn deploy_all(&self) -> DeployResult<()> {
        let sdk = self.sdk.as_ref();
        let target = self.builder.resolve(sdk)?;
        self.stager.stage(sdk)?;

        let staging_directory = self.staging_directory.as_path();
        let app_yaml = staging_directory.join(APP_YAML);
        if !app_yaml.exists() {
            return Err(DeployError::MissingAppManifest(
                staging_directory.to_path_buf(),
            ));
        }

        let app_engine_directory = self
            .builder
            .processor()
            .process_app_engine_directory(staging_directory);
        let mut deployables = vec![app_yaml];
        for file in ConfigFile::ALL {
            let path = app_engine_directory.join(file.file_name());
            if path.exists() {
                deployables.push(path);
            } else {
                debug!(%file, "not found, skipping");
            }
        }

        info!(
            project = %target.project_id,
            count = deployables.len(),
            "deploying application and configuration"
        );
        let config = self.builder.deploy_config(&target, deployables);
        sdk.deploy(&config).map_err(DeployError::deployment)
    }

    fn deploy_cron(&self) -> DeployResult<()> {
        self.deploy_config_file(ConfigFile::Cron)
    }

    fn deploy_dispatch(&self) -> DeployResult<()> {
        self.deploy_config_file(ConfigFile::Dispatch)
    }

    fn deploy_dos(&self) -> DeployResult<()> {
        self.deploy_config_file(ConfigFile::Dos)
    }

    fn deploy_index(&self) -> DeployResult<()> {
        self.deploy_config_file(ConfigFile::Index)
    }

    fn deploy_queue(&self) -> DeployResult<()> {
        self.deploy_config_file(ConfigFile::Queue)
    }
}
