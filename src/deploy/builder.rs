use std::path::PathBuf;

use crate::error::DeployResult;
use crate::processor::ConfigProcessor;
use crate::project::DeploySettings;
use crate::sdk::{CloudSdk, DeployConfig, DeployProjectConfig};

/// Project id and version after resolution. Produced once per
/// operation, before anything is staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub project_id: String,
    pub version: Option<String>,
}

/// Turns raw deploy settings into the SDK's deploy requests.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    settings: DeploySettings,
    processor: ConfigProcessor,
}

impl ConfigBuilder {
    #[must_use]
    pub const fn new(settings: DeploySettings, processor: ConfigProcessor) -> Self {
        Self {
            settings,
            processor,
        }
    }

    #[must_use]
    pub const fn processor(&self) -> &ConfigProcessor {
        &self.processor
    }

    #[must_use]
    pub const fn settings(&self) -> &DeploySettings {
        &self.settings
    }

    /// Resolve both project id and version.
    pub fn resolve(&self, sdk: &dyn CloudSdk) -> DeployResult<ResolvedTarget> {
        let project_id = self.processor.process_project_id(&self.settings.project_id, sdk)?;
        let version = self.processor.process_version(&self.settings.version)?;
        Ok(ResolvedTarget {
            project_id,
            version,
        })
    }

    /// Resolve only the project id, which is all a single
    /// configuration file deploy needs.
    pub fn resolve_project_id(&self, sdk: &dyn CloudSdk) -> DeployResult<String> {
        self.processor.process_project_id(&self.settings.project_id, sdk)
    }

    #[must_use]
    pub fn deploy_config(
        &self,
        target: &ResolvedTarget,
        deployables: Vec<PathBuf>,
    ) -> DeployConfig {
        DeployConfig {
            deployables,
            project_id: target.project_id.clone(),
            version: target.version.clone(),
            bucket: self.settings.bucket.clone(),
            image_url: self.settings.image_url.clone(),
            promote: self.settings.promote,
            server: self.settings.server.clone(),
            stop_previous_version: self.settings.stop_previous_version,
        }
    }

    #[must_use]
    pub fn project_config(
        &self,
        project_id: String,
        app_engine_directory: PathBuf,
    ) -> DeployProjectConfig {
        DeployProjectConfig {
            app_engine_directory,
            project_id,
            server: self.settings.server.clone(),
        }
    }
}
