use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::cmd::{self, Cmd};
use crate::error::{DeployError, DeployResult};
use crate::model::{APP_YAML, ConfigFile};
use crate::sdk::{
    AppYamlStagingConfig, CloudSdk, DeployConfig, DeployProjectConfig, StandardStagingConfig,
};

const APPCFG_MAIN: &str = "com.google.appengine.tools.admin.AppCfg";
const TOOLS_JAR: &str =
    "platform/google_appengine/google/appengine/tools/java/lib/appengine-tools-api.jar";

/// Cloud SDK backed by the `gcloud` CLI.
///
/// # Example
///
/// ```
/// use decolar::Gcloud;
///
/// let gcloud = Gcloud::new().cloud_sdk_home("/opt/google-cloud-sdk");
/// assert_eq!(gcloud.program(), "/opt/google-cloud-sdk/bin/gcloud");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Gcloud {
    cloud_sdk_home: Option<PathBuf>,
    credential_file: Option<PathBuf>,
    verbosity: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConfigList {
    core: Option<CoreSection>,
}

#[derive(Debug, Deserialize)]
struct CoreSection {
    project: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AppYaml {
    runtime: Option<String>,
}

impl Gcloud {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the SDK installed at `home` instead of `gcloud` on PATH.
    #[must_use]
    pub fn cloud_sdk_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.cloud_sdk_home = Some(home.into());
        self
    }

    /// Authenticate with a service account key file.
    #[must_use]
    pub fn credential_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credential_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn verbosity(mut self, level: &str) -> Self {
        self.verbosity = Some(level.to_string());
        self
    }

    #[must_use]
    pub fn program(&self) -> String {
        self.cloud_sdk_home.as_ref().map_or_else(
            || "gcloud".to_string(),
            |home| home.join("bin").join("gcloud").display().to_string(),
        )
    }

    fn gcloud(&self) -> Cmd {
        let mut cmd = Cmd::new(self.program());
        if let Some(path) = &self.credential_file {
            cmd = cmd.env(
                "CLOUDSDK_AUTH_CREDENTIAL_FILE_OVERRIDE",
                path.display().to_string(),
            );
        }
        if let Some(level) = &self.verbosity {
            cmd = cmd.arg(format!("--verbosity={level}"));
        }
        cmd
    }

    /// `gcloud app deploy` for a full deploy request.
    #[must_use]
    pub fn deploy_command(&self, config: &DeployConfig) -> Cmd {
        let mut cmd = self
            .gcloud()
            .args(["app", "deploy"])
            .args(config.deployables.iter().map(|p| p.display().to_string()));

        if let Some(bucket) = &config.bucket {
            cmd = cmd.arg(format!("--bucket={bucket}"));
        }
        if let Some(image_url) = &config.image_url {
            cmd = cmd.arg(format!("--image-url={image_url}"));
        }
        if let Some(promote) = config.promote {
            cmd = cmd.arg(if promote { "--promote" } else { "--no-promote" });
        }
        if let Some(server) = &config.server {
            cmd = cmd.arg(format!("--server={server}"));
        }
        if let Some(stop) = config.stop_previous_version {
            cmd = cmd.arg(if stop {
                "--stop-previous-version"
            } else {
                "--no-stop-previous-version"
            });
        }
        if let Some(version) = &config.version {
            cmd = cmd.arg(format!("--version={version}"));
        }
        cmd.arg(format!("--project={}", config.project_id))
            .arg("--quiet")
    }

    /// `gcloud app deploy <dir>/<file>` for one configuration file.
    #[must_use]
    pub fn deploy_config_command(&self, file: ConfigFile, config: &DeployProjectConfig) -> Cmd {
        let path = config.app_engine_directory.join(file.file_name());
        let mut cmd = self
            .gcloud()
            .args(["app", "deploy"])
            .arg(path.display().to_string());
        if let Some(server) = &config.server {
            cmd = cmd.arg(format!("--server={server}"));
        }
        cmd.arg(format!("--project={}", config.project_id))
            .arg("--quiet")
    }

    /// The `AppCfg` staging invocation for a descriptor-based
    /// application.
    #[must_use]
    pub fn standard_staging_command(sdk_root: &Path, config: &StandardStagingConfig) -> Cmd {
        let mut cmd = Cmd::new("java")
            .arg("-cp")
            .arg(sdk_root.join(TOOLS_JAR).display().to_string())
            .arg(APPCFG_MAIN);

        let flags = [
            (config.enable_quickstart, "--enable_quickstart"),
            (config.disable_update_check, "--disable_update_check"),
            (config.enable_jar_splitting, "--enable_jar_splitting"),
            (config.delete_jsps, "--delete_jsps"),
            (config.enable_jar_classes, "--enable_jar_classes"),
            (config.disable_jar_jsps, "--disable_jar_jsps"),
        ];
        for (enabled, flag) in flags {
            if enabled {
                cmd = cmd.arg(flag);
            }
        }
        if !config.jar_splitting_excludes.is_empty() {
            cmd = cmd.arg(format!(
                "--jar_splitting_excludes={}",
                config.jar_splitting_excludes.join(",")
            ));
        }
        if let Some(encoding) = &config.compile_encoding {
            cmd = cmd.arg(format!("--compile_encoding={encoding}"));
        }
        if let Some(runtime) = &config.runtime {
            cmd = cmd.arg("--allow_any_runtime").arg(format!("--runtime={runtime}"));
        }

        cmd.arg("stage")
            .arg(config.source_directory.display().to_string())
            .arg(config.staging_directory.display().to_string())
    }

    fn sdk_root(&self) -> DeployResult<PathBuf> {
        if let Some(home) = &self.cloud_sdk_home {
            return Ok(home.clone());
        }
        let root = self
            .gcloud()
            .args(["info", "--format=value(installation.sdk_root)"])
            .output()?;
        if root.is_empty() {
            return Err(DeployError::PrerequisiteMissing(
                "could not determine the Cloud SDK installation directory".into(),
            ));
        }
        Ok(PathBuf::from(root))
    }
}

impl CloudSdk for Gcloud {
    fn check_prerequisites(&self) -> DeployResult<()> {
        let found = match &self.cloud_sdk_home {
            Some(_) => Path::new(&self.program()).exists(),
            None => cmd::command_exists("gcloud"),
        };
        if found {
            Ok(())
        } else {
            Err(DeployError::PrerequisiteMissing(format!(
                "{} not found, install the Google Cloud SDK",
                self.program()
            )))
        }
    }

    fn project_from_config(&self) -> DeployResult<Option<String>> {
        let json = self
            .gcloud()
            .args(["config", "list", "--format=json"])
            .output()?;
        parse_config_project(&json)
    }

    fn stage_standard(&self, config: &StandardStagingConfig) -> DeployResult<()> {
        let sdk_root = self.sdk_root()?;
        if !sdk_root.join(TOOLS_JAR).exists() {
            return Err(DeployError::PrerequisiteMissing(
                "App Engine Java tools not installed, \
                 run: gcloud components install app-engine-java"
                    .into(),
            ));
        }
        Self::standard_staging_command(&sdk_root, config).status()
    }

    fn stage_app_yaml(&self, config: &AppYamlStagingConfig) -> DeployResult<()> {
        stage_app_yaml(config)
    }

    fn deploy(&self, config: &DeployConfig) -> DeployResult<()> {
        self.deploy_command(config).status()
    }

    fn deploy_config(&self, file: ConfigFile, config: &DeployProjectConfig) -> DeployResult<()> {
        self.deploy_config_command(file, config).status()
    }
}

/// Extract `core.project` from `gcloud config list --format=json`.
pub fn parse_config_project(json: &str) -> DeployResult<Option<String>> {
    let list: ConfigList = serde_json::from_str(json)?;
    Ok(list.core.and_then(|core| core.project))
}

/// Assemble an `app.yaml` based staging directory: Docker context,
/// extra files, the artifact and `app.yaml` itself.
pub fn stage_app_yaml(config: &AppYamlStagingConfig) -> DeployResult<()> {
    let app_yaml = config.app_engine_directory.join(APP_YAML);
    if !app_yaml.is_file() {
        return Err(DeployError::InvalidStaging(format!(
            "{} not found",
            app_yaml.display()
        )));
    }
    let runtime = read_runtime(&app_yaml)?;
    let staging = &config.staging_directory;

    if config.docker_directory.join("Dockerfile").is_file() {
        if runtime.as_deref() == Some("java") {
            return Err(DeployError::InvalidStaging(
                "cannot use a Dockerfile with runtime: java, \
                 set runtime: custom in app.yaml"
                    .into(),
            ));
        }
        debug!(dir = %config.docker_directory.display(), "copying Docker context");
        copy_dir(&config.docker_directory, staging)?;
    }

    for dir in &config.extra_files_directories {
        if !dir.is_dir() {
            return Err(DeployError::InvalidStaging(format!(
                "extra files directory {} does not exist",
                dir.display()
            )));
        }
        debug!(dir = %dir.display(), "copying extra files");
        copy_dir(dir, staging)?;
    }

    let artifact_name = config.artifact.file_name().ok_or_else(|| {
        DeployError::InvalidStaging(format!("invalid artifact path {}", config.artifact.display()))
    })?;
    fs::copy(&config.artifact, staging.join(artifact_name))?;
    fs::copy(&app_yaml, staging.join(APP_YAML))?;

    info!(dir = %staging.display(), "staged app.yaml application");
    Ok(())
}

fn read_runtime(app_yaml: &Path) -> DeployResult<Option<String>> {
    let content = fs::read_to_string(app_yaml)?;
    let parsed: Option<AppYaml> = serde_yaml::from_str(&content)?;
    Ok(parsed.and_then(|yaml| yaml.runtime))
}

fn copy_dir(from: &Path, to: &Path) -> DeployResult<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
