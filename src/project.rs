use std::path::{Path, PathBuf};

use crate::model::{DESCRIPTOR, Packaging};
use crate::value::ConfigValue;

/// Facts about the build: where the project lives and what the
/// build produced.
///
/// # Example
///
/// ```
/// use decolar::Project;
/// use std::path::Path;
///
/// let project = Project::new("/src/shop", "shop-1.0");
///
/// assert_eq!(project.artifact(), Path::new("/src/shop/target/shop-1.0.war"));
/// assert_eq!(project.source_directory(), Path::new("/src/shop/target/shop-1.0"));
/// ```
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub build_dir: PathBuf,
    pub final_name: String,
    pub packaging: Packaging,
    source_directory: Option<PathBuf>,
}

impl Project {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, final_name: &str) -> Self {
        let root = root.into();
        Self {
            build_dir: root.join("target"),
            root,
            final_name: final_name.to_string(),
            packaging: Packaging::War,
            source_directory: None,
        }
    }

    #[must_use]
    pub fn build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build_dir = dir.into();
        self
    }

    #[must_use]
    pub fn packaging(mut self, packaging: impl Into<Packaging>) -> Self {
        self.packaging = packaging.into();
        self
    }

    /// Override the exploded web application directory.
    #[must_use]
    pub fn source_directory_at(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_directory = Some(dir.into());
        self
    }

    /// The archive produced by packaging.
    #[must_use]
    pub fn artifact(&self) -> PathBuf {
        self.build_dir
            .join(format!("{}.{}", self.final_name, self.packaging.extension()))
    }

    /// The exploded web application.
    #[must_use]
    pub fn source_directory(&self) -> PathBuf {
        self.source_directory
            .clone()
            .unwrap_or_else(|| self.build_dir.join(&self.final_name))
    }

    #[must_use]
    pub fn descriptor(&self) -> PathBuf {
        self.source_directory().join(DESCRIPTOR)
    }

    fn default_staging_directory(&self) -> PathBuf {
        self.build_dir.join("appengine-staging")
    }

    fn default_app_engine_directory(&self) -> PathBuf {
        self.root.join("src/main/appengine")
    }

    fn default_docker_directory(&self) -> PathBuf {
        self.root.join("src/main/docker")
    }
}

/// Settings used while staging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageSettings {
    pub staging_directory: Option<PathBuf>,
    pub app_engine_directory: Option<PathBuf>,
    pub docker_directory: Option<PathBuf>,
    pub extra_files_directories: Vec<PathBuf>,
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

impl StageSettings {
    #[must_use]
    pub fn staging_directory(&self, project: &Project) -> PathBuf {
        self.staging_directory
            .clone()
            .unwrap_or_else(|| project.default_staging_directory())
    }

    #[must_use]
    pub fn app_engine_directory(&self, project: &Project) -> PathBuf {
        self.app_engine_directory
            .clone()
            .unwrap_or_else(|| project.default_app_engine_directory())
    }

    #[must_use]
    pub fn docker_directory(&self, project: &Project) -> PathBuf {
        self.docker_directory
            .clone()
            .unwrap_or_else(|| project.default_docker_directory())
    }
}

/// Raw deployment settings, before project id and version are
/// resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploySettings {
    pub project_id: ConfigValue,
    pub version: ConfigValue,
    pub bucket: Option<String>,
    pub image_url: Option<String>,
    pub promote: Option<bool>,
    pub server: Option<String>,
    pub stop_previous_version: Option<bool>,
    pub deployables: Vec<PathBuf>,
}

/// App Engine plugin settings.
///
/// # Example
///
/// ```
/// use decolar::{AppEngine, ConfigValue};
///
/// let appengine = AppEngine::new()
///     .project_id("GCLOUD_CONFIG")
///     .version("v1")
///     .promote(true);
///
/// assert_eq!(appengine.deploy.project_id, ConfigValue::Gcloud);
/// assert_eq!(appengine.deploy.promote, Some(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppEngine {
    pub stage: StageSettings,
    pub deploy: DeploySettings,
}

impl AppEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn staging_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stage.staging_directory = Some(dir.into());
        self
    }

    #[must_use]
    pub fn app_engine_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stage.app_engine_directory = Some(dir.into());
        self
    }

    #[must_use]
    pub fn docker_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stage.docker_directory = Some(dir.into());
        self
    }

    #[must_use]
    pub fn extra_files_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stage.extra_files_directories.push(dir.into());
        self
    }

    #[must_use]
    pub const fn enable_quickstart(mut self) -> Self {
        self.stage.enable_quickstart = true;
        self
    }

    #[must_use]
    pub const fn disable_update_check(mut self) -> Self {
        self.stage.disable_update_check = true;
        self
    }

    /// Split jars larger than the platform's file size limit,
    /// excluding files with the given suffixes.
    #[must_use]
    pub fn enable_jar_splitting(mut self, excludes: &[&str]) -> Self {
        self.stage.enable_jar_splitting = true;
        self.stage
            .jar_splitting_excludes
            .extend(excludes.iter().map(|s| (*s).to_string()));
        self
    }

    #[must_use]
    pub fn compile_encoding(mut self, encoding: &str) -> Self {
        self.stage.compile_encoding = Some(encoding.to_string());
        self
    }

    #[must_use]
    pub const fn delete_jsps(mut self) -> Self {
        self.stage.delete_jsps = true;
        self
    }

    #[must_use]
    pub const fn enable_jar_classes(mut self) -> Self {
        self.stage.enable_jar_classes = true;
        self
    }

    #[must_use]
    pub const fn disable_jar_jsps(mut self) -> Self {
        self.stage.disable_jar_jsps = true;
        self
    }

    #[must_use]
    pub fn runtime(mut self, runtime: &str) -> Self {
        self.stage.runtime = Some(runtime.to_string());
        self
    }

    /// A literal project id, `GCLOUD_CONFIG` or `APPENGINE_CONFIG`.
    #[must_use]
    pub fn project_id(mut self, raw: &str) -> Self {
        self.deploy.project_id = ConfigValue::from(raw);
        self
    }

    /// A literal version, `GCLOUD_CONFIG` or `APPENGINE_CONFIG`.
    #[must_use]
    pub fn version(mut self, raw: &str) -> Self {
        self.deploy.version = ConfigValue::from(raw);
        self
    }

    #[must_use]
    pub fn bucket(mut self, bucket: &str) -> Self {
        self.deploy.bucket = Some(bucket.to_string());
        self
    }

    #[must_use]
    pub fn image_url(mut self, url: &str) -> Self {
        self.deploy.image_url = Some(url.to_string());
        self
    }

    #[must_use]
    pub const fn promote(mut self, promote: bool) -> Self {
        self.deploy.promote = Some(promote);
        self
    }

    #[must_use]
    pub fn server(mut self, server: &str) -> Self {
        self.deploy.server = Some(server.to_string());
        self
    }

    #[must_use]
    pub const fn stop_previous_version(mut self, stop: bool) -> Self {
        self.deploy.stop_previous_version = Some(stop);
        self
    }

    /// Deploy this file instead of the staging directory. Only
    /// honored for `app.yaml` based projects.
    #[must_use]
    pub fn deployable(mut self, path: impl AsRef<Path>) -> Self {
        self.deploy.deployables.push(path.as_ref().to_path_buf());
        self
    }
}
