#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use decolar::error::{DeployError, DeployResult};
use decolar::model::ConfigFile;
use decolar::sdk::{
    AppYamlStagingConfig, CloudSdk, DeployConfig, DeployProjectConfig, StandardStagingConfig,
};
use decolar::{Packaging, Project};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ProjectFromConfig,
    StageStandard(StandardStagingConfig),
    StageAppYaml(AppYamlStagingConfig),
    Deploy(DeployConfig),
    DeployConfig(ConfigFile, DeployProjectConfig),
}

/// Records every SDK call. Clones share the same log, so a test
/// keeps one clone and hands the other to the code under test.
#[derive(Debug, Clone, Default)]
pub struct RecordingSdk {
    calls: Rc<RefCell<Vec<Call>>>,
    staging_contents: Rc<RefCell<Vec<Vec<PathBuf>>>>,
    project: Option<String>,
    staged_files: Vec<String>,
    fail_staging: bool,
    fail_deploy: bool,
    missing_gcloud: bool,
}

impl RecordingSdk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project returned from the ambient gcloud configuration.
    pub fn with_project(mut self, project: &str) -> Self {
        self.project = Some(project.to_string());
        self
    }

    /// Files the fake staging step writes, relative to the staging
    /// directory.
    pub fn stages(mut self, files: &[&str]) -> Self {
        self.staged_files
            .extend(files.iter().map(|f| (*f).to_string()));
        self
    }

    pub fn failing_staging(mut self) -> Self {
        self.fail_staging = true;
        self
    }

    pub fn failing_deploy(mut self) -> Self {
        self.fail_deploy = true;
        self
    }

    /// Fails the prerequisite check, as on a machine without gcloud.
    pub fn without_gcloud(mut self) -> Self {
        self.missing_gcloud = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn deploys(&self) -> Vec<DeployConfig> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Deploy(config) => Some(config),
                _ => None,
            })
            .collect()
    }

    /// Entries found in the staging directory when each staging
    /// primitive started.
    pub fn staging_contents(&self) -> Vec<Vec<PathBuf>> {
        self.staging_contents.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn fake_stage(&self, staging_directory: &Path) -> DeployResult<()> {
        let mut seen: Vec<PathBuf> = fs::read_dir(staging_directory)?
            .map(|e| e.map(|e| e.path()))
            .collect::<Result<_, _>>()?;
        seen.sort();
        self.staging_contents.borrow_mut().push(seen);

        if self.fail_staging {
            return Err(DeployError::Other("staging tool crashed".into()));
        }
        for file in &self.staged_files {
            let path = staging_directory.join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, "staged")?;
        }
        Ok(())
    }
}

impl CloudSdk for RecordingSdk {
    fn check_prerequisites(&self) -> DeployResult<()> {
        if self.missing_gcloud {
            return Err(DeployError::PrerequisiteMissing("gcloud not found".into()));
        }
        Ok(())
    }

    fn project_from_config(&self) -> DeployResult<Option<String>> {
        self.record(Call::ProjectFromConfig);
        Ok(self.project.clone())
    }

    fn stage_standard(&self, config: &StandardStagingConfig) -> DeployResult<()> {
        self.record(Call::StageStandard(config.clone()));
        self.fake_stage(&config.staging_directory)
    }

    fn stage_app_yaml(&self, config: &AppYamlStagingConfig) -> DeployResult<()> {
        self.record(Call::StageAppYaml(config.clone()));
        self.fake_stage(&config.staging_directory)
    }

    fn deploy(&self, config: &DeployConfig) -> DeployResult<()> {
        self.record(Call::Deploy(config.clone()));
        if self.fail_deploy {
            return Err(DeployError::Other("upload rejected".into()));
        }
        Ok(())
    }

    fn deploy_config(&self, file: ConfigFile, config: &DeployProjectConfig) -> DeployResult<()> {
        self.record(Call::DeployConfig(file, config.clone()));
        if self.fail_deploy {
            return Err(DeployError::Other("upload rejected".into()));
        }
        Ok(())
    }
}

pub const FINAL_NAME: &str = "guestbook-1.0";

pub const DESCRIPTOR_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<appengine-web-app xmlns="http://appengine.google.com/ns/1.0">
  <application>my-proj</application>
  <version>from-descriptor</version>
  <threadsafe>true</threadsafe>
</appengine-web-app>
"#;

/// A packaged project in a temporary directory.
pub struct Fixture {
    pub dir: TempDir,
    pub project: Project,
}

impl Fixture {
    /// A packaged `war` project without a descriptor.
    pub fn manifest_based() -> Self {
        Self::packaged(Packaging::War)
    }

    /// A packaged `war` project with `appengine-web.xml`.
    pub fn descriptor_based() -> Self {
        Self::with_descriptor(DESCRIPTOR_XML)
    }

    pub fn with_descriptor(xml: &str) -> Self {
        let fixture = Self::packaged(Packaging::War);
        fixture.write(
            &format!("target/{FINAL_NAME}/WEB-INF/appengine-web.xml"),
            xml,
        );
        fixture
    }

    pub fn packaged(packaging: Packaging) -> Self {
        let fixture = Self::unpackaged(packaging);
        let artifact = fixture.project.artifact();
        fs::create_dir_all(artifact.parent().unwrap()).unwrap();
        fs::write(&artifact, "archive").unwrap();
        fixture
    }

    pub fn unpackaged(packaging: Packaging) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let project = Project::new(dir.path(), FINAL_NAME).packaging(packaging);
        Self { dir, project }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn staging(&self) -> PathBuf {
        self.path("target/appengine-staging")
    }
}
