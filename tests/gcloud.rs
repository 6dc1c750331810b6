use std::fs;
use std::path::{Path, PathBuf};

use decolar::Gcloud;
use decolar::error::DeployError;
use decolar::model::ConfigFile;
use decolar::sdk::gcloud::{parse_config_project, stage_app_yaml};
use decolar::sdk::{AppYamlStagingConfig, DeployConfig, DeployProjectConfig, StandardStagingConfig};

fn args(cmd: &decolar::cmd::Cmd) -> Vec<&str> {
    cmd.arguments().iter().map(String::as_str).collect()
}

#[test]
fn minimal_deploy_command() {
    let config = DeployConfig {
        deployables: vec![PathBuf::from("/build/appengine-staging")],
        project_id: "my-proj".into(),
        ..DeployConfig::default()
    };

    let cmd = Gcloud::new().deploy_command(&config);

    assert_eq!(cmd.program(), "gcloud");
    assert_eq!(
        args(&cmd),
        vec![
            "app",
            "deploy",
            "/build/appengine-staging",
            "--project=my-proj",
            "--quiet"
        ]
    );
}

#[test]
fn full_deploy_command() {
    let config = DeployConfig {
        deployables: vec![PathBuf::from("app.yaml"), PathBuf::from("cron.yaml")],
        project_id: "my-proj".into(),
        version: Some("v2".into()),
        bucket: Some("gs://bucket".into()),
        image_url: Some("gcr.io/my-proj/app".into()),
        promote: Some(false),
        server: Some("appengine.example.com".into()),
        stop_previous_version: Some(true),
    };

    let cmd = Gcloud::new().verbosity("debug").deploy_command(&config);

    assert_eq!(
        args(&cmd),
        vec![
            "--verbosity=debug",
            "app",
            "deploy",
            "app.yaml",
            "cron.yaml",
            "--bucket=gs://bucket",
            "--image-url=gcr.io/my-proj/app",
            "--no-promote",
            "--server=appengine.example.com",
            "--stop-previous-version",
            "--version=v2",
            "--project=my-proj",
            "--quiet",
        ]
    );
}

#[test]
fn config_file_deploy_command() {
    let config = DeployProjectConfig {
        app_engine_directory: PathBuf::from("/src/main/appengine"),
        project_id: "my-proj".into(),
        server: None,
    };

    let cmd = Gcloud::new()
        .cloud_sdk_home("/opt/sdk")
        .credential_file("/secrets/key.json")
        .deploy_config_command(ConfigFile::Dispatch, &config);

    assert_eq!(cmd.program(), "/opt/sdk/bin/gcloud");
    assert_eq!(
        args(&cmd),
        vec![
            "app",
            "deploy",
            "/src/main/appengine/dispatch.yaml",
            "--project=my-proj",
            "--quiet"
        ]
    );
    assert_eq!(
        cmd.envs(),
        &[(
            "CLOUDSDK_AUTH_CREDENTIAL_FILE_OVERRIDE".to_string(),
            "/secrets/key.json".to_string()
        )]
    );
}

#[test]
fn standard_staging_command_maps_flags() {
    let config = StandardStagingConfig {
        source_directory: PathBuf::from("/build/app"),
        staging_directory: PathBuf::from("/build/staging"),
        enable_quickstart: true,
        enable_jar_splitting: true,
        jar_splitting_excludes: vec![".txt".into(), ".md".into()],
        compile_encoding: Some("UTF-8".into()),
        runtime: Some("java8".into()),
        ..StandardStagingConfig::default()
    };

    let cmd = Gcloud::standard_staging_command(Path::new("/opt/sdk"), &config);

    assert_eq!(cmd.program(), "java");
    assert_eq!(
        args(&cmd),
        vec![
            "-cp",
            "/opt/sdk/platform/google_appengine/google/appengine/tools/java/lib/appengine-tools-api.jar",
            "com.google.appengine.tools.admin.AppCfg",
            "--enable_quickstart",
            "--enable_jar_splitting",
            "--jar_splitting_excludes=.txt,.md",
            "--compile_encoding=UTF-8",
            "--allow_any_runtime",
            "--runtime=java8",
            "stage",
            "/build/app",
            "/build/staging",
        ]
    );
}

#[test]
fn parses_project_from_config_list() {
    let json = r#"{"core": {"account": "dev@example.com", "project": "ambient"}}"#;

    assert_eq!(parse_config_project(json).unwrap(), Some("ambient".into()));
}

#[test]
fn config_list_without_project() {
    assert_eq!(parse_config_project(r#"{"core": {}}"#).unwrap(), None);
    assert_eq!(parse_config_project("{}").unwrap(), None);
}

#[test]
fn invalid_config_list_is_json_error() {
    assert!(matches!(
        parse_config_project("not json").unwrap_err(),
        DeployError::Json(_)
    ));
}

struct AppYamlLayout {
    dir: tempfile::TempDir,
}

impl AppYamlLayout {
    fn new(app_yaml: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let layout = Self { dir };
        layout.write("src/main/appengine/app.yaml", app_yaml);
        layout.write("target/app.jar", "jar");
        fs::create_dir_all(layout.path("staging")).unwrap();
        layout
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn config(&self) -> AppYamlStagingConfig {
        AppYamlStagingConfig {
            app_engine_directory: self.path("src/main/appengine"),
            docker_directory: self.path("src/main/docker"),
            artifact: self.path("target/app.jar"),
            staging_directory: self.path("staging"),
            extra_files_directories: Vec::new(),
        }
    }
}

#[test]
fn app_yaml_staging_copies_manifest_and_artifact() {
    let layout = AppYamlLayout::new("runtime: java\nenv: flex\n");

    stage_app_yaml(&layout.config()).unwrap();

    assert!(layout.path("staging/app.yaml").is_file());
    assert_eq!(fs::read_to_string(layout.path("staging/app.jar")).unwrap(), "jar");
}

#[test]
fn app_yaml_staging_copies_docker_context_and_extra_files() {
    let layout = AppYamlLayout::new("runtime: custom\nenv: flex\n");
    layout.write("src/main/docker/Dockerfile", "FROM openjdk:8");
    layout.write("extra/static/index.html", "<html/>");
    let mut config = layout.config();
    config.extra_files_directories.push(layout.path("extra"));

    stage_app_yaml(&config).unwrap();

    assert!(layout.path("staging/Dockerfile").is_file());
    assert!(layout.path("staging/static/index.html").is_file());
}

#[test]
fn app_yaml_staging_rejects_dockerfile_with_java_runtime() {
    let layout = AppYamlLayout::new("runtime: java\n");
    layout.write("src/main/docker/Dockerfile", "FROM openjdk:8");

    let err = stage_app_yaml(&layout.config()).unwrap_err();

    assert!(matches!(err, DeployError::InvalidStaging(_)));
}

#[test]
fn app_yaml_staging_requires_manifest() {
    let layout = AppYamlLayout::new("runtime: java\n");
    fs::remove_file(layout.path("src/main/appengine/app.yaml")).unwrap();

    let err = stage_app_yaml(&layout.config()).unwrap_err();

    assert!(matches!(err, DeployError::InvalidStaging(ref m) if m.contains("app.yaml")));
}

#[test]
fn app_yaml_staging_rejects_missing_extra_files_directory() {
    let layout = AppYamlLayout::new("runtime: java\n");
    let mut config = layout.config();
    config.extra_files_directories.push(layout.path("missing"));

    let err = stage_app_yaml(&config).unwrap_err();

    assert!(matches!(err, DeployError::InvalidStaging(_)));
}
