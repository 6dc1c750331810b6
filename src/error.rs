use std::path::PathBuf;
use std::process::ExitStatus;

pub type DeployResult<T> = Result<T, DeployError>;

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("{setting} must be defined or configured to read from system state\n{options}")]
    MissingConfiguration { setting: String, options: String },

    #[error("configuration not found: {0}")]
    ConfigNotFound(String),

    #[error("failed to parse {}: {message}", path.display())]
    DescriptorParse { path: PathBuf, message: String },

    #[error(
        "build artifact {} not found, package the application before \
         staging or deploying",
        .0.display()
    )]
    ArtifactNotFound(PathBuf),

    #[error(
        "app.yaml not found in staging directory {}, cannot deploy all",
        .0.display()
    )]
    MissingAppManifest(PathBuf),

    #[error("staging directory {}: {source}", path.display())]
    StagingIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("staging failed")]
    StagingFailed(#[source] Box<DeployError>),

    #[error("deployment failed")]
    DeploymentFailed(#[source] Box<DeployError>),

    #[error("invalid staging input: {0}")]
    InvalidStaging(String),

    #[error("command failed: {command}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("prerequisite missing: {0}")]
    PrerequisiteMissing(String),

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl DeployError {
    /// Wrap a failure reported by the SDK's staging primitive.
    #[must_use]
    pub fn staging(cause: Self) -> Self {
        Self::StagingFailed(Box::new(cause))
    }

    /// Wrap a failure reported by one of the SDK's deploy
    /// primitives.
    #[must_use]
    pub fn deployment(cause: Self) -> Self {
        Self::DeploymentFailed(Box::new(cause))
    }
}
