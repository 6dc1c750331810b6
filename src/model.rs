use std::fmt;
use std::path::Path;

/// Descriptor path, relative to the exploded web application.
pub const DESCRIPTOR: &str = "WEB-INF/appengine-web.xml";

/// Where standard staging writes the generated auxiliary
/// configuration, relative to the staging directory.
pub const GENERATED_CONFIG_DIR: &str = "WEB-INF/appengine-generated";

/// The application manifest, at the root of the staging directory.
pub const APP_YAML: &str = "app.yaml";

/// Which of the two deployment models a project uses.
///
/// Detected once per invocation and handed to every component that
/// behaves differently per model, so staging and deployment always
/// agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentModel {
    /// `appengine-web.xml` is present in the exploded web
    /// application. Auxiliary configuration is generated by staging.
    DescriptorBased,
    /// Configured by a user-authored `app.yaml` and a directory of
    /// auxiliary configuration files.
    ManifestBased,
}

impl DeploymentModel {
    /// Detect the model from the compiled source directory.
    #[must_use]
    pub fn detect(source_directory: &Path) -> Self {
        if source_directory.join(DESCRIPTOR).exists() {
            Self::DescriptorBased
        } else {
            Self::ManifestBased
        }
    }
}

impl fmt::Display for DeploymentModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DescriptorBased => f.write_str("appengine-web.xml"),
            Self::ManifestBased => f.write_str("app.yaml"),
        }
    }
}

/// Archive type the build produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packaging {
    Jar,
    War,
    Other(String),
}

impl Packaging {
    /// Only `jar` and `war` archives can be staged and deployed.
    #[must_use]
    pub const fn is_compatible(&self) -> bool {
        matches!(self, Self::Jar | Self::War)
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        match self {
            Self::Jar => "jar",
            Self::War => "war",
            Self::Other(ext) => ext,
        }
    }
}

impl From<&str> for Packaging {
    fn from(value: &str) -> Self {
        match value {
            "jar" => Self::Jar,
            "war" => Self::War,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Packaging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// The five auxiliary configuration files, each deployable on its
/// own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFile {
    Cron,
    Dispatch,
    Dos,
    Index,
    Queue,
}

impl ConfigFile {
    /// Canonical order used when deploying everything at once.
    pub const ALL: [Self; 5] = [
        Self::Cron,
        Self::Dispatch,
        Self::Dos,
        Self::Index,
        Self::Queue,
    ];

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Cron => "cron.yaml",
            Self::Dispatch => "dispatch.yaml",
            Self::Dos => "dos.yaml",
            Self::Index => "index.yaml",
            Self::Queue => "queue.yaml",
        }
    }
}

impl fmt::Display for ConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
