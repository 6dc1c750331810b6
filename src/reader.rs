use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

use crate::error::{DeployError, DeployResult};
use crate::sdk::CloudSdk;

/// The fields of `appengine-web.xml` that deployment cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    pub application: Option<String>,
    pub version: Option<String>,
}

impl Descriptor {
    /// Parse descriptor XML. Only direct children of the root
    /// element are considered. Text and CDATA sections inside one
    /// element are concatenated, skipping comments in between.
    pub fn parse(xml: &str) -> Result<Self, quick_xml::Error> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut descriptor = Self::default();
        let mut path: Vec<String> = Vec::new();
        let mut text = String::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    path.push(String::from_utf8_lossy(e.local_name().as_ref()).to_string());
                    if path.len() == 2 {
                        text.clear();
                    }
                }
                Event::Text(e) if path.len() == 2 => text.push_str(&e.unescape()?),
                Event::CData(e) if path.len() == 2 => text.push_str(&String::from_utf8_lossy(&e)),
                Event::End(_) => {
                    if path.len() == 2 {
                        let value = text.trim().to_string();
                        match path[1].as_str() {
                            "application" => descriptor.application = Some(value),
                            "version" => descriptor.version = Some(value),
                            _ => {}
                        }
                    }
                    path.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(descriptor)
    }

    /// Read and parse a descriptor file.
    pub fn read(path: &Path) -> DeployResult<Self> {
        let xml = fs::read_to_string(path).map_err(|e| DeployError::DescriptorParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&xml).map_err(|e| DeployError::DescriptorParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Reads project ids and versions from the two external sources of
/// truth. Nothing is cached; every call goes back to the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigReader;

impl ConfigReader {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Project id from the Cloud SDK's active configuration.
    pub fn project_id_from_sdk(&self, sdk: &dyn CloudSdk) -> DeployResult<String> {
        let project = sdk.project_from_config()?;
        debug!(?project, "read project from gcloud config");
        non_blank(project).ok_or_else(|| {
            DeployError::ConfigNotFound(
                "project is not set in the active gcloud configuration, \
                 run: gcloud config set project <project-id>"
                    .into(),
            )
        })
    }

    /// `<application>` from `appengine-web.xml`.
    pub fn project_id_from_descriptor(&self, descriptor: &Path) -> DeployResult<String> {
        let parsed = Descriptor::read(descriptor)?;
        non_blank(parsed.application).ok_or_else(|| missing_field(descriptor, "application"))
    }

    /// `<version>` from `appengine-web.xml`.
    pub fn version_from_descriptor(&self, descriptor: &Path) -> DeployResult<String> {
        let parsed = Descriptor::read(descriptor)?;
        non_blank(parsed.version).ok_or_else(|| missing_field(descriptor, "version"))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn missing_field(descriptor: &Path, field: &str) -> DeployError {
    DeployError::ConfigNotFound(format!(
        "<{field}> is not defined in {}",
        descriptor.display()
    ))
}
