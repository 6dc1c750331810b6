//! Stage and deploy Java web applications to Google App Engine
//! from a Rust `xtask`.
//!
//! The name is Portuguese for *to take off*: package your
//! application, then let it leave the ground in one command.
//!
//! # Overview
//!
//! A deployment is described by two values:
//!
//! - A [`Project`] with the facts of the build (root directory,
//!   final artifact name, packaging)
//! - An [`AppEngine`] with the plugin settings (staging options,
//!   project id, version, promotion)
//!
//! [`Pipeline`] turns them into `stage`, `deploy`, `deploy-all` and
//! `deploy-<config>` subcommands, delegating the actual work to the
//! `gcloud` CLI ([`Gcloud`]).
//!
//! # Deployment models
//!
//! Two models are supported and detected automatically:
//!
//! 1. **`appengine-web.xml`** - the descriptor lives in
//!    `WEB-INF/` of the exploded web application. Staging converts
//!    it, and auxiliary configuration (`cron.yaml`, `queue.yaml`,
//!    ...) is generated into `WEB-INF/appengine-generated/`.
//! 2. **`app.yaml`** - the manifest and auxiliary configuration
//!    live in `src/main/appengine/`, and staging copies them next
//!    to the artifact.
//!
//! The model is detected once per invocation, so staging and
//! deployment never disagree.
//!
//! # Project id and version
//!
//! Both accept a literal value or one of two sentinels:
//!
//! - `GCLOUD_CONFIG` - the project from `gcloud config`, or for the
//!   version, a version generated by `gcloud`
//! - `APPENGINE_CONFIG` - `<application>` / `<version>` from
//!   `appengine-web.xml` (descriptor model only)
//!
//! They are resolved before anything is staged.
//!
//! # Example
//!
//! Create an `xtask/src/main.rs` in your project:
//!
//! ```rust,no_run
//! use decolar::{AppEngine, Pipeline, Project};
//!
//! fn main() -> anyhow::Result<()> {
//!     let project = Project::new(".", "guestbook-1.0").packaging("war");
//!
//!     let appengine = AppEngine::new()
//!         .project_id("GCLOUD_CONFIG")
//!         .version("GCLOUD_CONFIG")
//!         .promote(true)
//!         .enable_jar_splitting(&[".txt"]);
//!
//!     Pipeline::new(project, appengine).run()?;
//!     Ok(())
//! }
//! ```
//!
//! Then use `cargo xtask` subcommands:
//!
//! ```sh
//! # Stage only
//! cargo xtask stage
//!
//! # Deploy the application
//! cargo xtask deploy --version v2
//!
//! # Deploy the application and every configuration file
//! cargo xtask deploy-all
//!
//! # Update only the cron schedule
//! cargo xtask deploy-cron
//!
//! # Check what would be deployed
//! cargo xtask show-config
//! ```

// Allow noisy pedantic lints that don't add value for a
// deployment tool crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cmd;
pub mod deploy;
pub mod error;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod processor;
pub mod project;
pub mod reader;
pub mod sdk;
pub mod stage;
pub mod value;

pub use deploy::{AppDeployer, Deployer, NoopDeployer};
pub use error::{DeployError, DeployResult};
pub use model::{ConfigFile, DeploymentModel, Packaging};
pub use pipeline::Pipeline;
pub use processor::ConfigProcessor;
pub use project::{AppEngine, Project};
pub use reader::ConfigReader;
pub use sdk::CloudSdk;
pub use sdk::gcloud::Gcloud;
pub use stage::Stager;
pub use value::ConfigValue;
