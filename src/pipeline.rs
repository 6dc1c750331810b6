use std::ffi::OsString;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::deploy::{self, Deployer};
use crate::error::{DeployError, DeployResult};
use crate::logging;
use crate::model::DeploymentModel;
use crate::processor::ConfigProcessor;
use crate::project::{AppEngine, Project};
use crate::sdk::CloudSdk;
use crate::sdk::gcloud::Gcloud;
use crate::stage::{self, Stager};
use crate::value::ConfigValue;

/// Wires a project and its App Engine settings to the command
/// line.
pub struct Pipeline {
    project: Project,
    appengine: AppEngine,
    sdk: Option<Box<dyn CloudSdk>>,
}

impl Pipeline {
    #[must_use]
    pub fn new(project: Project, appengine: AppEngine) -> Self {
        Self {
            project,
            appengine,
            sdk: None,
        }
    }

    /// Use a specific SDK instead of `gcloud` on PATH.
    #[must_use]
    pub fn sdk(mut self, sdk: impl CloudSdk + 'static) -> Self {
        self.sdk = Some(Box::new(sdk));
        self
    }

    /// Parse CLI arguments and dispatch the appropriate
    /// command.
    ///
    /// # Errors
    ///
    /// Returns an error if the dispatched command fails.
    pub fn run(self) -> DeployResult<()> {
        self.run_from(std::env::args_os())
    }

    /// Like [`Pipeline::run`], with explicit arguments. The first
    /// one is the binary name.
    ///
    /// # Errors
    ///
    /// Returns an error if the dispatched command fails.
    pub fn run_from<I, T>(self, args: I) -> DeployResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::parse_from(args);
        logging::init(cli.verbose);
        self.dispatch(&cli)
    }

    fn dispatch(self, cli: &Cli) -> DeployResult<()> {
        let appengine = cli.apply(self.appengine.clone());
        let sdk = self.sdk.unwrap_or_else(|| Box::new(Gcloud::new()));

        match cli.command {
            Command::Stage => {
                let stager = stage::create(&self.project, &appengine)?;
                if stager != Stager::Noop {
                    sdk.check_prerequisites()?;
                }
                stager.stage(sdk.as_ref())
            }
            Command::ShowConfig => show_config(&self.project, &appengine, sdk.as_ref()),
            operation => {
                let deployer = deploy::create(&self.project, &appengine, sdk)?;
                run_operation(deployer.as_ref(), &operation)
            }
        }
    }
}

fn run_operation(deployer: &dyn Deployer, operation: &Command) -> DeployResult<()> {
    match operation {
        Command::Deploy => deployer.deploy(),
        Command::DeployAll => deployer.deploy_all(),
        Command::DeployCron => deployer.deploy_cron(),
        Command::DeployDispatch => deployer.deploy_dispatch(),
        Command::DeployDos => deployer.deploy_dos(),
        Command::DeployIndex => deployer.deploy_index(),
        Command::DeployQueue => deployer.deploy_queue(),
        Command::Stage | Command::ShowConfig => {
            Err(DeployError::Other(format!("{operation:?} is not a deploy operation")))
        }
    }
}

/// Print what a deploy would use, without staging anything.
fn show_config(project: &Project, appengine: &AppEngine, sdk: &dyn CloudSdk) -> DeployResult<()> {
    if !project.packaging.is_compatible() {
        println!("packaging:        {} (not deployable)", project.packaging);
        return Ok(());
    }
    let model = DeploymentModel::detect(&project.source_directory());
    let processor = ConfigProcessor::new(
        model,
        project.descriptor(),
        appengine.stage.app_engine_directory(project),
    );
    let project_id = processor.process_project_id(&appengine.deploy.project_id, sdk)?;
    let version = processor.process_version(&appengine.deploy.version)?;
    let staging = appengine.stage.staging_directory(project);

    info!(%model, "resolved configuration");
    println!("model:            {model}");
    println!("artifact:         {}", project.artifact().display());
    println!("project:          {project_id}");
    println!(
        "version:          {}",
        version.as_deref().unwrap_or("<generated by gcloud>")
    );
    println!("staging:          {}", staging.display());
    println!(
        "config directory: {}",
        processor.process_app_engine_directory(&staging).display()
    );
    Ok(())
}

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Stage and deploy to App Engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Project id, GCLOUD_CONFIG or APPENGINE_CONFIG
    #[arg(long, global = true)]
    project_id: Option<String>,

    /// Version, GCLOUD_CONFIG or APPENGINE_CONFIG
    #[arg(long, global = true)]
    version: Option<String>,

    /// Route all traffic to the new version
    #[arg(long, global = true, conflicts_with = "no_promote")]
    promote: bool,

    /// Deploy without routing traffic to the new version
    #[arg(long, global = true)]
    no_promote: bool,

    /// Debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, mut appengine: AppEngine) -> AppEngine {
        if let Some(raw) = &self.project_id {
            appengine.deploy.project_id = ConfigValue::from(raw.as_str());
        }
        if let Some(raw) = &self.version {
            appengine.deploy.version = ConfigValue::from(raw.as_str());
        }
        if self.promote {
            appengine.deploy.promote = Some(true);
        } else if self.no_promote {
            appengine.deploy.promote = Some(false);
        }
        appengine
    }
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Prepare the staging directory
    Stage,
    /// Stage and deploy the application
    Deploy,
    /// Stage and deploy the application with all configuration files
    DeployAll,
    /// Stage and deploy cron.yaml
    DeployCron,
    /// Stage and deploy dispatch.yaml
    DeployDispatch,
    /// Stage and deploy dos.yaml
    DeployDos,
    /// Stage and deploy index.yaml
    DeployIndex,
    /// Stage and deploy queue.yaml
    DeployQueue,
    /// Show the detected model and resolved settings
    ShowConfig,
}
