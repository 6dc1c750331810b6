pub mod app;
pub mod builder;
pub mod noop;

use tracing::info;

use crate::error::DeployResult;
use crate::model::DeploymentModel;
use crate::processor::ConfigProcessor;
use crate::project::{AppEngine, Project};
use crate::sdk::CloudSdk;
use crate::stage::{self, Stager};

pub use app::AppDeployer;
pub use builder::ConfigBuilder;
pub use noop::NoopDeployer;

/// A deployer stages the application and hands the result to the
/// Cloud SDK.
///
/// Every operation stages first, so each one is self-contained.
pub trait Deployer {
    /// Deploy the staged application.
    fn deploy(&self) -> DeployResult<()>;

    /// Deploy `app.yaml` together with every auxiliary
    /// configuration file that exists.
    fn deploy_all(&self) -> DeployResult<()>;

    /// Deploy `cron.yaml`.
    fn deploy_cron(&self) -> DeployResult<()>;

    /// Deploy `dispatch.yaml`.
    fn deploy_dispatch(&self) -> DeployResult<()>;

    /// Deploy `dos.yaml`.
    fn deploy_dos(&self) -> DeployResult<()>;

    /// Deploy `index.yaml`.
    fn deploy_index(&self) -> DeployResult<()>;

    /// Deploy `queue.yaml`.
    fn deploy_queue(&self) -> DeployResult<()>;
}

/// Build the deployer for a project.
///
/// The deployment model is detected here, once, and the same value
/// configures both the stager and the config processor. The SDK's
/// prerequisites are only checked for deployable, packaged projects,
/// so incompatible packaging never needs `gcloud` installed.
pub fn create(
    project: &Project,
    appengine: &AppEngine,
    sdk: Box<dyn CloudSdk>,
) -> DeployResult<Box<dyn Deployer>> {
    if !project.packaging.is_compatible() {
        info!(packaging = %project.packaging, "packaging is not deployable to App Engine");
        return Ok(Box::new(NoopDeployer));
    }
    stage::require_artifact(project)?;
    sdk.check_prerequisites()?;

    let model = DeploymentModel::detect(&project.source_directory());
    info!(%model, "detected deployment model");

    let stager = Stager::for_model(model, project, appengine);
    let processor = ConfigProcessor::new(
        model,
        project.descriptor(),
        appengine.stage.app_engine_directory(project),
    );
    let builder = ConfigBuilder::new(appengine.deploy.clone(), processor);

    let deployer: Box<dyn Deployer> = match AppDeployer::new(stager, builder, sdk) {
        Some(deployer) => Box::new(deployer),
        None => Box::new(NoopDeployer),
    };
    Ok(deployer)
}
