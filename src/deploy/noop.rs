use tracing::debug;

use crate::deploy::Deployer;
use crate::error::DeployResult;

/// Used for modules whose packaging cannot run on App Engine, so a
/// multi-module build can invoke every operation unconditionally.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDeployer;

impl NoopDeployer {
    fn skip(operation: &str) -> DeployResult<()> {
        debug!(operation, "nothing to deploy for this packaging");
        Ok(())
    }
}

impl Deployer for NoopDeployer {
    fn deploy(&self) -> DeployResult<()> {
        Self::skip("deploy")
    }

    fn deploy_all(&self) -> DeployResult<()> {
        Self::skip("deploy-all")
    }

    fn deploy_cron(&self) -> DeployResult<()> {
        Self::skip("deploy-cron")
    }

    fn deploy_dispatch(&self) -> DeployResult<()> {
        Self::skip("deploy-dispatch")
    }

    fn deploy_dos(&self) -> DeployResult<()> {
        Self::skip("deploy-dos")
    }

    fn deploy_index(&self) -> DeployResult<()> {
        Self::skip("deploy-index")
    }

    fn deploy_queue(&self) -> DeployResult<()> {
        Self::skip("deploy-queue")
    }
}
