use tracing::info;

use super::*;
use crate::model::{ProfileActionUpdate, ResourceKind};
use crate::resolve::resolve;

impl<T: Transport, F: FileReader> Orchestrator<T, F> {
    /// Schedule a `Deploy` action (proceed on reboot) on the named server
    /// profile and return the updated profile as the API reports it.
    ///
    /// Deployment progress is not polled.
    pub async fn deploy_profile(&self, profile: &str) -> Result<serde_json::Value, DeployError> {
        let mut run = Run::start("deploy-profile");

        run.enter(Stage::Resolving);
        let lookup = async {
            resolve(&self.transport, ResourceKind::ServerProfile, profile)
                .await
                .map_err(DeployError::resolution)
        };
        let target = match self.until_cancelled(Stage::Resolving, lookup).await {
            Ok(target) => target,
            Err(err) => return Err(run.fail(err)),
        };
        if self.is_cancelled() {
            let stage = run.stage();
            return Err(run.fail(DeployError::Cancelled { stage }));
        }

        run.enter(Stage::Composing);
        let body = match serde_json::to_value(ProfileActionUpdate::deploy()) {
            Ok(body) => body,
            Err(source) => {
                return Err(run.fail(DeployError::Encode {
                    what: "profile deploy action",
                    source,
                }));
            }
        };

        run.enter(Stage::Submitting);
        let updated = match self
            .transport
            .update_resource(ResourceKind::ServerProfile, &target.moid, &body)
            .await
        {
            Ok(updated) => updated,
            Err(err) => {
                return Err(run.fail(DeployError::Submission {
                    what: "profile deploy",
                    source: err.into(),
                }));
            }
        };

        info!(profile, moid = %target.moid, "profile deploy scheduled");
        run.succeed();
        Ok(updated)
    }
}
