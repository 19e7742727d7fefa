use tracing::info;

use super::*;
use crate::compose::{AnswerPayload, InstallTargets, compose};
use crate::config::InstallSettings;
use crate::model::ResourceKind;
use crate::remote::BulkResponse;
use crate::resolve::resolve;

impl<T: Transport, F: FileReader> Orchestrator<T, F> {
    /// Start an OS installation and return the remote acknowledgment.
    ///
    /// The answer file is read before any remote call. Submission is
    /// fire-and-forget: the returned response only says the bulk request was
    /// accepted, not that the install finished.
    pub async fn install_operating_system(
        &self,
        settings: &InstallSettings,
    ) -> Result<BulkResponse, DeployError> {
        let mut run = Run::start("install-os");

        let answers = match self.files.read_to_string(&settings.answer_file) {
            Ok(text) => AnswerPayload(text),
            Err(source) => {
                return Err(run.fail(DeployError::PayloadRead {
                    path: settings.answer_file.clone(),
                    source,
                }));
            }
        };

        run.enter(Stage::Resolving);
        let targets = match self
            .until_cancelled(Stage::Resolving, self.resolve_targets(settings))
            .await
        {
            Ok(targets) => targets,
            Err(err) => return Err(run.fail(err)),
        };
        if self.is_cancelled() {
            let stage = run.stage();
            return Err(run.fail(DeployError::Cancelled { stage }));
        }

        run.enter(Stage::Composing);
        let request = compose(&targets, answers);

        run.enter(Stage::Submitting);
        let response = match self.transport.submit_bulk(&request).await {
            Ok(response) => response,
            Err(err) => {
                return Err(run.fail(DeployError::Submission {
                    what: "os install",
                    source: err.into(),
                }));
            }
        };
        if let Some(cause) = SubmissionCause::rejected(&response) {
            return Err(run.fail(DeployError::Submission {
                what: "os install",
                source: cause,
            }));
        }

        info!(
            server = %settings.server,
            bulk_request = response.moid.as_ref().map(|m| m.as_str()).unwrap_or("-"),
            "os install initiated"
        );
        run.succeed();
        Ok(response)
    }

    /// Resolve the four install prerequisites concurrently. The first
    /// failure drops the remaining lookups.
    pub async fn resolve_targets(
        &self,
        settings: &InstallSettings,
    ) -> Result<InstallTargets, DeployError> {
        let lookup = |kind: ResourceKind, name: &str| {
            let transport = &self.transport;
            let name = name.to_string();
            async move {
                resolve(transport, kind, &name)
                    .await
                    .map_err(DeployError::resolution)
            }
        };

        let (server, organization, os_image, scu_image) = tokio::try_join!(
            lookup(ResourceKind::Server, &settings.server),
            lookup(ResourceKind::Organization, &settings.organization),
            lookup(ResourceKind::OperatingSystemImage, &settings.os_image),
            lookup(ResourceKind::ConfigUtilityImage, &settings.scu_image),
        )?;

        Ok(InstallTargets {
            server,
            organization,
            os_image,
            scu_image,
        })
    }
}
