// Artifact fetcher
//
// A result reference can appear before the file behind it is readable,
// so every failure here counts as "not yet" and is retried until the
// fetch budget runs out.

use std::convert::Infallible;

use dnacheck_api::DnacClient;
use tracing::debug;

use super::poll::{Check, PollError, PollPolicy, poll_until};
use super::{Artifact, ArtifactContent, DownloadedFile, ResultRef};
use crate::error::CoreError;

pub struct ArtifactFetcher<'a> {
    client: &'a DnacClient,
    policy: PollPolicy,
}

impl<'a> ArtifactFetcher<'a> {
    pub fn new(client: &'a DnacClient, policy: PollPolicy) -> Self {
        Self { client, policy }
    }

    async fn fetch_once(
        &self,
        reference: &ResultRef,
    ) -> Result<ArtifactContent, dnacheck_api::Error> {
        match reference {
            ResultRef::File(id) => self.client.get_file(id).await.map(ArtifactContent::Json),
            ResultRef::Url(url) => {
                let download = self.client.download(url).await?;
                Ok(ArtifactContent::File(DownloadedFile {
                    size: download.bytes.len(),
                    file_name: download.file_name,
                    bytes: download.bytes,
                }))
            }
        }
    }

    /// Retrieve the artifact a reference points at.
    pub async fn fetch(&self, reference: &ResultRef) -> Result<Artifact, CoreError> {
        let polled = poll_until::<_, Infallible, _, _>(self.policy, "artifact", |_| async move {
            Ok(match self.fetch_once(reference).await {
                Ok(content) => Check::Ready(content),
                Err(e) => Check::Pending(e.to_string()),
            })
        })
        .await
        .map_err(|e| match e {
            PollError::Fatal(never) => match never {},
            PollError::Exhausted {
                attempts,
                last_reason,
            } => CoreError::ArtifactExhausted {
                reference: reference.to_string(),
                attempts,
                last_error: last_reason,
            },
        })?;

        debug!(%reference, attempts = polled.attempts, "artifact fetched");
        let id = match reference {
            ResultRef::File(id) | ResultRef::Url(id) => id.clone(),
        };
        Ok(Artifact {
            id,
            content: polled.value,
        })
    }
}
