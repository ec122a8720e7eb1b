use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::application::ports::{ProviderError, TranscriptionProvider};
use crate::domain::{JobId, JobStatus, Transcript};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Drives a submitted job to a terminal state by fetching its status at a fixed interval.
///
/// Fetches for one job are strictly sequential: the next request starts only
/// after the previous response has been handled. Only the not-yet-terminal case
/// is retried; transport and decode failures abort the loop.
pub struct JobPoller {
    provider: Arc<dyn TranscriptionProvider>,
    interval: Duration,
    timeout: Option<Duration>,
}

impl JobPoller {
    pub fn new(provider: Arc<dyn TranscriptionProvider>, interval: Duration) -> Self {
        Self {
            provider,
            interval,
            timeout: None,
        }
    }

    /// Bounds the whole wait, including every fetch and sleep.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[tracing::instrument(skip_all, fields(job_id = %job_id))]
    pub async fn wait_for(
        &self,
        job_id: &JobId,
        cancel: &CancellationToken,
    ) -> Result<Transcript, PollError> {
        let bounded = async {
            match self.timeout {
                Some(limit) => {
                    match tokio::time::timeout(limit, self.poll_until_terminal(job_id)).await {
                        Ok(result) => result,
                        Err(_) => {
                            tracing::warn!(?limit, "Job did not finish before the deadline");
                            Err(PollError::TimedOut(limit))
                        }
                    }
                }
                None => self.poll_until_terminal(job_id).await,
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::warn!("Polling cancelled before the job reached a terminal state");
                Err(PollError::Cancelled)
            }
            result = bounded => result,
        }
    }

    async fn poll_until_terminal(&self, job_id: &JobId) -> Result<Transcript, PollError> {
        let mut attempts: u32 = 0;
        let mut last_seen: Option<JobStatus> = None;

        loop {
            attempts += 1;
            let snapshot = self.provider.fetch_status(job_id).await?;

            if snapshot.id != *job_id {
                return Err(PollError::Provider(ProviderError::MalformedResponse(format!(
                    "requested job {} but provider returned job {}",
                    job_id, snapshot.id
                ))));
            }

            let status = match snapshot.status.as_deref() {
                Some(raw) => raw.parse::<JobStatus>().map_err(PollError::UnknownState)?,
                None => return Err(PollError::UnknownState("null".to_string())),
            };

            if let Some(previous) = last_seen {
                if status.rank() < previous.rank() {
                    tracing::warn!(
                        from = %previous,
                        to = %status,
                        "Provider reported a job moving backwards"
                    );
                }
            }
            last_seen = Some(status);

            match status {
                JobStatus::Queued | JobStatus::Processing => {
                    tracing::debug!(%status, attempts, "Job not finished yet");
                    tokio::time::sleep(self.interval).await;
                }
                JobStatus::Completed => {
                    tracing::info!(attempts, "Transcription job completed");
                    return Ok(snapshot);
                }
                JobStatus::Error => {
                    let detail = snapshot
                        .error
                        .unwrap_or_else(|| "provider gave no error detail".to_string());
                    tracing::warn!(attempts, error = %detail, "Transcription job failed");
                    return Err(PollError::JobFailed(detail));
                }
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("transcription failed: {0}")]
    JobFailed(String),
    #[error("unknown job status: {0}")]
    UnknownState(String),
    #[error("polling cancelled")]
    Cancelled,
    #[error("job did not finish within {0:?}")]
    TimedOut(Duration),
}
