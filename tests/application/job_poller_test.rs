use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use transcript_gateway::application::ports::ProviderError;
use transcript_gateway::application::services::{DEFAULT_POLL_INTERVAL, JobPoller, PollError};
use transcript_gateway::domain::{JobId, Transcript};

use crate::helpers::{ScriptedProvider, Step, snapshot};

fn poller_for(provider: &Arc<ScriptedProvider>) -> JobPoller {
    JobPoller::new(provider.clone(), DEFAULT_POLL_INTERVAL)
}

fn job(id: &str) -> JobId {
    JobId::parse(id).unwrap()
}

#[tokio::test(start_paused = true)]
async fn given_two_queued_and_processing_when_waiting_then_fetches_four_times_three_seconds_apart() {
    let provider = Arc::new(ScriptedProvider::new(
        "abc123",
        vec![
            Step::Status("queued"),
            Step::Status("queued"),
            Step::Status("processing"),
            Step::Snapshot(Transcript {
                text: Some("hello world".to_string()),
                language_code: Some("pt".to_string()),
                ..snapshot("abc123", Some("completed"))
            }),
        ],
    ));
    let poller = poller_for(&provider);

    let started = Instant::now();
    let transcript = poller
        .wait_for(&job("abc123"), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(provider.fetch_count(), 4);
    assert_eq!(started.elapsed(), Duration::from_secs(9));
    assert_eq!(transcript.status.as_deref(), Some("completed"));
    assert_eq!(transcript.text.as_deref(), Some("hello world"));
    assert_eq!(transcript.language_code.as_deref(), Some("pt"));
}

#[tokio::test(start_paused = true)]
async fn given_queued_then_completed_when_waiting_then_skipping_processing_is_accepted() {
    let provider = Arc::new(ScriptedProvider::new(
        "abc123",
        vec![Step::Status("queued"), Step::Status("completed")],
    ));

    let result = poller_for(&provider)
        .wait_for(&job("abc123"), &CancellationToken::new())
        .await;

    assert!(result.is_ok());
    assert_eq!(provider.fetch_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn given_error_on_first_fetch_when_waiting_then_fails_immediately_with_detail() {
    let provider = Arc::new(ScriptedProvider::new(
        "abc123",
        vec![Step::Failed("Download error: audio url unreachable")],
    ));

    let started = Instant::now();
    let result = poller_for(&provider)
        .wait_for(&job("abc123"), &CancellationToken::new())
        .await;

    match result {
        Err(PollError::JobFailed(detail)) => {
            assert_eq!(detail, "Download error: audio url unreachable")
        }
        other => panic!("expected JobFailed, got {:?}", other),
    }
    assert_eq!(provider.fetch_count(), 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn given_unrecognized_status_when_waiting_then_returns_unknown_state_without_retry() {
    let provider = Arc::new(ScriptedProvider::new(
        "abc123",
        vec![Step::Status("unknown_blah"), Step::Status("completed")],
    ));

    let result = poller_for(&provider)
        .wait_for(&job("abc123"), &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(PollError::UnknownState(ref raw)) if raw == "unknown_blah"));
    assert_eq!(provider.fetch_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn given_missing_status_when_waiting_then_returns_unknown_state() {
    let provider = Arc::new(ScriptedProvider::new(
        "abc123",
        vec![Step::Snapshot(snapshot("abc123", None))],
    ));

    let result = poller_for(&provider)
        .wait_for(&job("abc123"), &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(PollError::UnknownState(_))));
    assert_eq!(provider.fetch_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn given_transport_failure_mid_poll_when_waiting_then_aborts_without_retry() {
    let provider = Arc::new(ScriptedProvider::new(
        "abc123",
        vec![
            Step::Status("queued"),
            Step::TransportFailure,
            Step::Status("completed"),
        ],
    ));

    let result = poller_for(&provider)
        .wait_for(&job("abc123"), &CancellationToken::new())
        .await;

    assert!(matches!(
        result,
        Err(PollError::Provider(ProviderError::Unavailable(_)))
    ));
    assert_eq!(provider.fetch_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn given_snapshot_for_another_job_when_waiting_then_reports_malformed_response() {
    let provider = Arc::new(ScriptedProvider::new(
        "abc123",
        vec![Step::Snapshot(snapshot("zzz999", Some("completed")))],
    ));

    let result = poller_for(&provider)
        .wait_for(&job("abc123"), &CancellationToken::new())
        .await;

    assert!(matches!(
        result,
        Err(PollError::Provider(ProviderError::MalformedResponse(_)))
    ));
}

#[tokio::test(start_paused = true)]
async fn given_cancel_during_wait_when_polling_then_stops_with_cancelled() {
    let provider = Arc::new(ScriptedProvider::new("abc123", vec![Step::Status("queued")]));
    let poller = poller_for(&provider);
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(4)).await;
        trigger.cancel();
    });

    let result = poller.wait_for(&job("abc123"), &cancel).await;

    assert!(matches!(result, Err(PollError::Cancelled)));
    assert_eq!(provider.fetch_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn given_already_cancelled_token_when_waiting_then_never_fetches() {
    let provider = Arc::new(ScriptedProvider::new("abc123", vec![Step::Status("queued")]));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = poller_for(&provider).wait_for(&job("abc123"), &cancel).await;

    assert!(matches!(result, Err(PollError::Cancelled)));
    assert_eq!(provider.fetch_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn given_deadline_when_job_never_finishes_then_times_out() {
    let provider = Arc::new(ScriptedProvider::new("abc123", vec![Step::Status("processing")]));
    let poller = poller_for(&provider).with_timeout(Some(Duration::from_secs(10)));

    let started = Instant::now();
    let result = poller
        .wait_for(&job("abc123"), &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(PollError::TimedOut(limit)) if limit == Duration::from_secs(10)));
    assert_eq!(started.elapsed(), Duration::from_secs(10));
    assert_eq!(provider.fetch_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn given_two_jobs_when_polled_concurrently_then_delays_do_not_serialize() {
    let first = Arc::new(ScriptedProvider::new(
        "job-a",
        vec![
            Step::Status("queued"),
            Step::Status("processing"),
            Step::Status("completed"),
        ],
    ));
    let second = Arc::new(ScriptedProvider::new(
        "job-b",
        vec![
            Step::Status("queued"),
            Step::Status("processing"),
            Step::Status("completed"),
        ],
    ));
    let first_poller = poller_for(&first);
    let second_poller = poller_for(&second);
    let cancel = CancellationToken::new();
    let (job_a, job_b) = (job("job-a"), job("job-b"));

    let started = Instant::now();
    let (a, b) = tokio::join!(
        first_poller.wait_for(&job_a, &cancel),
        second_poller.wait_for(&job_b, &cancel),
    );

    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(started.elapsed(), Duration::from_secs(6));
}
