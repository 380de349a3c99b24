use std::future::Future;
use std::time::Duration;

use tokio::task::JoinError;
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{JobBackend, JobError, JobHandle, JobRequest, JobStatus};

/// Fixed polling cadence and the ceiling on total wait time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(60),
        }
    }
}

const MIN_INTERVAL: Duration = Duration::from_millis(1);
/// Stand-in deadline for a timeout too large to add to `Instant::now()`.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Runs `work` on its own task with a fresh cancellation token.
///
/// Dropping the returned future (a client disconnect) cancels the token while
/// the task keeps running, so the poller still reaches `Cancelled` and
/// releases the upstream job.
pub async fn run_detached<F, Fut, T>(work: F) -> Result<T, JoinError>
where
    F: FnOnce(CancellationToken) -> Fut,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();
    tokio::spawn(work(cancel)).await
}

/// Drives one job from submission to a terminal state.
///
/// Polls on a fixed interval (first poll immediately after submission), with
/// no backoff and no jitter. The deadline is measured from submission; once it
/// passes no further poll is issued and an in-flight poll is abandoned.
pub struct JobPoller<'a> {
    backend: &'a dyn JobBackend,
    settings: PollSettings,
}

impl<'a> JobPoller<'a> {
    pub fn new(backend: &'a dyn JobBackend, settings: PollSettings) -> Self {
        Self { backend, settings }
    }

    /// Submits `request` and resolves with the job's result text once it
    /// completes. The job's upstream resources are released afterwards,
    /// whatever the outcome.
    pub async fn submit_and_await(
        &self,
        request: &JobRequest,
        cancel: &CancellationToken,
    ) -> Result<String, JobError> {
        if cancel.is_cancelled() {
            return Err(JobError::Cancelled);
        }

        let handle = self.backend.submit(request).await?;
        let outcome = self.await_terminal(&handle, cancel).await;

        if let Err(e) = self.backend.release(&handle).await {
            warn!(
                kind = e.kind(),
                thread_id = %handle.thread_id,
                "Failed to release job resources: {e}"
            );
        }

        outcome
    }

    async fn await_terminal(
        &self,
        handle: &JobHandle,
        cancel: &CancellationToken,
    ) -> Result<String, JobError> {
        let now = Instant::now();
        let deadline = now
            .checked_add(self.settings.timeout)
            .unwrap_or_else(|| now + FAR_FUTURE);
        let mut ticker = interval(self.settings.interval.max(MIN_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut polls: u32 = 0;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(JobError::Cancelled),
                _ = sleep_until(deadline) => return Err(self.timed_out(handle, polls)),
                _ = ticker.tick() => {}
            }

            let job = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(JobError::Cancelled),
                _ = sleep_until(deadline) => return Err(self.timed_out(handle, polls)),
                job = self.backend.poll(handle) => job?,
            };
            polls += 1;

            match job.status {
                JobStatus::Queued | JobStatus::Running => {
                    debug!(
                        run_id = %job.id.run_id,
                        status = ?job.status,
                        polls,
                        "Job not settled yet"
                    );
                }
                JobStatus::Completed => {
                    debug!(run_id = %handle.run_id, polls, "Job completed");
                    return job.result.ok_or(JobError::MissingResult);
                }
                JobStatus::Failed => {
                    return Err(JobError::Failed(
                        job.last_error
                            .unwrap_or_else(|| "Unknown error".to_string()),
                    ));
                }
                JobStatus::Expired => return Err(JobError::Expired),
            }
        }
    }

    fn timed_out(&self, handle: &JobHandle, polls: u32) -> JobError {
        warn!(
            run_id = %handle.run_id,
            polls,
            "Job did not settle within {}s",
            self.settings.timeout.as_secs()
        );
        JobError::Timeout(self.settings.timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::AsyncJob;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Replays a fixed sequence of statuses; repeats the last one forever.
    struct ScriptedBackend {
        script: Mutex<VecDeque<(JobStatus, Option<&'static str>)>>,
        poll_delay: Option<Duration>,
        submits: AtomicUsize,
        polls: AtomicUsize,
        releases: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new(script: Vec<(JobStatus, Option<&'static str>)>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                poll_delay: None,
                submits: AtomicUsize::new(0),
                polls: AtomicUsize::new(0),
                releases: AtomicUsize::new(0),
            }
        }

        fn with_poll_delay(mut self, delay: Duration) -> Self {
            self.poll_delay = Some(delay);
            self
        }

        fn polls(&self) -> usize {
            self.polls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl JobBackend for ScriptedBackend {
        async fn submit(&self, _request: &JobRequest) -> Result<JobHandle, JobError> {
            self.submits.fetch_add(1, Ordering::SeqCst);
            Ok(JobHandle {
                thread_id: "thread_1".to_string(),
                run_id: "run_1".to_string(),
            })
        }

        async fn poll(&self, handle: &JobHandle) -> Result<AsyncJob, JobError> {
            self.polls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.poll_delay {
                tokio::time::sleep(delay).await;
            }
            let (status, payload) = {
                let mut script = self.script.lock().unwrap();
                if script.len() > 1 {
                    script.pop_front().unwrap()
                } else {
                    *script.front().unwrap()
                }
            };
            let (result, last_error) = match status {
                JobStatus::Completed => (payload.map(str::to_string), None),
                JobStatus::Failed => (None, payload.map(str::to_string)),
                _ => (None, None),
            };
            Ok(AsyncJob {
                id: handle.clone(),
                status,
                result,
                last_error,
            })
        }

        async fn release(&self, _handle: &JobHandle) -> Result<(), JobError> {
            self.releases.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn request() -> JobRequest {
        JobRequest {
            assistant_id: "asst_1".to_string(),
            content: "hello".to_string(),
        }
    }

    fn settings(interval_secs: u64, timeout_secs: u64) -> PollSettings {
        PollSettings {
            interval: Duration::from_secs(interval_secs),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_job_returns_result_once() {
        let backend = ScriptedBackend::new(vec![
            (JobStatus::Queued, None),
            (JobStatus::Running, None),
            (JobStatus::Completed, Some("the answer")),
        ]);
        let poller = JobPoller::new(&backend, settings(1, 60));

        let result = poller
            .submit_and_await(&request(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(result, "the answer");
        assert_eq!(backend.submits.load(Ordering::SeqCst), 1);
        assert_eq!(backend.polls(), 3);
        assert_eq!(backend.releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_on_fixed_interval() {
        let backend = ScriptedBackend::new(vec![
            (JobStatus::Running, None),
            (JobStatus::Running, None),
            (JobStatus::Running, None),
            (JobStatus::Completed, Some("done")),
        ]);
        let poller = JobPoller::new(&backend, settings(1, 60));

        let started = Instant::now();
        poller
            .submit_and_await(&request(), &CancellationToken::new())
            .await
            .unwrap();

        // First poll is immediate, then one per second.
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_job_carries_upstream_message() {
        let backend = ScriptedBackend::new(vec![
            (JobStatus::Running, None),
            (JobStatus::Failed, Some("quota exhausted")),
        ]);
        let poller = JobPoller::new(&backend, settings(1, 60));

        let err = poller
            .submit_and_await(&request(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::Failed(ref msg) if msg == "quota exhausted"));
        assert_eq!(backend.releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_job_without_message_reports_unknown_error() {
        let backend = ScriptedBackend::new(vec![(JobStatus::Failed, None)]);
        let poller = JobPoller::new(&backend, settings(1, 60));

        let err = poller
            .submit_and_await(&request(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Run failed: Unknown error");
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_job() {
        let backend =
            ScriptedBackend::new(vec![(JobStatus::Queued, None), (JobStatus::Expired, None)]);
        let poller = JobPoller::new(&backend, settings(1, 60));

        let err = poller
            .submit_and_await(&request(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::Expired));
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_without_result_is_an_error() {
        let backend = ScriptedBackend::new(vec![(JobStatus::Completed, None)]);
        let poller = JobPoller::new(&backend, settings(1, 60));

        let err = poller
            .submit_and_await(&request(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::MissingResult));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stuck_job_times_out_and_stops_polling() {
        let backend = ScriptedBackend::new(vec![(JobStatus::Running, None)]);
        let poller = JobPoller::new(&backend, settings(1, 5));

        let started = Instant::now();
        let err = poller
            .submit_and_await(&request(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::Timeout(d) if d == Duration::from_secs(5)));
        assert_eq!(started.elapsed(), Duration::from_secs(5));
        // Polls at t = 0, 1, 2, 3, 4; the deadline wins the tie at t = 5.
        assert_eq!(backend.polls(), 5);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(backend.polls(), 5);
        assert_eq!(backend.releases.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_poll_is_abandoned_at_deadline() {
        let backend = ScriptedBackend::new(vec![(JobStatus::Completed, Some("late"))])
            .with_poll_delay(Duration::from_secs(10));
        let poller = JobPoller::new(&backend, settings(1, 3));

        let started = Instant::now();
        let err = poller
            .submit_and_await(&request(), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, JobError::Timeout(_)));
        assert_eq!(started.elapsed(), Duration::from_secs(3));
        assert_eq!(backend.polls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_polling() {
        let backend = ScriptedBackend::new(vec![(JobStatus::Running, None)]);
        let poller = JobPoller::new(&backend, settings(1, 60));
        let cancel = CancellationToken::new();

        let canceller = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(2500)).await;
                cancel.cancel();
            })
        };

        let err = poller.submit_and_await(&request(), &cancel).await.unwrap_err();
        canceller.await.unwrap();

        assert!(matches!(err, JobError::Cancelled));
        // Polls at t = 0, 1, 2 before the cancel at t = 2.5.
        assert_eq!(backend.polls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_token_submits_nothing() {
        let backend = ScriptedBackend::new(vec![(JobStatus::Completed, Some("x"))]);
        let poller = JobPoller::new(&backend, PollSettings::default());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = poller.submit_and_await(&request(), &cancel).await.unwrap_err();

        assert!(matches!(err, JobError::Cancelled));
        assert_eq!(backend.submits.load(Ordering::SeqCst), 0);
        assert_eq!(backend.polls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_still_polls() {
        let backend = ScriptedBackend::new(vec![
            (JobStatus::Running, None),
            (JobStatus::Completed, Some("done")),
        ]);
        let poller = JobPoller::new(
            &backend,
            PollSettings {
                interval: Duration::ZERO,
                timeout: Duration::from_secs(60),
            },
        );

        let result = poller
            .submit_and_await(&request(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result, "done");
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_timeout_does_not_overflow() {
        let backend = ScriptedBackend::new(vec![(JobStatus::Completed, Some("done"))]);
        let poller = JobPoller::new(
            &backend,
            PollSettings {
                interval: Duration::from_secs(1),
                timeout: Duration::MAX,
            },
        );

        let result = poller
            .submit_and_await(&request(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(result, "done");
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_caller_cancels_and_releases_detached_job() {
        let backend = Arc::new(ScriptedBackend::new(vec![(JobStatus::Running, None)]));

        let caller = {
            let backend = Arc::clone(&backend);
            run_detached(move |cancel| async move {
                JobPoller::new(&*backend, settings(1, 60))
                    .submit_and_await(&request(), &cancel)
                    .await
            })
        };

        // The caller gives up after 2.5s, dropping its future.
        let abandoned = tokio::time::timeout(Duration::from_millis(2500), caller).await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(backend.releases.load(Ordering::SeqCst), 1);
        assert_eq!(backend.polls(), 3);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(backend.polls(), 3);
    }

    #[tokio::test]
    async fn test_run_detached_returns_work_output() {
        let value = run_detached(|cancel| async move { cancel.is_cancelled() })
            .await
            .unwrap();
        assert!(!value);
    }
}
