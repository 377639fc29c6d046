use super::config::FetchConfig;
use super::error::{FetchError, PipelineError};
use super::progress::{Progress, ProgressReporter};
use super::source::ReferenceSource;
use crate::core::mapping::ReferenceMap;
use crate::core::references::ReferenceId;
use tracing::{info, instrument, warn};

/// Fetches every configured reference, one request at a time, in list order.
///
/// The first identifier that cannot be fetched (after any configured retries) aborts the
/// run and the texts collected so far are dropped. On success the returned map holds
/// exactly `config.references`, in that order.
#[instrument(skip_all, name = "fetch_all", fields(count = config.references.len()))]
pub async fn fetch_all<S>(
    source: &S,
    config: &FetchConfig,
    reporter: &ProgressReporter<'_>,
) -> Result<ReferenceMap, PipelineError>
where
    S: ReferenceSource + ?Sized,
{
    reporter.report(Progress::PhaseStart {
        name: "Fetching references",
    });
    reporter.report(Progress::FetchStart {
        total: config.references.len() as u64,
    });
    info!(
        "Fetching {} reference conformers from {}",
        config.references.len(),
        config.base_url
    );

    let mut map = ReferenceMap::with_capacity(config.references.len());
    for &id in &config.references {
        let text = fetch_one(source, id, config, reporter).await?;
        reporter.report(Progress::ReferenceFetched {
            id,
            bytes: text.len(),
        });
        map.insert(id, text)?;
    }
    map.ensure_complete(&config.references)?;

    reporter.report(Progress::FetchFinish);
    reporter.report(Progress::PhaseFinish);
    info!(
        "Fetched {} references ({} bytes)",
        map.len(),
        map.total_bytes()
    );
    Ok(map)
}

async fn fetch_one<S>(
    source: &S,
    id: ReferenceId,
    config: &FetchConfig,
    reporter: &ProgressReporter<'_>,
) -> Result<String, FetchError>
where
    S: ReferenceSource + ?Sized,
{
    let mut attempt = 1;
    loop {
        reporter.report(Progress::ReferenceStarted { id, attempt });
        match source.fetch(id).await {
            Ok(text) => return Ok(text),
            Err(e) if attempt <= config.retries && e.is_retryable() => {
                warn!(reference = %id, attempt, "Fetch failed, retrying: {}", e);
                reporter.report(Progress::RetryScheduled {
                    id,
                    attempt,
                    delay: config.retry_delay,
                });
                tokio::time::sleep(config.retry_delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::FetchConfigBuilder;
    use async_trait::async_trait;
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Serves `HEADER <id>` bodies, failing with queued statuses first where configured.
    #[derive(Default)]
    struct ScriptedSource {
        failures: Mutex<HashMap<ReferenceId, VecDeque<u16>>>,
        calls: Mutex<Vec<ReferenceId>>,
    }

    impl ScriptedSource {
        fn failing(code: &str, statuses: &[u16]) -> Self {
            let source = Self::default();
            source
                .failures
                .lock()
                .unwrap()
                .insert(id(code), statuses.iter().copied().collect());
            source
        }

        fn calls(&self) -> Vec<ReferenceId> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReferenceSource for ScriptedSource {
        async fn fetch(&self, id: ReferenceId) -> Result<String, FetchError> {
            self.calls.lock().unwrap().push(id);
            let failure = self
                .failures
                .lock()
                .unwrap()
                .get_mut(&id)
                .and_then(VecDeque::pop_front);
            match failure {
                Some(status) => Err(FetchError::Status { id, status }),
                None => Ok(format!("HEADER {id}\nEND\n")),
            }
        }
    }

    fn id(code: &str) -> ReferenceId {
        code.parse().unwrap()
    }

    fn config(codes: &[&str], retries: u32) -> FetchConfig {
        FetchConfigBuilder::new()
            .references(codes.iter().map(|c| id(c)).collect())
            .retries(retries)
            .retry_delay(Duration::ZERO)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn fetches_every_reference_in_static_order() {
        let source = ScriptedSource::default();
        let config = FetchConfig {
            retry_delay: Duration::ZERO,
            ..FetchConfig::default()
        };

        let map = fetch_all(&source, &config, &ProgressReporter::new())
            .await
            .unwrap();

        let all: Vec<_> = ReferenceId::all().collect();
        assert_eq!(map.ids().collect::<Vec<_>>(), all);
        assert_eq!(source.calls(), all);
        for reference in all {
            assert_eq!(
                map.get(reference),
                Some(format!("HEADER {reference}\nEND\n").as_str())
            );
        }
    }

    #[tokio::test]
    async fn aborts_on_first_failure_without_fetching_the_rest() {
        let source = ScriptedSource::failing("AA01", &[404]);
        let config = config(&["AA00", "AA01", "AA02"], 0);

        let err = fetch_all(&source, &config, &ProgressReporter::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Fetch(FetchError::Status { status: 404, .. })
        ));
        assert_eq!(source.calls(), vec![id("AA00"), id("AA01")]);
    }

    #[tokio::test]
    async fn retries_server_errors_when_configured() {
        let source = ScriptedSource::failing("AA01", &[503, 502]);
        let config = config(&["AA00", "AA01"], 2);

        let map = fetch_all(&source, &config, &ProgressReporter::new())
            .await
            .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(
            source.calls(),
            vec![id("AA00"), id("AA01"), id("AA01"), id("AA01")]
        );
    }

    #[tokio::test]
    async fn server_error_is_fatal_without_retries() {
        let source = ScriptedSource::failing("AA00", &[500]);
        let config = config(&["AA00", "AA01"], 0);

        let result = fetch_all(&source, &config, &ProgressReporter::new()).await;

        assert!(result.is_err());
        assert_eq!(source.calls(), vec![id("AA00")]);
    }

    #[tokio::test]
    async fn gives_up_after_exhausting_retries() {
        let source = ScriptedSource::failing("AA00", &[500, 500, 500]);
        let config = config(&["AA00"], 1);

        let result = fetch_all(&source, &config, &ProgressReporter::new()).await;

        assert!(result.is_err());
        assert_eq!(source.calls(), vec![id("AA00"), id("AA00")]);
    }

    #[tokio::test]
    async fn client_errors_are_never_retried() {
        let source = ScriptedSource::failing("AA00", &[404]);
        let config = config(&["AA00"], 5);

        let result = fetch_all(&source, &config, &ProgressReporter::new()).await;

        assert!(result.is_err());
        assert_eq!(source.calls(), vec![id("AA00")]);
    }

    #[tokio::test]
    async fn reports_progress_for_each_reference() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));
        let source = ScriptedSource::failing("AA01", &[503]);
        let config = config(&["AA00", "AA01"], 1);

        fetch_all(&source, &config, &reporter).await.unwrap();

        let bytes = "HEADER AA00\nEND\n".len();
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                Progress::PhaseStart {
                    name: "Fetching references"
                },
                Progress::FetchStart { total: 2 },
                Progress::ReferenceStarted {
                    id: id("AA00"),
                    attempt: 1
                },
                Progress::ReferenceFetched {
                    id: id("AA00"),
                    bytes
                },
                Progress::ReferenceStarted {
                    id: id("AA01"),
                    attempt: 1
                },
                Progress::RetryScheduled {
                    id: id("AA01"),
                    attempt: 1,
                    delay: Duration::ZERO
                },
                Progress::ReferenceStarted {
                    id: id("AA01"),
                    attempt: 2
                },
                Progress::ReferenceFetched {
                    id: id("AA01"),
                    bytes
                },
                Progress::FetchFinish,
                Progress::PhaseFinish,
            ]
        );
    }
}
