use crate::core::references::ReferenceId;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    FetchStart { total: u64 },
    /// A request for `id` is about to be sent. `attempt` starts at 1.
    ReferenceStarted { id: ReferenceId, attempt: u32 },
    ReferenceFetched { id: ReferenceId, bytes: usize },
    RetryScheduled {
        id: ReferenceId,
        attempt: u32,
        delay: Duration,
    },
    FetchFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::FetchStart { total: 96 });
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));
        let id: ReferenceId = "AA00".parse().unwrap();

        reporter.report(Progress::ReferenceStarted { id, attempt: 1 });
        reporter.report(Progress::ReferenceFetched { id, bytes: 42 });

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                Progress::ReferenceStarted { id, attempt: 1 },
                Progress::ReferenceFetched { id, bytes: 42 },
            ]
        );
    }
}
