//! Progress reporting for the orchestration layer
//!
//! The crawl core never prints; it hands human-readable status strings to an
//! injected sink. Consumers must not assume a fixed call count or interval,
//! only that messages arrive in order as the run advances.

use std::fmt;
use std::sync::Arc;

/// Injected sink for human-readable crawl progress
///
/// Cheap to clone; all clones feed the same callback.
#[derive(Clone)]
pub struct ProgressReporter {
    sink: Arc<dyn Fn(&str) + Send + Sync>,
}

impl ProgressReporter {
    /// Creates a reporter that forwards every message to `sink`
    pub fn new(sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Creates a reporter that discards every message
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    /// Emits a status message
    pub fn report(&self, message: &str) {
        (self.sink)(message);
    }

    /// Emits a status message with completion counts appended, for UIs that
    /// parse out a progress fraction
    pub fn report_fraction(&self, message: &str, done: usize, total: usize) {
        (self.sink)(&format!("{} ({}/{})", message, done, total));
    }
}

impl fmt::Debug for ProgressReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressReporter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn collecting_reporter() -> (ProgressReporter, Arc<Mutex<Vec<String>>>) {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink_messages = Arc::clone(&messages);
        let reporter = ProgressReporter::new(move |msg| {
            sink_messages.lock().unwrap().push(msg.to_string());
        });
        (reporter, messages)
    }

    #[test]
    fn test_report_forwards_messages_in_order() {
        let (reporter, messages) = collecting_reporter();
        reporter.report("first");
        reporter.report("second");
        assert_eq!(*messages.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_report_fraction_format() {
        let (reporter, messages) = collecting_reporter();
        reporter.report_fraction("Downloading assets", 3, 12);
        assert_eq!(*messages.lock().unwrap(), vec!["Downloading assets (3/12)"]);
    }

    #[test]
    fn test_clones_share_sink() {
        let (reporter, messages) = collecting_reporter();
        let clone = reporter.clone();
        reporter.report("a");
        clone.report("b");
        assert_eq!(messages.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_noop_does_not_panic() {
        let reporter = ProgressReporter::noop();
        reporter.report("ignored");
        reporter.report_fraction("ignored", 1, 2);
    }
}
