//! Runs fetches off the interaction thread and posts results back.
//!
//! The presentation layer owns the displayed list; this service only ever
//! hands it a fresh, fully-decoded replacement (or a transient notice), so
//! list mutation never races with rendering.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::mpsc;

use crate::{
    error::{FetchError, ForecastFailure},
    model::{ForecastEntry, ForecastQuery},
    source::ForecastSource,
};

/// Message delivered back to the interaction side when a fetch completes.
#[derive(Debug)]
pub enum Update {
    /// A complete replacement for the displayed list.
    Forecast(Vec<ForecastEntry>),
    /// The fetch failed; the previous list stays as it was.
    Notice(Notice),
}

/// Transient, non-blocking user notification for a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ConnectionTrouble,
    ReadInterrupted,
    BadLocation,
    UnreadableForecast,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::ConnectionTrouble => "Unable to reach the forecast service",
            Notice::ReadInterrupted => "The connection dropped while reading the forecast",
            Notice::BadLocation => "That location cannot be looked up",
            Notice::UnreadableForecast => "The forecast service sent an unreadable answer",
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<&ForecastFailure> for Notice {
    fn from(failure: &ForecastFailure) -> Self {
        match failure {
            ForecastFailure::Input(_) => Notice::BadLocation,
            ForecastFailure::Fetch(FetchError::ConnectionFailed(_))
            | ForecastFailure::Fetch(FetchError::ServerError(_)) => Notice::ConnectionTrouble,
            ForecastFailure::Fetch(FetchError::ReadFailed(_)) => Notice::ReadInterrupted,
            ForecastFailure::Decode(_) => Notice::UnreadableForecast,
        }
    }
}

/// One-outstanding-request fetch service.
///
/// Submissions made while a fetch is in flight are ignored rather than
/// queued or cancelled.
#[derive(Debug)]
pub struct ForecastService {
    source: Arc<dyn ForecastSource>,
    updates: mpsc::UnboundedSender<Update>,
    busy: Arc<AtomicBool>,
}

impl ForecastService {
    /// Create the service and the receiving end of its update channel.
    pub fn new(source: Arc<dyn ForecastSource>) -> (Self, mpsc::UnboundedReceiver<Update>) {
        let (updates, receiver) = mpsc::unbounded_channel();

        let service = Self {
            source,
            updates,
            busy: Arc::new(AtomicBool::new(false)),
        };

        (service, receiver)
    }

    /// Start fetching on a worker task.
    ///
    /// Returns `false` (and does nothing) while another fetch is still in
    /// flight.
    pub fn submit(&self, query: ForecastQuery) -> bool {
        if self.busy.swap(true, Ordering::SeqCst) {
            tracing::debug!(location = %query.location, "fetch in flight, submission ignored");
            return false;
        }

        let source = Arc::clone(&self.source);
        let updates = self.updates.clone();
        let busy = Arc::clone(&self.busy);

        tokio::spawn(async move {
            let update = match source.fetch(&query).await {
                Ok(entries) => Update::Forecast(entries),
                Err(failure) => {
                    tracing::warn!(location = %query.location, %failure, "forecast fetch failed");
                    Update::Notice(Notice::from(&failure))
                }
            };

            // Clear the flag before posting so the receiver may resubmit
            // straight away.
            busy.store(false, Ordering::SeqCst);
            let _ = updates.send(update);
        });

        true
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DecodeError, InvalidInput};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    #[derive(Debug)]
    struct FixedSource {
        entries: Vec<ForecastEntry>,
    }

    #[async_trait]
    impl ForecastSource for FixedSource {
        async fn fetch(
            &self,
            _query: &ForecastQuery,
        ) -> Result<Vec<ForecastEntry>, ForecastFailure> {
            Ok(self.entries.clone())
        }
    }

    #[derive(Debug)]
    struct FailingSource;

    #[async_trait]
    impl ForecastSource for FailingSource {
        async fn fetch(
            &self,
            _query: &ForecastQuery,
        ) -> Result<Vec<ForecastEntry>, ForecastFailure> {
            Err(FetchError::ServerError(404).into())
        }
    }

    #[derive(Debug)]
    struct GatedSource {
        gate: Arc<Notify>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ForecastSource for GatedSource {
        async fn fetch(
            &self,
            _query: &ForecastQuery,
        ) -> Result<Vec<ForecastEntry>, ForecastFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(Vec::new())
        }
    }

    fn entry(timestamp: i64) -> ForecastEntry {
        ForecastEntry {
            timestamp,
            temp_min: 40.0,
            temp_max: 55.0,
            humidity: 60.0,
            description: "light rain".into(),
            icon: "10d".into(),
        }
    }

    #[tokio::test]
    async fn delivers_a_fresh_forecast() {
        let source = Arc::new(FixedSource {
            entries: vec![entry(1), entry(2)],
        });
        let (service, mut updates) = ForecastService::new(source);

        assert!(service.submit(ForecastQuery::new("London")));

        match updates.recv().await.expect("one update") {
            Update::Forecast(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].description, "light rain");
            }
            Update::Notice(notice) => panic!("unexpected notice: {notice}"),
        }
        assert!(!service.is_busy());
    }

    #[tokio::test]
    async fn failure_becomes_a_notice_not_a_replacement() {
        let (service, mut updates) = ForecastService::new(Arc::new(FailingSource));

        assert!(service.submit(ForecastQuery::new("Nowhere")));

        match updates.recv().await.expect("one update") {
            Update::Notice(notice) => assert_eq!(notice, Notice::ConnectionTrouble),
            Update::Forecast(_) => panic!("failed fetch must not replace the list"),
        }
    }

    #[tokio::test]
    async fn ignores_submissions_while_busy() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(GatedSource {
            gate: Arc::clone(&gate),
            calls: AtomicUsize::new(0),
        });
        let (service, mut updates) = ForecastService::new(source.clone());

        assert!(service.submit(ForecastQuery::new("London")));
        assert!(!service.submit(ForecastQuery::new("Paris")));
        assert!(service.is_busy());

        gate.notify_one();
        assert!(matches!(
            updates.recv().await.expect("one update"),
            Update::Forecast(_)
        ));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        // Once the first fetch finished, a new one is accepted.
        assert!(service.submit(ForecastQuery::new("Paris")));
        gate.notify_one();
        assert!(matches!(
            updates.recv().await.expect("second update"),
            Update::Forecast(_)
        ));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn notices_map_the_failure_taxonomy() {
        let invalid: ForecastFailure = InvalidInput::EmptyLocation.into();
        assert_eq!(Notice::from(&invalid), Notice::BadLocation);

        let server: ForecastFailure = FetchError::ServerError(500).into();
        assert_eq!(Notice::from(&server), Notice::ConnectionTrouble);

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let decode: ForecastFailure = DecodeError::MalformedPayload(json_err).into();
        assert_eq!(Notice::from(&decode), Notice::UnreadableForecast);
    }

    #[test]
    fn connection_and_read_notices_read_differently() {
        assert_ne!(
            Notice::ConnectionTrouble.message(),
            Notice::ReadInterrupted.message()
        );
    }
}
