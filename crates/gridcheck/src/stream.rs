//! Fidelity checking over a row event stream
//!
//! A streamed document arrives as [`RowEvent::Row`] snapshots in strictly
//! increasing row order, then a single [`RowEvent::End`]. Each snapshot is
//! checked as it arrives, using only that row's data, and is dropped before
//! the next one is read.

use std::collections::BTreeSet;
use std::time::Duration;

use gridcheck_core::{RowEvent, RowSnapshot, Worksheet};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::checker::FidelityChecker;
use crate::error::FidelityError;
use crate::profile::FidelityProfile;

type CheckResult = Result<(), FidelityError>;

/// Checks a row event stream against the reference layout
///
/// Only feature rows travel in a stream. Views, sheet properties and the
/// data validation sheet are checked by [`FidelityChecker::check`].
#[derive(Debug, Clone)]
pub struct StreamingFidelityChecker {
    inner: FidelityChecker,
}

impl StreamingFidelityChecker {
    pub fn new(profile: FidelityProfile) -> Self {
        Self {
            inner: FidelityChecker::new(profile),
        }
    }

    pub fn profile(&self) -> &FidelityProfile {
        self.inner.profile()
    }

    /// Check a synchronous event source
    ///
    /// The source must be exhausted right after [`RowEvent::End`]; anything
    /// following it fails with [`FidelityError::EventAfterEnd`].
    pub fn check_events<I>(&self, events: I) -> CheckResult
    where
        I: IntoIterator<Item = RowEvent>,
    {
        let mut state = StreamState::new(&self.inner);
        let mut events = events.into_iter();
        while let Some(event) = events.next() {
            match event {
                RowEvent::Row(row) => state.on_row(&row)?,
                RowEvent::End => {
                    if let Some(extra) = events.next() {
                        return Err(after_end(&extra));
                    }
                    return state.finish();
                }
            }
        }
        Err(state.incomplete())
    }

    /// Check events from a channel
    ///
    /// Resolves once [`RowEvent::End`] has been received. A channel that
    /// closes first fails with [`FidelityError::IncompleteStream`]. Events
    /// already queued behind `End` fail with [`FidelityError::EventAfterEnd`];
    /// nothing is read after that.
    pub async fn check(&self, rx: mpsc::Receiver<RowEvent>) -> CheckResult {
        self.drive(rx, None).await
    }

    /// As [`check`](Self::check), treating a stream that has not completed
    /// within `timeout` as incomplete
    pub async fn check_with_timeout(
        &self,
        rx: mpsc::Receiver<RowEvent>,
        timeout: Duration,
    ) -> CheckResult {
        self.drive(rx, Some(Instant::now() + timeout)).await
    }

    async fn drive(
        &self,
        mut rx: mpsc::Receiver<RowEvent>,
        deadline: Option<Instant>,
    ) -> CheckResult {
        let mut state = StreamState::new(&self.inner);
        loop {
            let event = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, rx.recv()).await {
                    Ok(event) => event,
                    Err(_) => {
                        tracing::warn!(last_row = ?state.last_row, "row stream timed out");
                        return Err(state.incomplete());
                    }
                },
                None => rx.recv().await,
            };

            match event {
                Some(RowEvent::Row(row)) => state.on_row(&row)?,
                Some(RowEvent::End) => {
                    if let Ok(extra) = rx.try_recv() {
                        return Err(after_end(&extra));
                    }
                    return state.finish();
                }
                None => return Err(state.incomplete()),
            }
        }
    }
}

/// Progress through one stream
struct StreamState<'a> {
    checker: &'a FidelityChecker,
    last_row: Option<u32>,
    pending: BTreeSet<u32>,
}

impl<'a> StreamState<'a> {
    fn new(checker: &'a FidelityChecker) -> Self {
        Self {
            checker,
            last_row: None,
            pending: checker.expected_rows(),
        }
    }

    fn on_row(&mut self, row: &RowSnapshot) -> CheckResult {
        let number = row.number();
        if let Some(previous) = self.last_row {
            if number <= previous {
                return Err(FidelityError::OutOfOrderRow {
                    previous,
                    row: number,
                });
            }
        }

        tracing::trace!(row = number, cells = row.cells().len(), "checking row");
        self.checker.check_row(row, number)?;
        self.pending.remove(&number);
        self.last_row = Some(number);
        Ok(())
    }

    fn finish(self) -> CheckResult {
        if let Some(&missing) = self.pending.iter().next() {
            return Err(FidelityError::MissingRow(missing));
        }
        tracing::debug!(last_row = ?self.last_row, "row stream complete");
        Ok(())
    }

    fn incomplete(&self) -> FidelityError {
        FidelityError::IncompleteStream {
            last_row: self.last_row,
        }
    }
}

fn after_end(event: &RowEvent) -> FidelityError {
    let row = match event {
        RowEvent::Row(row) => Some(row.number()),
        RowEvent::End => None,
    };
    FidelityError::EventAfterEnd { row }
}

/// Push a sheet's row events into `tx` from a background task
///
/// With a channel of capacity 1 at most one row is in flight. The task stops
/// early if the receiver is dropped.
pub fn spawn_row_producer(sheet: &Worksheet, tx: mpsc::Sender<RowEvent>) -> JoinHandle<()> {
    let events: Vec<RowEvent> = sheet.row_events().collect();
    tokio::spawn(async move {
        for event in events {
            if tx.send(event).await.is_err() {
                tracing::debug!("row consumer went away");
                return;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DocumentBuilder;
    use gridcheck_core::{CellValue, Workbook};
    use pretty_assertions::assert_eq;

    fn reference() -> Workbook {
        DocumentBuilder::new().build().unwrap()
    }

    fn events(workbook: &Workbook) -> Vec<RowEvent> {
        workbook.worksheet(0).unwrap().row_events().collect()
    }

    #[test]
    fn test_reduced_model_stream_passes() {
        let checker = StreamingFidelityChecker::new(FidelityProfile::reduced_model());
        checker.check_events(events(&reference())).unwrap();
    }

    #[test]
    fn test_missing_end_is_incomplete() {
        let mut evts = events(&reference());
        assert_eq!(evts.pop(), Some(RowEvent::End));

        let checker = StreamingFidelityChecker::new(FidelityProfile::reduced_model());
        assert_eq!(
            checker.check_events(evts),
            Err(FidelityError::IncompleteStream { last_row: Some(10) })
        );
    }

    #[test]
    fn test_out_of_order_rows_rejected() {
        let wb = reference();
        let sheet = wb.worksheet(0).unwrap();
        let evts = vec![
            RowEvent::Row(RowSnapshot::capture(sheet, 1)),
            RowEvent::Row(RowSnapshot::capture(sheet, 3)),
            RowEvent::Row(RowSnapshot::capture(sheet, 2)),
            RowEvent::End,
        ];

        let checker = StreamingFidelityChecker::new(FidelityProfile::reduced_model());
        assert_eq!(
            checker.check_events(evts),
            Err(FidelityError::OutOfOrderRow {
                previous: 3,
                row: 2
            })
        );
    }

    #[test]
    fn test_skipped_row_reported_missing() {
        let evts: Vec<RowEvent> = events(&reference())
            .into_iter()
            .filter(|e| !matches!(e, RowEvent::Row(r) if r.number() == 4))
            .collect();

        let checker = StreamingFidelityChecker::new(FidelityProfile::reduced_model());
        assert_eq!(checker.check_events(evts), Err(FidelityError::MissingRow(4)));
    }

    #[test]
    fn test_rows_after_end_rejected() {
        let wb = reference();
        let mut evts = events(&wb);
        evts.push(RowEvent::Row(RowSnapshot::new(11, None)));

        let checker = StreamingFidelityChecker::new(FidelityProfile::reduced_model());
        assert_eq!(
            checker.check_events(evts),
            Err(FidelityError::EventAfterEnd { row: Some(11) })
        );

        let mut evts = events(&wb);
        evts.push(RowEvent::End);
        assert_eq!(
            checker.check_events(evts),
            Err(FidelityError::EventAfterEnd { row: None })
        );
    }

    #[tokio::test]
    async fn test_queued_event_after_end_rejected() {
        let wb = reference();
        let (tx, rx) = mpsc::channel(64);
        for event in events(&wb) {
            tx.send(event).await.unwrap();
        }
        tx.send(RowEvent::End).await.unwrap();
        drop(tx);

        let checker = StreamingFidelityChecker::new(FidelityProfile::reduced_model());
        assert_eq!(
            checker.check(rx).await,
            Err(FidelityError::EventAfterEnd { row: None })
        );
    }

    #[test]
    fn test_row_checked_from_its_own_snapshot() {
        let wb = reference();
        let sheet = wb.worksheet(0).unwrap();
        let mut row1 = RowSnapshot::new(1, None);
        for cell in RowSnapshot::capture(sheet, 1).cells() {
            let mut cell = cell.clone();
            if cell.address.col == 1 {
                cell.value = CellValue::Number(8.0);
            }
            row1.push(cell);
        }

        let checker = StreamingFidelityChecker::new(FidelityProfile::reduced_model());
        let err = checker
            .check_events(vec![RowEvent::Row(row1), RowEvent::End])
            .unwrap_err();
        assert!(matches!(err, FidelityError::ValueMismatch { ref locator, .. } if locator == "A1"));
    }

    #[tokio::test]
    async fn test_channel_stream_passes() {
        let wb = reference();
        let (tx, rx) = mpsc::channel(1);
        let producer = spawn_row_producer(wb.worksheet(0).unwrap(), tx);

        let checker = StreamingFidelityChecker::new(FidelityProfile::reduced_model());
        checker.check(rx).await.unwrap();
        producer.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_channel_is_incomplete() {
        let (tx, rx) = mpsc::channel(1);
        drop(tx);

        let checker = StreamingFidelityChecker::new(FidelityProfile::reduced_model());
        assert_eq!(
            checker.check(rx).await,
            Err(FidelityError::IncompleteStream { last_row: None })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_stream_times_out() {
        let wb = reference();
        let sheet = wb.worksheet(0).unwrap();
        let (tx, rx) = mpsc::channel(1);
        tx.send(RowEvent::Row(RowSnapshot::capture(sheet, 1)))
            .await
            .unwrap();

        let checker = StreamingFidelityChecker::new(FidelityProfile::reduced_model());
        let result = checker
            .check_with_timeout(rx, Duration::from_secs(5))
            .await;
        assert_eq!(
            result,
            Err(FidelityError::IncompleteStream { last_row: Some(1) })
        );
        drop(tx);
    }
}
