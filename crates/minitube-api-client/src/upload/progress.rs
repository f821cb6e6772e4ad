use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Integer percentage of bytes delivered to storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadProgress {
    pub percent_complete: u8,
}

type Callback = Box<dyn FnMut(UploadProgress) + Send>;

struct Emitter {
    last: Option<u8>,
    halted: bool,
    callback: Callback,
}

/// Turns byte counts into monotonic percentage callbacks.
///
/// Cloned into the body stream; all clones share one callback.
#[derive(Clone)]
pub(crate) struct ProgressReporter {
    total: u64,
    sent: Arc<AtomicU64>,
    emitter: Arc<Mutex<Emitter>>,
}

impl ProgressReporter {
    pub(crate) fn new(total: u64, callback: impl FnMut(UploadProgress) + Send + 'static) -> Self {
        Self {
            total,
            sent: Arc::new(AtomicU64::new(0)),
            emitter: Arc::new(Mutex::new(Emitter {
                last: None,
                halted: false,
                callback: Box::new(callback),
            })),
        }
    }

    /// Record `bytes` more as sent.
    pub(crate) fn advance(&self, bytes: u64) {
        let sent = self.sent.fetch_add(bytes, Ordering::SeqCst) + bytes;
        if self.total == 0 {
            return;
        }
        let percent = ((sent.min(self.total) as f64 * 100.0) / self.total as f64).round() as u8;
        self.emit(percent);
    }

    /// Report completion; emits 100 unless it was already reported.
    pub(crate) fn finish(&self) {
        self.emit(100);
    }

    /// Stop all further callbacks.
    pub(crate) fn halt(&self) {
        if let Ok(mut emitter) = self.emitter.lock() {
            emitter.halted = true;
        }
    }

    pub(crate) fn bytes_sent(&self) -> u64 {
        self.sent.load(Ordering::SeqCst)
    }

    fn emit(&self, percent: u8) {
        // A poisoned lock means a callback panicked; stay silent from then on
        let Ok(mut emitter) = self.emitter.lock() else {
            return;
        };
        if emitter.halted || emitter.last.is_some_and(|last| percent <= last) {
            return;
        }
        emitter.last = Some(percent);
        (emitter.callback)(UploadProgress {
            percent_complete: percent,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording(total: u64) -> (ProgressReporter, Arc<Mutex<Vec<u8>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let reporter = ProgressReporter::new(total, move |p| {
            sink.lock().unwrap().push(p.percent_complete)
        });
        (reporter, seen)
    }

    #[test]
    fn test_rounds_and_skips_repeats() {
        let (reporter, seen) = recording(1000);
        for _ in 0..4 {
            reporter.advance(1);
        }
        reporter.advance(500);
        reporter.advance(495);
        reporter.finish();
        // 4/1000 rounds to 0, 504/1000 to 50, 999/1000 to 100
        assert_eq!(*seen.lock().unwrap(), vec![0, 50, 100]);
        assert_eq!(reporter.bytes_sent(), 999);
    }

    #[test]
    fn test_sequence_is_strictly_increasing() {
        let (reporter, seen) = recording(7);
        for _ in 0..7 {
            reporter.advance(1);
        }
        reporter.finish();
        let seen = seen.lock().unwrap();
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(seen.last(), Some(&100));
    }

    #[test]
    fn test_empty_file_reports_completion_once() {
        let (reporter, seen) = recording(0);
        reporter.advance(0);
        reporter.finish();
        reporter.finish();
        assert_eq!(*seen.lock().unwrap(), vec![100]);
    }

    #[test]
    fn test_halt_silences_reporter() {
        let (reporter, seen) = recording(100);
        reporter.advance(10);
        reporter.halt();
        reporter.advance(50);
        reporter.finish();
        assert_eq!(*seen.lock().unwrap(), vec![10]);
    }
}
