use std::sync::mpsc::Sender;

/// Progress update sent at coarse milestones of a library scan.
///
/// `current`/`total` are absent while discovery is still counting files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanProgress {
    pub current: Option<usize>,
    pub total: Option<usize>,
    pub message: String,
}

impl ScanProgress {
    pub fn step(current: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            current: Some(current),
            total: Some(total),
            message: message.into(),
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            current: None,
            total: None,
            message: message.into(),
        }
    }

    /// Returns the progress fraction (0.0 to 1.0) if calculable.
    pub fn fraction(&self) -> Option<f64> {
        match (self.current, self.total) {
            (Some(current), Some(total)) if total > 0 => Some(current as f64 / total as f64),
            _ => None,
        }
    }
}

/// Receiver of scan progress. Purely observational.
pub trait ProgressSink {
    fn update(&self, progress: ScanProgress);
}

impl ProgressSink for Sender<ScanProgress> {
    fn update(&self, progress: ScanProgress) {
        // A dropped receiver only means nobody is watching.
        let _ = self.send(progress);
    }
}
