use log::{log_enabled, Level};
use std::time::Instant;

/// Trace span around one phase of a simulation step.
///
/// Emits a start and end record at trace level; costs nothing else when trace
/// logging is disabled.
pub struct ScopedTimer {
    label: &'static str,
    start: Option<Instant>,
}

impl ScopedTimer {
    pub fn new(label: &'static str) -> Self {
        let start = if log_enabled!(Level::Trace) {
            log::trace!("start {label}");
            Some(Instant::now())
        } else {
            None
        };
        Self { label, start }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if let Some(start) = self.start {
            log::trace!("end {} ({} µs)", self.label, start.elapsed().as_micros());
        }
    }
}
