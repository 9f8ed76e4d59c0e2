use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Observable export progress shared between an exporter and its readers.
#[derive(Clone, Debug, Default)]
pub struct ProgressCell(Arc<AtomicU64>);

impl ProgressCell {
    /// Last reported fraction in `[0, 1]`.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Release);
    }
}

/// Forwards export progress to a callback.
///
/// Values are clamped to `[0, 1]`, never go backwards, and `1.0` is emitted at most once. After
/// completion further reports are ignored.
pub struct ProgressReporter<'a> {
    callback: &'a mut dyn FnMut(f64),
    cell: Option<ProgressCell>,
    last: Option<f64>,
    completed: bool,
}

impl<'a> ProgressReporter<'a> {
    /// Wrap `callback`.
    pub fn new(callback: &'a mut dyn FnMut(f64)) -> Self {
        Self {
            callback,
            cell: None,
            last: None,
            completed: false,
        }
    }

    /// Mirror every emitted value into `cell`.
    pub fn observed_by(mut self, cell: ProgressCell) -> Self {
        cell.set(0.0);
        self.cell = Some(cell);
        self
    }

    /// Report a fraction of work done. `1.0` (or more) completes the reporter.
    pub fn report(&mut self, fraction: f64) {
        if self.completed || fraction.is_nan() {
            return;
        }
        let value = fraction.clamp(0.0, 1.0);
        if value >= 1.0 {
            self.complete();
            return;
        }
        if self.last.is_some_and(|last| value <= last) {
            return;
        }
        self.emit(value);
    }

    /// Emit `1.0` unless already done.
    pub fn complete(&mut self) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.emit(1.0);
    }

    /// `true` once `1.0` was emitted.
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Last emitted value.
    pub fn last(&self) -> Option<f64> {
        self.last
    }

    fn emit(&mut self, value: f64) {
        self.last = Some(value);
        if let Some(cell) = &self.cell {
            cell.set(value);
        }
        (self.callback)(value);
    }
}
