use crate::lifecycle::{Disposer, Ticker};
use crate::telemetry::{log_event, LogLevel};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard is not available")]
    Unavailable,
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

pub trait Clipboard {
    fn write_text(&self, text: &str, done: Box<dyn FnOnce(Result<(), ClipboardError>)>);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CopyStatus {
    #[default]
    Idle,
    Copied,
    Failed,
}

struct CopyInner {
    text: String,
    revert_ms: u32,
    log_level: LogLevel,
    ticker: Rc<dyn Ticker>,
    status: Cell<CopyStatus>,
    pending_revert: RefCell<Option<Disposer>>,
    on_status: Box<dyn Fn(CopyStatus)>,
}

impl CopyInner {
    fn set_status(&self, status: CopyStatus) {
        if self.status.replace(status) != status {
            (self.on_status)(status);
        }
    }

    fn settle(inner: &Rc<Self>, result: Result<(), ClipboardError>) {
        match result {
            Ok(()) => inner.set_status(CopyStatus::Copied),
            Err(error) => {
                log_event(
                    inner.log_level,
                    LogLevel::Warn,
                    "clipboard_write_failed",
                    serde_json::json!({ "reason": error.to_string() }),
                );
                inner.set_status(CopyStatus::Failed);
            }
        }

        let weak: Weak<Self> = Rc::downgrade(inner);
        let revert = inner.ticker.after(
            inner.revert_ms,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.set_status(CopyStatus::Idle);
                }
            }),
        );
        // Replacing the previous revert cancels it.
        *inner.pending_revert.borrow_mut() = Some(revert);
    }
}

// Dropping the action cancels a pending revert and ignores an in-flight write.
pub struct CopyAction {
    inner: Rc<CopyInner>,
}

impl CopyAction {
    pub fn new(
        text: impl Into<String>,
        revert_ms: u32,
        log_level: LogLevel,
        ticker: Rc<dyn Ticker>,
        on_status: impl Fn(CopyStatus) + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(CopyInner {
                text: text.into(),
                revert_ms,
                log_level,
                ticker,
                status: Cell::new(CopyStatus::Idle),
                pending_revert: RefCell::new(None),
                on_status: Box::new(on_status),
            }),
        }
    }

    #[cfg(test)]
    fn status(&self) -> CopyStatus {
        self.inner.status.get()
    }

    pub fn trigger(&self, clipboard: &dyn Clipboard) {
        let weak = Rc::downgrade(&self.inner);
        clipboard.write_text(
            &self.inner.text,
            Box::new(move |result| {
                if let Some(inner) = weak.upgrade() {
                    CopyInner::settle(&inner, result);
                }
            }),
        );
    }
}

impl Drop for CopyAction {
    fn drop(&mut self) {
        self.inner.pending_revert.borrow_mut().take();
    }
}
