//! The page surface a submission writes to: error line, result area and
//! loading overlay. Built once at startup and passed to whoever needs it.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

#[derive(Debug, Default)]
pub struct ErrorDisplay {
    text: String,
}

impl ErrorDisplay {
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Default)]
pub struct ResultDisplay {
    html: String,
}

impl ResultDisplay {
    /// Swaps in new markup. Nothing of the previous render is kept.
    pub fn replace(&mut self, html: String) {
        self.html = html;
    }

    pub fn clear(&mut self) {
        self.html.clear();
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct LoadingOverlay {
    visible: Arc<AtomicBool>,
}

impl LoadingOverlay {
    /// Makes the overlay visible until the returned guard is dropped.
    pub fn show(&self) -> LoadingGuard<'_> {
        if self.is_visible() {
            log::debug!("loading overlay already on, overlapping submission");
        }
        self.visible.store(true, Ordering::SeqCst);
        log::debug!("loading overlay on");
        LoadingGuard { overlay: self }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Read-only handle for observers outside the page (progress output,
    /// tests).
    pub fn watcher(&self) -> LoadingWatcher {
        LoadingWatcher {
            visible: Arc::clone(&self.visible),
        }
    }
}

#[must_use = "the overlay hides again as soon as the guard is dropped"]
pub struct LoadingGuard<'a> {
    overlay: &'a LoadingOverlay,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.overlay.visible.store(false, Ordering::SeqCst);
        log::debug!("loading overlay off");
    }
}

#[derive(Debug, Clone)]
pub struct LoadingWatcher {
    visible: Arc<AtomicBool>,
}

impl LoadingWatcher {
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
pub struct PageContext {
    pub error_display: ErrorDisplay,
    pub result_display: ResultDisplay,
    pub loading_overlay: LoadingOverlay,
}

impl PageContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the previous submission's output.
    pub fn reset(&mut self) {
        self.error_display.clear();
        self.result_display.clear();
    }
}
