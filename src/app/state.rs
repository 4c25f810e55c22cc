use crate::controller::{FileInput, Notifier, ResultRegion};
use crate::upload::{RenderedResult, SelectedFile};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Backs the file picker row.
#[derive(Default)]
pub struct SelectionState {
    files: Mutex<Vec<SelectedFile>>,
}

impl SelectionState {
    pub fn select(&self, file: SelectedFile) {
        *lock(&self.files) = vec![file];
    }

    pub fn clear(&self) {
        lock(&self.files).clear();
    }

    pub fn first(&self) -> Option<SelectedFile> {
        lock(&self.files).first().cloned()
    }
}

impl FileInput for SelectionState {
    fn files(&self) -> Vec<SelectedFile> {
        lock(&self.files).clone()
    }
}

/// A pending modal notice. While one is set the form is disabled.
pub struct NoticeState {
    pending: Mutex<Option<String>>,
    ctx: egui::Context,
}

impl NoticeState {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            pending: Mutex::new(None),
            ctx,
        }
    }

    pub fn current(&self) -> Option<String> {
        lock(&self.pending).clone()
    }

    pub fn dismiss(&self) {
        *lock(&self.pending) = None;
    }
}

impl Notifier for NoticeState {
    fn alert(&self, message: &str) {
        *lock(&self.pending) = Some(message.to_string());
        self.ctx.request_repaint();
    }
}

pub struct ResultState {
    content: Mutex<Option<RenderedResult>>,
    ctx: egui::Context,
}

impl ResultState {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            content: Mutex::new(None),
            ctx,
        }
    }

    pub fn current(&self) -> Option<RenderedResult> {
        lock(&self.content).clone()
    }
}

impl ResultRegion for ResultState {
    fn replace(&self, content: RenderedResult) {
        *lock(&self.content) = Some(content);
        self.ctx.request_repaint();
    }
}

/// Footer status line, written by background server requests.
pub struct StatusLine {
    text: Mutex<Option<String>>,
    ctx: egui::Context,
}

impl StatusLine {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            text: Mutex::new(None),
            ctx,
        }
    }

    pub fn set(&self, text: impl Into<String>) {
        *lock(&self.text) = Some(text.into());
        self.ctx.request_repaint();
    }

    pub fn current(&self) -> Option<String> {
        lock(&self.text).clone()
    }
}

/// Attempts started from this window that have not finished yet.
#[derive(Default)]
pub struct InFlight {
    handles: Vec<JoinHandle<()>>,
}

impl InFlight {
    pub fn push(&mut self, handle: JoinHandle<()>) {
        self.handles.push(handle);
    }

    pub fn pending(&mut self) -> usize {
        self.handles.retain(|handle| !handle.is_finished());
        self.handles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selecting_replaces_previous_file() {
        let selection = SelectionState::default();
        selection.select(SelectedFile::from_bytes("a.conf", vec![1]));
        selection.select(SelectedFile::from_bytes("b.conf", vec![2]));

        let files = selection.files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "b.conf");

        selection.clear();
        assert!(selection.first().is_none());
    }

    #[test]
    fn notice_is_held_until_dismissed() {
        let notice = NoticeState::new(egui::Context::default());
        assert!(notice.current().is_none());

        notice.alert("Please select a file to upload.");
        assert_eq!(notice.current().as_deref(), Some("Please select a file to upload."));

        notice.dismiss();
        assert!(notice.current().is_none());
    }

    #[test]
    fn result_keeps_only_latest_content() {
        let result = ResultState::new(egui::Context::default());
        result.replace(RenderedResult::preformatted("first"));
        result.replace(RenderedResult::preformatted("second"));
        assert_eq!(result.current(), Some(RenderedResult::preformatted("second")));
    }

    #[tokio::test]
    async fn attempt_stays_pending_until_it_completes() {
        let (release, gate) = tokio::sync::oneshot::channel::<()>();
        let mut in_flight = InFlight::default();
        in_flight.push(tokio::spawn(async move {
            let _ = gate.await;
        }));

        tokio::task::yield_now().await;
        assert_eq!(in_flight.pending(), 1);

        release.send(()).unwrap();
        while in_flight.pending() > 0 {
            tokio::task::yield_now().await;
        }
        assert_eq!(in_flight.pending(), 0);
    }
}
