//! The upload form controller.
//!
//! The controller owns no UI. It is handed its collaborators at construction
//! (file input, result region, notifier, diagnostic channel, endpoint) and
//! turns each submit event into at most one asynchronous upload attempt.
//! Attempts are independent: nothing serialises them, and whichever finishes
//! last owns the result region.

use crate::error::UploadError;
use crate::upload::{RenderedResult, SelectedFile, UploadEndpoint, MISSING_FILE_NOTICE};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::Instrument;

pub trait FileInput: Send + Sync {
    /// Current selection list, in selection order.
    fn files(&self) -> Vec<SelectedFile>;
}

pub trait ResultRegion: Send + Sync {
    fn replace(&self, content: RenderedResult);
}

/// Blocking, user-facing notice.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Developer-facing error log; never shown to the user.
pub trait Diagnostics: Send + Sync {
    fn report(&self, attempt: u64, error: &UploadError);
}

pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, attempt: u64, error: &UploadError) {
        tracing::error!(attempt, error = %error, "Error: upload failed");
    }
}

#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[cfg(test)]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug)]
pub enum Submission {
    NoFileSelected,
    InFlight { attempt: u64, handle: JoinHandle<()> },
}

#[derive(Clone)]
pub struct FormElements {
    pub file_input: Arc<dyn FileInput>,
    pub result: Arc<dyn ResultRegion>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct UploadFormController {
    elements: FormElements,
    endpoint: Arc<dyn UploadEndpoint>,
    diagnostics: Arc<dyn Diagnostics>,
    runtime: Handle,
    next_attempt: AtomicU64,
}

impl UploadFormController {
    pub fn new(
        elements: FormElements,
        endpoint: Arc<dyn UploadEndpoint>,
        diagnostics: Arc<dyn Diagnostics>,
        runtime: Handle,
    ) -> Self {
        Self {
            elements,
            endpoint,
            diagnostics,
            runtime,
            next_attempt: AtomicU64::new(1),
        }
    }

    pub fn submit(&self, event: &mut SubmitEvent) -> Submission {
        event.prevent_default();

        let Some(file) = self.elements.file_input.files().into_iter().next() else {
            tracing::debug!("Submit without a selected file");
            self.elements.notifier.alert(MISSING_FILE_NOTICE);
            return Submission::NoFileSelected;
        };

        let attempt = self.next_attempt.fetch_add(1, Ordering::Relaxed);
        let span = tracing::info_span!("upload", attempt, file = %file.name);
        tracing::info!(parent: &span, "Submitting file");

        let endpoint = Arc::clone(&self.endpoint);
        let result = Arc::clone(&self.elements.result);
        let diagnostics = Arc::clone(&self.diagnostics);

        let handle = self.runtime.spawn(
            async move {
                let rendered = match endpoint.upload(file).await {
                    Ok(response) => {
                        tracing::info!(success = response.is_success(), "Upload finished");
                        response.render()
                    }
                    Err(error) => {
                        diagnostics.report(attempt, &error);
                        RenderedResult::failure()
                    }
                };
                result.replace(rendered);
            }
            .instrument(span),
        );

        Submission::InFlight { attempt, handle }
    }
}
