mod state;
mod ui;

use crate::config::UploaderConfig;
use crate::controller::{FormElements, Submission, SubmitEvent, TracingDiagnostics, UploadFormController};
use crate::upload::{HttpUploadEndpoint, SelectedFile};
use eframe::{egui, App};
use rfd::FileDialog;
use state::{InFlight, NoticeState, ResultState, SelectionState, StatusLine};
use std::sync::Arc;
use tokio::runtime::Handle;

pub struct PipelineUploader {
    controller: UploadFormController,
    selection: Arc<SelectionState>,
    notice: Arc<NoticeState>,
    result: Arc<ResultState>,
    status: Arc<StatusLine>,
    endpoint: Arc<HttpUploadEndpoint>,
    in_flight: InFlight,
    last_attempt: Option<u64>,
    server_url: String,
    runtime: Handle,
}

impl PipelineUploader {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &UploaderConfig,
        endpoint: HttpUploadEndpoint,
        runtime: Handle,
    ) -> Self {
        tracing::info!(server = %config.server_url, "Initializing uploader window");

        let ctx = cc.egui_ctx.clone();
        let selection = Arc::new(SelectionState::default());
        let notice = Arc::new(NoticeState::new(ctx.clone()));
        let result = Arc::new(ResultState::new(ctx.clone()));
        let endpoint = Arc::new(endpoint);

        let elements = FormElements {
            file_input: selection.clone(),
            result: result.clone(),
            notifier: notice.clone(),
        };
        let controller = UploadFormController::new(
            elements,
            endpoint.clone(),
            Arc::new(TracingDiagnostics),
            runtime.clone(),
        );

        Self {
            controller,
            selection,
            notice,
            result,
            status: Arc::new(StatusLine::new(ctx)),
            endpoint,
            in_flight: InFlight::default(),
            last_attempt: None,
            server_url: config.server_url.clone(),
            runtime,
        }
    }

    pub fn pick_file(&mut self) {
        if let Some(path) = FileDialog::new().pick_file() {
            tracing::debug!(path = %path.display(), "File selected");
            self.selection.select(SelectedFile::from_path(&path));
        }
    }

    pub fn submit(&mut self) {
        let mut event = SubmitEvent::new();
        if let Submission::InFlight { attempt, handle } = self.controller.submit(&mut event) {
            self.in_flight.push(handle);
            self.last_attempt = Some(attempt);
        }
    }

    pub fn open_in_browser(&self) {
        if let Err(e) = open::that(&self.server_url) {
            tracing::warn!(url = %self.server_url, error = %e, "Could not open browser");
            self.status.set(format!("Could not open browser: {}", e));
        }
    }

    pub fn stop_server(&self) {
        let endpoint = self.endpoint.clone();
        let status = self.status.clone();
        self.runtime.spawn(async move {
            match endpoint.shutdown().await {
                Ok(reply) => status.set(reply),
                Err(e) => {
                    tracing::error!(error = %e, "Shutdown request failed");
                    status.set(format!("Failed to stop server: {}", e));
                }
            }
        });
    }
}

impl App for PipelineUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render(ctx);
    }
}
