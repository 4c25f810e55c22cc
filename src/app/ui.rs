use super::PipelineUploader;
use crate::utils::file_size::format_size;
use eframe::egui::{self, Align, Align2, Color32, RichText};

impl PipelineUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        let notice = self.notice.current();

        egui::CentralPanel::default().show(ctx, |ui| {
            let footer_height = 40.0;
            let content_height = ui.available_height() - footer_height;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Pipeline Formatter Uploader");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Upload a Logstash pipeline to have it checked and re-indented")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);

                    ui.add_enabled_ui(notice.is_none(), |ui| {
                        self.render_form(ui);
                    });

                    ui.add_space(20.0);
                    self.render_result(ui);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(10.0);
                self.render_footer(ui);
            });
        });

        if let Some(message) = notice {
            egui::Window::new("Notice")
                .collapsible(false)
                .resizable(false)
                .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("OK").clicked() {
                            self.notice.dismiss();
                        }
                    });
                });
        }
    }

    fn render_form(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                if ui.button("📄 Select File").clicked() {
                    self.pick_file();
                }
                match self.selection.first() {
                    Some(file) => {
                        let size = file.size.map(format_size).unwrap_or_default();
                        ui.label(format!("Selected: {} {}", file.name, size));
                        if ui.small_button("✖").on_hover_text("Clear selection").clicked() {
                            self.selection.clear();
                        }
                    }
                    None => {
                        ui.label("No file selected");
                    }
                }
            });
        });

        ui.add_space(20.0);

        ui.vertical_centered(|ui| {
            // Stays enabled while uploads are in flight; overlapping attempts are allowed.
            let button = egui::Button::new("📤 Upload").min_size(egui::vec2(200.0, 40.0));
            if ui.add(button).clicked() {
                self.submit();
            }

            let pending = self.in_flight.pending();
            if pending > 0 {
                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    match self.last_attempt {
                        Some(attempt) => ui.label(format!(
                            "Processing {} upload(s)... (latest #{})",
                            pending, attempt
                        )),
                        None => ui.label(format!("Processing {} upload(s)...", pending)),
                    };
                });
            }
        });
    }

    fn render_result(&self, ui: &mut egui::Ui) {
        let Some(result) = self.result.current() else {
            return;
        };

        egui::ScrollArea::both()
            .id_source("result")
            .max_height(300.0)
            .show(ui, |ui| {
                egui::Frame::none()
                    .fill(ui.style().visuals.extreme_bg_color)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        let mut text = result.text.as_str();
                        ui.add(
                            egui::TextEdit::multiline(&mut text)
                                .font(egui::TextStyle::Monospace)
                                .desired_width(f32::INFINITY),
                        );
                    });
            });
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        if let Some(status) = self.status.current() {
            ui.colored_label(Color32::from_rgb(150, 150, 150), status);
            ui.add_space(5.0);
        }

        ui.horizontal(|ui| {
            if ui.button("🌐 Open in browser").clicked() {
                self.open_in_browser();
            }
            if ui.button("⏹ Stop server").clicked() {
                self.stop_server();
            }
            ui.label(
                RichText::new(&self.server_url).color(ui.visuals().text_color().gamma_multiply(0.6)),
            );
        });
    }
}
