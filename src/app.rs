use crate::config::Config;
use crate::grid::{ReviewGrid, Side};
use crate::loader::{LoaderMessage, LoaderResponse, spawn_loader};
use crate::style::configure_style;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

pub struct CotejoApp {
    grid: ReviewGrid,
    config: Config,
    loader_sender: Sender<LoaderMessage>,
    loader_receiver: Receiver<LoaderResponse>,
    status: Option<String>,
}

impl CotejoApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_file: Option<PathBuf>) -> Self {
        configure_style(&cc.egui_ctx);
        let (sender, receiver) = spawn_loader();
        if let Some(path) = initial_file
            && let Err(e) = sender.send(LoaderMessage::Open(path))
        {
            tracing::error!("Failed to queue initial payload: {}", e);
        }
        Self {
            grid: ReviewGrid::default(),
            config: Config::default(),
            loader_sender: sender,
            loader_receiver: receiver,
            status: None,
        }
    }

    fn open_payload_dialog(&self) {
        let sender = self.loader_sender.clone();
        let start_dir = self
            .config
            .settings
            .recent_files
            .first()
            .and_then(|p| p.parent().map(PathBuf::from))
            .unwrap_or_else(|| self.config.data_dir());
        std::thread::spawn(move || {
            if let Some(path) = rfd::FileDialog::new()
                .set_directory(&start_dir)
                .add_filter("JSON", &["json"])
                .pick_file()
                && let Err(e) = sender.send(LoaderMessage::Open(path))
            {
                tracing::error!("Failed to send open message: {}", e);
            }
        });
    }
}

impl eframe::App for CotejoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drain one loader response per frame
        if let Ok(response) = self.loader_receiver.try_recv() {
            match response {
                LoaderResponse::Loaded { path, raw } => {
                    self.grid.load_payload(&raw);
                    self.config.add_recent_file(path.clone());
                    self.status = Some(format!(
                        "{} filas cargadas desde {}",
                        self.grid.len(),
                        path.display()
                    ));
                }
                LoaderResponse::Failed(message) => {
                    self.status = Some(message);
                }
            }
        }

        // Controls
        egui::TopBottomPanel::top("controls_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("📂 Abrir cotejo").clicked() {
                    self.open_payload_dialog();
                }
                ui.separator();
                if ui.button("➕ Blanco esperado").clicked() {
                    self.grid.add_placeholder(Side::Expected);
                }
                if ui.button("➕ Blanco actual").clicked() {
                    self.grid.add_placeholder(Side::Actual);
                }
                ui.separator();
                if ui.button("🔎 Comparar filas").clicked() {
                    self.grid.classify_rows();
                }
                if ui.button("🧹 Quitar resaltado").clicked() {
                    self.grid.clear_highlights();
                }
            });
        });

        // Status line
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            if let Some(status) = &self.status {
                ui.label(status);
            } else {
                ui.label("Sin cotejo cargado");
            }
        });

        // The grid itself
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.grid.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(80.0);
                    ui.heading("Sin filas para revisar");
                    ui.add_space(10.0);
                    ui.label("Abre un archivo de cotejo (JSON) para empezar.");
                });
                return;
            }
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.grid.show(ui);
                });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config on exit: {}", e);
        }
    }
}
