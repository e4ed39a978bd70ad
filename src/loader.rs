use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use tracing::error;

pub enum LoaderMessage {
    Open(PathBuf),
}

pub enum LoaderResponse {
    Loaded { path: PathBuf, raw: String },
    Failed(String),
}

/// Background payload reader. File IO stays off the UI thread; responses
/// are drained one per frame by the app.
pub struct Loader {
    receiver: Receiver<LoaderMessage>,
    response_sender: Sender<LoaderResponse>,
}

impl Loader {
    pub fn new(receiver: Receiver<LoaderMessage>, response_sender: Sender<LoaderResponse>) -> Self {
        Self {
            receiver,
            response_sender,
        }
    }

    pub fn run(&self) {
        while let Ok(message) = self.receiver.recv() {
            match message {
                LoaderMessage::Open(path) => {
                    let response = match fs::read_to_string(&path) {
                        Ok(raw) => LoaderResponse::Loaded { path, raw },
                        Err(e) => {
                            error!("Failed to read payload {:?}: {}", path, e);
                            LoaderResponse::Failed(format!("No se pudo leer {:?}: {}", path, e))
                        }
                    };
                    if self.response_sender.send(response).is_err() {
                        // UI side is gone, stop the worker
                        return;
                    }
                }
            }
        }
    }
}

pub fn spawn_loader() -> (Sender<LoaderMessage>, Receiver<LoaderResponse>) {
    let (sender, receiver) = std::sync::mpsc::channel();
    let (response_sender, response_receiver) = std::sync::mpsc::channel();
    thread::spawn(move || {
        let loader = Loader::new(receiver, response_sender);
        loader.run();
    });
    (sender, response_receiver)
}
