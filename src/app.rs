use crate::config::SettingsStore;
use crate::messages::ResponseMessage;
use crate::style::configure_style;
use crate::ui::log_pane::LogPane;
use crate::ui::toolbar::{Toolbar, ToolbarAction, ToolbarState};
use crate::worker::{WorkerMessage, spawn_worker};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{error, info};

const NO_RECENT_DIRECTORY: &str = "No recent directory information available.";

pub struct DllUpdaterApp {
    settings: SettingsStore,
    last_directory: String,
    log: LogPane,
    busy: bool,
    worker_sender: Sender<WorkerMessage>,
    response_sender: Sender<ResponseMessage>,
    response_receiver: Receiver<ResponseMessage>,
}

impl DllUpdaterApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        configure_style(&cc.egui_ctx);

        let (response_sender, response_receiver) = mpsc::channel();
        let ctx = cc.egui_ctx.clone();
        let worker_sender = spawn_worker(response_sender.clone(), move || ctx.request_repaint());

        let settings = SettingsStore::default();
        let last_directory = settings.load();

        let mut log = LogPane::default();
        if last_directory.is_empty() {
            log.push("Select a folder to copy DLLs from");
        } else {
            log.push(format!("Last DLL folder: {}", last_directory));
        }

        Self {
            settings,
            last_directory,
            log,
            busy: false,
            worker_sender,
            response_sender,
            response_receiver,
        }
    }

    /// Ask the worker to refresh the working directory's DLLs from `source`
    fn start_sync(&mut self, source: PathBuf) {
        let target = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => {
                error!("Failed to resolve working directory: {}", e);
                self.log
                    .push(format!("Failed to resolve working directory: {}", e));
                return;
            }
        };

        self.log.push(format!(
            "Updating DLLs in {} from {}",
            target.display(),
            source.display()
        ));

        match self.worker_sender.send(WorkerMessage::Sync { source, target }) {
            Ok(()) => self.busy = true,
            Err(e) => {
                error!("Failed to send sync message: {}", e);
                self.log.push("Update worker is not running");
            }
        }
    }

    /// Open the folder picker on a helper thread so the UI keeps repainting
    fn pick_directory(&mut self, ctx: &egui::Context) {
        let sender = self.response_sender.clone();
        let ctx = ctx.clone();
        let start_dir = remembered_source(&self.last_directory).filter(|dir| dir.is_dir());

        self.busy = true;
        std::thread::spawn(move || {
            let mut dialog = rfd::FileDialog::new().set_title("Select DLL folder");
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            let picked = dialog.pick_folder();

            if let Err(e) = sender.send(ResponseMessage::DirectoryPicked(picked)) {
                error!("Failed to send picked directory: {}", e);
            }
            ctx.request_repaint();
        });
    }

    fn on_directory_picked(&mut self, picked: Option<PathBuf>) {
        self.busy = false;
        let Some(dir) = picked else {
            self.log.push("Folder selection cancelled");
            return;
        };

        self.last_directory = dir.to_string_lossy().into_owned();
        info!("Selected DLL folder {:?}", dir);
        if let Err(e) = self.settings.save(&self.last_directory) {
            error!("Failed to save settings: {}", e);
            self.log.push(format!("Failed to save settings: {}", e));
        }

        self.start_sync(dir);
    }

    fn handle_responses(&mut self) {
        while let Ok(response) = self.response_receiver.try_recv() {
            match response {
                ResponseMessage::Event(event) => {
                    if event.is_terminal() {
                        self.busy = false;
                    }
                    self.log.push(event.to_string());
                }
                ResponseMessage::SyncFailed(message) => {
                    self.busy = false;
                    self.log.push(format!("Update failed: {}", message));
                }
                ResponseMessage::DirectoryPicked(picked) => self.on_directory_picked(picked),
            }
        }
    }
}

/// The remembered folder to update from, if one was ever selected
fn remembered_source(last_directory: &str) -> Option<PathBuf> {
    (!last_directory.is_empty()).then(|| PathBuf::from(last_directory))
}

impl eframe::App for DllUpdaterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_responses();

        egui::TopBottomPanel::top("toolbar_panel").show(ctx, |ui| {
            let state = ToolbarState {
                last_directory: &self.last_directory,
                busy: self.busy,
            };
            if let Some(action) = Toolbar::show(ui, state) {
                match action {
                    ToolbarAction::SelectAndUpdate => self.pick_directory(ctx),
                    ToolbarAction::UpdateFromLast => {
                        match remembered_source(&self.last_directory) {
                            Some(source) => self.start_sync(source),
                            None => self.log.push(NO_RECENT_DIRECTORY),
                        }
                    }
                    ToolbarAction::ClearLog => self.log.clear(),
                }
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.log.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remembered_source() {
        assert_eq!(remembered_source(""), None);
        assert_eq!(
            remembered_source("/opt/game/plugins"),
            Some(PathBuf::from("/opt/game/plugins"))
        );
    }
}
