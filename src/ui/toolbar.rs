use egui::{Align, Layout, Ui};

pub enum ToolbarAction {
    SelectAndUpdate,
    UpdateFromLast,
    ClearLog,
}

pub struct Toolbar;

pub struct ToolbarState<'a> {
    pub last_directory: &'a str,
    pub busy: bool,
}

impl Toolbar {
    pub fn show(ui: &mut Ui, state: ToolbarState<'_>) -> Option<ToolbarAction> {
        let ToolbarState {
            last_directory,
            busy,
        } = state;

        let mut action = None;

        ui.horizontal(|ui| {
            ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                if ui
                    .add_enabled(!busy, egui::Button::new("📂 Select folder & update"))
                    .on_hover_text("Pick a folder and copy its DLLs over the ones here")
                    .clicked()
                {
                    action = Some(ToolbarAction::SelectAndUpdate);
                }

                if ui
                    .add_enabled(!busy, egui::Button::new("🔄 Update from last folder"))
                    .on_hover_text("Copy DLLs again from the last selected folder")
                    .on_disabled_hover_text("An update is running")
                    .clicked()
                {
                    action = Some(ToolbarAction::UpdateFromLast);
                }

                if busy {
                    ui.spinner();
                }
            });

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("🗑").on_hover_text("Clear log").clicked() {
                    action = Some(ToolbarAction::ClearLog);
                }
            });
        });

        let folder_text = if last_directory.is_empty() {
            "Last folder: (none)".to_string()
        } else {
            format!("Last folder: {}", last_directory)
        };
        ui.label(egui::RichText::new(folder_text).small());

        action
    }
}
