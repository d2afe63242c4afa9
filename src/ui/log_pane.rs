use chrono::Local;
use egui::Ui;

/// Scrolling, read-only list of timestamped messages
#[derive(Default)]
pub struct LogPane {
    lines: Vec<String>,
}

impl LogPane {
    pub fn push(&mut self, message: impl AsRef<str>) {
        let timestamp = Local::now().format("%H:%M:%S");
        self.lines.push(format!("[{}] {}", timestamp, message.as_ref()));
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn show(&self, ui: &mut Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for line in &self.lines {
                    ui.label(egui::RichText::new(line).monospace());
                }
            });
    }
}
