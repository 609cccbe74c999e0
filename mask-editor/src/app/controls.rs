use egui::Key;
use log::debug;
use mask_canvas::{AsyncRefTask, BrushMode, BrushSize};

use super::download::download_mask;

const ICON_PENCIL: &str = "\u{270F}";
const ICON_ERASER: &str = "\u{1F9F9}";
const ICON_SAVE: &str = "\u{1F4BE}";
const ICON_CLEAR: &str = "\u{1F5D1}";

impl super::MaskEditorApp {
    pub(super) fn controls_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mode = self.editor.brush().mode;
            if ui
                .selectable_label(mode == BrushMode::Pencil, format!("{ICON_PENCIL} Pencil"))
                .clicked()
            {
                self.editor.set_brush_mode(BrushMode::Pencil);
            }
            if ui
                .selectable_label(mode == BrushMode::Eraser, format!("{ICON_ERASER} Eraser"))
                .clicked()
            {
                self.editor.set_brush_mode(BrushMode::Eraser);
            }

            ui.separator();
            ui.label("Brush Size:");
            let mut size = self.editor.brush().size.get();
            if ui
                .add(
                    egui::Slider::new(&mut size, BrushSize::MIN..=BrushSize::MAX)
                        .step_by(1.0)
                        .suffix("px"),
                )
                .changed()
            {
                self.editor.set_brush_size(size);
            }
        });

        ui.horizontal(|ui| {
            let can_export = self.editor.image().is_some() && !self.export_job.is_pending();
            ui.scope(|ui| {
                if !can_export {
                    ui.disable();
                }
                if ui
                    .button(format!("{ICON_SAVE} Export Mask"))
                    .on_hover_text("Export (cmd + S)")
                    .clicked()
                    || ui.input(|i| i.modifiers.command && i.key_pressed(Key::S) && ui.is_enabled())
                {
                    self.export();
                }
            });

            if ui.button(format!("{ICON_CLEAR} Clear")).clicked() {
                self.editor.clear();
            }

            if let Some(Err(e)) = self.export_job.data() {
                ui.label(format!("Error during export: {e}"));
            }
        });
    }

    fn export(&mut self) {
        match self.editor.export() {
            Some(export) => {
                self.export_job = AsyncRefTask::new(download_mask(export, self.export_dir.clone()));
            }
            None => debug!("Nothing to export yet"),
        }
    }
}
