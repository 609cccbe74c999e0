use std::{path::PathBuf, time::Duration};

use egui::{Color32, CursorIcon, RichText, Sense, Stroke};
use futures::{FutureExt, future::BoxFuture};
use mask_canvas::{AsyncRefTask, ExportError, MaskEditor, MaskSurface};

use crate::config::Config;
use image_loader::ImageLoader;

mod controls;
mod download;
mod image_loader;
#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use native::run_native;
#[cfg(target_arch = "wasm32")]
pub use web::run_web;

const DROP_ZONE_HOVER: Color32 = Color32::from_rgb(59, 130, 246);

pub(crate) struct MaskEditorApp {
    editor: MaskEditor,
    surface: MaskSurface,
    loader: ImageLoader,
    export_job: AsyncRefTask<Result<String, ExportError>>,
    export_dir: PathBuf,
}

impl MaskEditorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, initial: Option<PathBuf>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let mut editor = MaskEditor::new(config.brush);
        let ctx = cc.egui_ctx.clone();
        editor.subscribe(move |_| ctx.request_repaint());

        let mut loader = ImageLoader::new(config.placeholder_url);
        if let Some(path) = initial {
            loader.open_path(path);
        }

        Self {
            editor,
            surface: MaskSurface::new(config.surface_max_width),
            loader,
            export_job: AsyncRefTask::new_ready(Ok(String::new())),
            export_dir: config.export_dir,
        }
    }

    fn drop_zone_ui(&mut self, ui: &mut egui::Ui) {
        let hovering = ImageLoader::is_hovering_files(ui.ctx());
        let mut frame = egui::Frame::group(ui.style());
        if hovering {
            frame = frame.stroke(Stroke::new(2.0, DROP_ZONE_HOVER));
        }
        let response = frame
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Drop an image here or click to upload").strong());
                    ui.label(RichText::new("PNG, JPG, GIF up to 10MB").small().weak());
                });
            })
            .response
            .interact(Sense::click())
            .on_hover_cursor(CursorIcon::PointingHand);
        if response.clicked() {
            self.loader.pick_file();
        }
    }

    fn is_busy(&self) -> bool {
        self.loader.is_pending() || self.export_job.is_pending()
    }
}

impl eframe::App for MaskEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.loader.update(ctx, &mut self.editor);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .drag_to_scroll(false)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    ui.heading("Image Mask Editor");
                    ui.label("Paint over the parts of the image you want to mask");
                    ui.add_space(8.0);

                    self.drop_zone_ui(ui);
                    ui.add_space(8.0);

                    ui.vertical_centered(|ui| {
                        self.surface.ui(ui, &mut self.editor);
                    });
                    ui.add_space(8.0);

                    self.controls_ui(ui);
                });
        });

        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}

/// Runs `job` off the UI thread. `None` if the worker died before answering.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn run_blocking<T: Send + 'static>(
    job: impl FnOnce() -> T + Send + 'static,
) -> BoxFuture<'static, Option<T>> {
    let (tx, rx) = futures::channel::oneshot::channel();
    std::thread::spawn(move || tx.send(job()).ok());
    rx.map(Result::ok).boxed()
}

/// There are no threads in the browser, so the job completes inline
#[cfg(target_arch = "wasm32")]
pub(crate) fn run_blocking<T: Send + 'static>(
    job: impl FnOnce() -> T + Send + 'static,
) -> BoxFuture<'static, Option<T>> {
    futures::future::ready(Some(job())).boxed()
}
