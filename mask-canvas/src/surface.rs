use egui::{
    Color32, CursorIcon, Pos2, Rect, Sense, TextureHandle, TextureOptions, Vec2, load::SizedTexture,
};

use crate::{GestureTracker, MaskEditor};

const BACKGROUND: Color32 = Color32::from_rgb(55, 65, 81);
// Strokes are shown in red, the exported mask is white
const STROKE_COLOR: Color32 = Color32::from_rgba_premultiplied(120, 34, 34, 128);

/// Shows the image with its strokes and feeds pointer input into a [`MaskEditor`].
pub struct MaskSurface {
    max_width: f32,
    gestures: GestureTracker,
    // (image generation, texture)
    texture: Option<(u64, TextureHandle)>,
}

impl MaskSurface {
    pub fn new(max_width: f32) -> Self {
        Self {
            max_width,
            gestures: GestureTracker::default(),
            texture: None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.gestures.is_active()
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, editor: &mut MaskEditor) -> egui::Response {
        let width = ui.available_width().min(self.max_width).max(0.0);
        editor.resize_container(width);
        let height = editor.display_size().height;

        // Claiming drag keeps parents from scrolling or selecting while painting
        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(width, height), Sense::click_and_drag());

        if ui.is_enabled() {
            let events = ui.input(|i| i.events.clone());
            for gesture in self.gestures.process(&events, rect) {
                editor.apply(gesture);
            }
        }

        self.sync_texture(ui.ctx(), editor);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 8.0, BACKGROUND);
        if let Some((_, texture)) = &self.texture {
            let texture = SizedTexture::from_handle(texture);
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            painter.image(texture.id, rect, uv, Color32::WHITE);
        }
        for stroke in editor.strokes() {
            painter.circle_filled(
                rect.min + stroke.pos().to_vec2(),
                stroke.radius(),
                STROKE_COLOR,
            );
        }

        response.on_hover_cursor(CursorIcon::Crosshair)
    }

    fn sync_texture(&mut self, ctx: &egui::Context, editor: &MaskEditor) {
        let generation = editor.image_generation();
        if matches!(&self.texture, Some((g, _)) if *g == generation) {
            return;
        }
        let Some(image) = editor.image() else {
            return;
        };
        let max_side = ctx.input(|i| i.max_texture_side);
        let handle = ctx.load_texture(
            "Source image",
            image.to_color_image(max_side),
            TextureOptions::LINEAR,
        );
        self.texture = Some((generation, handle));
    }
}
