use egui::Pos2;
use log::{debug, info};

use crate::{
    BrushMode, BrushSettings, BrushSize, DisplayGeometry, DisplaySize, Gesture, ImageFile,
    ImageLoadError, LoadedImage, Mask, MaskExport, NaturalSize, Stroke, decode_image,
    rasterize_mask,
};

/// What changed in a [`MaskEditor`]. Every mutation emits exactly one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    ImageLoaded,
    MaskChanged,
    BrushChanged,
    DisplayResized,
}

pub type Listener = Box<dyn FnMut(&EditorEvent)>;

/// State of one editing session: the image, its display geometry, the
/// painted strokes and the brush.
pub struct MaskEditor {
    image: Option<LoadedImage>,
    image_generation: u64,
    geometry: DisplayGeometry,
    mask: Mask,
    brush: BrushSettings,
    drawing: bool,
    listeners: Vec<Listener>,
}

impl Default for MaskEditor {
    fn default() -> Self {
        Self::new(BrushSettings::default())
    }
}

impl std::fmt::Debug for MaskEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaskEditor")
            .field("image", &self.image)
            .field("geometry", &self.geometry)
            .field("strokes", &self.mask.len())
            .field("brush", &self.brush)
            .field("drawing", &self.drawing)
            .finish_non_exhaustive()
    }
}

impl MaskEditor {
    pub fn new(brush: BrushSettings) -> Self {
        Self {
            image: None,
            image_generation: 0,
            geometry: DisplayGeometry::default(),
            mask: Mask::default(),
            brush,
            drawing: false,
            listeners: Vec::new(),
        }
    }

    /// Called synchronously after every change, e.g. to request a repaint
    pub fn subscribe(&mut self, listener: impl FnMut(&EditorEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, event: EditorEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    /// Increases with every loaded image, used to detect stale textures
    pub fn image_generation(&self) -> u64 {
        self.image_generation
    }

    pub fn natural_size(&self) -> Option<NaturalSize> {
        self.image.as_ref().map(|i| i.natural)
    }

    pub fn display_size(&self) -> DisplaySize {
        self.geometry.display()
    }

    pub fn strokes(&self) -> &[Stroke] {
        self.mask.as_slice()
    }

    pub fn brush(&self) -> BrushSettings {
        self.brush
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Replaces the image and starts over with an empty mask
    pub fn load_image(&mut self, image: LoadedImage) {
        info!(
            "Load image {}x{}, dropping {} strokes",
            image.natural.width,
            image.natural.height,
            self.mask.len()
        );
        let natural = image.natural;
        self.image = Some(image);
        self.image_generation += 1;
        self.mask.clear();
        self.drawing = false;
        self.geometry.set_natural(natural);
        self.notify(EditorEvent::ImageLoaded);
    }

    /// Decodes and loads `file`. Non-image files leave everything untouched.
    pub fn load_file(&mut self, file: &ImageFile) -> Result<(), ImageLoadError> {
        let image = decode_image(file)?;
        self.load_image(image);
        Ok(())
    }

    pub fn resize_container(&mut self, width: f32) {
        if self.geometry.set_container_width(width) {
            debug!("Display size {:?}", self.geometry.display());
            self.notify(EditorEvent::DisplayResized);
        }
    }

    pub fn set_brush_size(&mut self, size: u8) {
        let size = BrushSize::new(size);
        if size != self.brush.size {
            self.brush.size = size;
            self.notify(EditorEvent::BrushChanged);
        }
    }

    pub fn set_brush_mode(&mut self, mode: BrushMode) {
        if mode != self.brush.mode {
            debug!("Brush mode {mode:?}");
            self.brush.mode = mode;
            self.notify(EditorEvent::BrushChanged);
        }
    }

    pub fn apply(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::Begin(pos) => self.begin_stroke(pos),
            Gesture::Continue(pos) => self.continue_stroke(pos),
            Gesture::End => self.end_stroke(),
        }
    }

    pub fn begin_stroke(&mut self, pos: Pos2) {
        self.drawing = true;
        self.stamp(pos);
    }

    /// Adds one stamp per sample; nothing is interpolated between samples.
    pub fn continue_stroke(&mut self, pos: Pos2) {
        if self.drawing {
            self.stamp(pos);
        }
    }

    pub fn end_stroke(&mut self) {
        self.drawing = false;
    }

    fn stamp(&mut self, pos: Pos2) {
        match self.brush.mode {
            BrushMode::Pencil => {
                self.mask.push(Stroke::new(pos, self.brush.size.diameter()));
                self.notify(EditorEvent::MaskChanged);
            }
            BrushMode::Eraser => self.erase_near(pos),
        }
    }

    /// Uses the current brush size as eraser diameter
    pub fn erase_near(&mut self, pos: Pos2) {
        if self.mask.erase_near(pos, self.brush.size.diameter()) > 0 {
            self.notify(EditorEvent::MaskChanged);
        }
    }

    pub fn clear(&mut self) {
        if !self.mask.is_empty() {
            self.mask.clear();
            self.notify(EditorEvent::MaskChanged);
        }
    }

    /// `None` until an image is loaded and laid out with a non-empty size
    pub fn export(&self) -> Option<MaskExport> {
        let natural = self.natural_size()?;
        let image = rasterize_mask(self.mask.as_slice(), self.display_size(), natural)?;
        info!("Export {} strokes at {}x{}", self.mask.len(), natural.width, natural.height);
        Some(MaskExport { image })
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::image_source::tests::png_file;

    fn loaded_editor(width: u32, height: u32, container: f32) -> MaskEditor {
        let mut editor = MaskEditor::default();
        editor.resize_container(container);
        editor.load_file(&png_file(width, height)).unwrap();
        editor
    }

    fn recorded(editor: &mut MaskEditor) -> Rc<RefCell<Vec<EditorEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        editor.subscribe(move |e| sink.borrow_mut().push(*e));
        events
    }

    #[test]
    fn one_stroke_per_sample_with_size_at_sample_time() {
        let mut editor = loaded_editor(80, 60, 400.0);
        editor.begin_stroke(Pos2::new(1.0, 1.0));
        for i in 0..5 {
            editor.set_brush_size(10 + i);
            editor.continue_stroke(Pos2::new(2.0 + i as f32, 1.0));
        }
        editor.end_stroke();

        let sizes: Vec<f32> = editor.strokes().iter().map(|s| s.size).collect();
        assert_eq!(sizes, vec![20.0, 10.0, 11.0, 12.0, 13.0, 14.0]);
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut editor = loaded_editor(80, 60, 400.0);
        editor.continue_stroke(Pos2::new(1.0, 1.0));
        editor.begin_stroke(Pos2::new(1.0, 1.0));
        editor.end_stroke();
        editor.end_stroke();
        editor.continue_stroke(Pos2::new(2.0, 2.0));
        assert_eq!(editor.strokes().len(), 1);
        assert!(!editor.is_drawing());
    }

    #[test]
    fn eraser_gesture_removes_instead_of_appending() {
        let mut editor = loaded_editor(80, 60, 400.0);
        editor.begin_stroke(Pos2::new(10.0, 10.0));
        editor.continue_stroke(Pos2::new(100.0, 10.0));
        editor.end_stroke();

        editor.set_brush_mode(BrushMode::Eraser);
        editor.apply(Gesture::Begin(Pos2::new(300.0, 300.0)));
        editor.apply(Gesture::Continue(Pos2::new(12.0, 10.0)));
        editor.apply(Gesture::End);

        assert_eq!(editor.strokes(), &[Stroke::new(Pos2::new(100.0, 10.0), 20.0)]);
    }

    #[test]
    fn loading_an_image_clears_the_mask() {
        let mut editor = loaded_editor(80, 60, 400.0);
        for i in 0..10 {
            editor.begin_stroke(Pos2::new(i as f32, 0.0));
        }
        editor.load_file(&png_file(10, 10)).unwrap();
        assert!(editor.strokes().is_empty());
        assert!(!editor.is_drawing());
        assert_eq!(editor.image_generation(), 2);
        assert_eq!(editor.display_size().height, 400.0);
    }

    #[test]
    fn non_image_file_changes_nothing() {
        let mut editor = loaded_editor(80, 60, 400.0);
        editor.begin_stroke(Pos2::new(5.0, 5.0));
        let events = recorded(&mut editor);

        let text = ImageFile::new("notes.txt", "text/plain", b"hello".to_vec());
        assert!(matches!(
            editor.load_file(&text),
            Err(ImageLoadError::InvalidImageType { .. })
        ));
        assert_eq!(editor.strokes().len(), 1);
        assert_eq!(editor.natural_size(), NaturalSize::new(80, 60));
        assert_eq!(editor.image_generation(), 1);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn brush_survives_loads_and_clears() {
        let mut editor = loaded_editor(80, 60, 400.0);
        editor.set_brush_size(42);
        editor.set_brush_mode(BrushMode::Eraser);
        editor.clear();
        editor.load_file(&png_file(5, 5)).unwrap();
        assert_eq!(editor.brush(), BrushSettings::new(42, BrushMode::Eraser));
    }

    #[test]
    fn brush_size_is_clamped() {
        let mut editor = MaskEditor::default();
        editor.set_brush_size(1);
        assert_eq!(editor.brush().size.get(), BrushSize::MIN);
        editor.set_brush_size(255);
        assert_eq!(editor.brush().size.get(), BrushSize::MAX);
    }

    #[test]
    fn every_mutation_notifies_once() {
        let mut editor = MaskEditor::default();
        let events = recorded(&mut editor);

        editor.resize_container(400.0);
        editor.load_file(&png_file(8, 6)).unwrap();
        editor.resize_container(200.0);
        editor.resize_container(200.0);
        editor.begin_stroke(Pos2::new(1.0, 1.0));
        editor.set_brush_size(30);
        editor.set_brush_size(30);
        editor.set_brush_mode(BrushMode::Eraser);
        editor.continue_stroke(Pos2::new(150.0, 100.0));
        editor.continue_stroke(Pos2::new(1.0, 1.0));
        editor.end_stroke();
        editor.clear();

        assert_eq!(
            *events.borrow(),
            vec![
                EditorEvent::ImageLoaded,
                EditorEvent::DisplayResized,
                EditorEvent::MaskChanged,
                EditorEvent::BrushChanged,
                EditorEvent::BrushChanged,
                EditorEvent::MaskChanged,
            ]
        );
    }

    #[test]
    fn clear_notifies_only_when_strokes_existed() {
        let mut editor = loaded_editor(8, 6, 400.0);
        editor.begin_stroke(Pos2::new(1.0, 1.0));
        let events = recorded(&mut editor);
        editor.clear();
        editor.clear();
        assert!(editor.strokes().is_empty());
        assert_eq!(*events.borrow(), vec![EditorEvent::MaskChanged]);
    }

    #[test]
    fn export_requires_image_and_layout() {
        let mut editor = MaskEditor::default();
        assert!(editor.export().is_none());

        editor.load_file(&png_file(800, 600)).unwrap();
        // No container width yet, display size is zero
        assert!(editor.export().is_none());

        editor.resize_container(0.0);
        assert!(editor.export().is_none());

        editor.resize_container(400.0);
        editor.begin_stroke(Pos2::new(100.0, 100.0));
        let export = editor.export().unwrap();
        assert_eq!(export.image.dimensions(), (800, 600));
        assert_eq!(export.image.get_pixel(200, 200).0, [255, 255, 255, 128]);
        assert_eq!(export.image.get_pixel(221, 200).0[3], 0);
    }
}
