use std::num::NonZeroU32;

/// On-screen size of the image. Derived from the container width and the
/// image's aspect ratio, never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplaySize {
    pub width: f32,
    pub height: f32,
}

impl DisplaySize {
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Pixel dimensions of the decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaturalSize {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl NaturalSize {
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }
}

/// The container always spans the full width, only the height follows the aspect ratio.
pub fn compute_display_size(container_width: f32, natural: NaturalSize) -> DisplaySize {
    let ratio = natural.height.get() as f32 / natural.width.get() as f32;
    DisplaySize {
        width: container_width,
        height: container_width * ratio,
    }
}

/// Keeps the display size current as the container width and the image change.
#[derive(Debug, Default)]
pub struct DisplayGeometry {
    container_width: Option<f32>,
    natural: Option<NaturalSize>,
    display: DisplaySize,
}

impl DisplayGeometry {
    pub fn display(&self) -> DisplaySize {
        self.display
    }

    /// Returns true if the display size changed
    pub fn set_container_width(&mut self, width: f32) -> bool {
        if self.container_width == Some(width) {
            return false;
        }
        self.container_width = Some(width);
        self.recompute()
    }

    /// Returns true if the display size changed
    pub fn set_natural(&mut self, natural: NaturalSize) -> bool {
        self.natural = Some(natural);
        self.recompute()
    }

    /// Without both inputs the previous size is kept.
    fn recompute(&mut self) -> bool {
        let (Some(width), Some(natural)) = (self.container_width, self.natural) else {
            return false;
        };
        let next = compute_display_size(width, natural);
        let changed = next != self.display;
        self.display = next;
        changed
    }
}
