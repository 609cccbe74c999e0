/// Diameter of the brush in display pixels, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(from = "u8", into = "u8"))]
pub struct BrushSize(u8);

impl BrushSize {
    pub const MIN: u8 = 5;
    pub const MAX: u8 = 50;

    pub fn new(size: u8) -> Self {
        Self(size.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn diameter(self) -> f32 {
        self.0 as f32
    }
}

impl Default for BrushSize {
    fn default() -> Self {
        Self(20)
    }
}

impl From<u8> for BrushSize {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<BrushSize> for u8 {
    fn from(value: BrushSize) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BrushMode {
    #[default]
    Pencil,
    Eraser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BrushSettings {
    pub size: BrushSize,
    pub mode: BrushMode,
}

impl BrushSettings {
    pub fn new(size: u8, mode: BrushMode) -> Self {
        Self {
            size: BrushSize::new(size),
            mode,
        }
    }
}
