use std::path::PathBuf;

use egui::Vec2;
use mask_canvas::BrushSettings;

pub const DEFAULT_PLACEHOLDER_URL: &str = "https://picsum.photos/800/600";

#[derive(serde::Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    pub viewport: Vec2,
    /// Shown until the user picks an image. `null` starts without image.
    pub placeholder_url: Option<String>,
    pub surface_max_width: f32,
    pub brush: BrushSettings,
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: [800.0, 900.0].into(),
            placeholder_url: Some(DEFAULT_PLACEHOLDER_URL.into()),
            surface_max_width: 576.0,
            brush: BrushSettings::default(),
            export_dir: ".".into(),
        }
    }
}
