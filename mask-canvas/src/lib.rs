mod async_task;
mod brush;
mod editor;
mod export;
mod geometry;
mod gesture;
mod image_source;
mod stroke;
mod surface;

pub use async_task::*;
pub use brush::*;
pub use editor::*;
pub use export::*;
pub use geometry::*;
pub use gesture::*;
pub use image_source::*;
pub use stroke::*;
pub use surface::*;
