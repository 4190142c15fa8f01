pub mod geometry;
pub mod projection;
pub mod renderer;

pub use projection::{GeoBounds, Projector};
pub use renderer::{render_layers, MapLayers};
