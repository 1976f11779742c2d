mod geometry;
mod projection;
mod renderer;
mod wrap;

pub use projection::{Viewport, DOTS_PER_PX};
pub use renderer::{Label, LineString, Lod, MapLayers, MapRenderer};
pub use wrap::WorldWrap;
