pub mod catalog;
pub mod model;
pub mod scene;
pub mod smoothing;
pub mod style;
pub mod view;
pub mod visibility;

pub use model::{LatLon, RiskArea};
pub use scene::{Layer, LocationClick, Scene};
pub use view::{SelectionState, ViewController};
pub use visibility::{Focus, RouteCaps};
