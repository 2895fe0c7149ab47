pub mod text_overlay;

pub use text_overlay::{OverlayStats, TextItem, TextOverlay};
