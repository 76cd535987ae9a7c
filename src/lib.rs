#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

pub mod chart;
pub mod config;
pub mod coord;
pub mod error;
pub mod loaders;
pub mod overlay;
pub mod style;

pub use chart::{selection::{LayerCategory, UiSelection}, session::{ChartSession, MapRenderer}, DrawCommand, OverlayRegistry};
pub use config::ChartConfig;
pub use error::{ChartError, ChartResult};
pub use loaders::tables::ChartTables;

#[cfg(test)]
mod tests;
