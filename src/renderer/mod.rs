pub mod cell;
pub mod processor;
pub mod raster;

pub use processor::GridProcessor;
