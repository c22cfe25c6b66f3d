pub mod bounds;
pub mod colormap;
pub mod error;
pub mod quantize;
pub mod sample;
pub mod source;
