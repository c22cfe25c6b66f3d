pub mod encoder;
pub mod header;
pub mod record;
