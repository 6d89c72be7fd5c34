pub mod schema;
pub mod watermark;
pub mod window;
