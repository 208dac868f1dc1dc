pub mod list;
pub mod timeline;
