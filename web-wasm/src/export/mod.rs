pub mod download;

pub use download::trigger_download;
