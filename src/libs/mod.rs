pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod favorites;
pub mod source;
pub mod storage;
pub mod utils;
pub mod video;
