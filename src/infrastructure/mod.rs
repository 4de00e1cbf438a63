pub mod audio;
pub mod backend;
pub mod config;
pub mod http;
