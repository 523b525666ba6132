pub mod cli;
pub mod color;
pub mod config;
pub mod template;
