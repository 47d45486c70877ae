pub mod cli;
pub mod collection;
pub mod color;
pub mod config;
pub mod error;
pub mod logging;
pub mod mixer;
pub mod names;
pub mod panels;
pub mod record;
pub mod remote;
pub mod render;
pub mod storage;
