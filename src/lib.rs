pub mod app;
pub mod app_state;
pub mod config;
pub mod constants;
pub mod error;
pub mod render;
pub mod resources;
pub mod scene;
pub mod sprites;
