pub mod app;
pub mod audio;
pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod scores;
pub mod ui;
