pub mod app;
pub mod codec;
pub mod commands;
pub mod json_export;
pub mod table;
pub mod ui;
pub mod utils;
