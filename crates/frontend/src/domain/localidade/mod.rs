pub mod api;
pub mod hooks;
pub mod ui;
