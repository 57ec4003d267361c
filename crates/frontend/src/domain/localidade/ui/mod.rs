pub mod admin;
pub mod picker;
