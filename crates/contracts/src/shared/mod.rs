pub mod categories;
pub mod number_format;
