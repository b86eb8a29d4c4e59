pub mod brands;
pub mod file;
pub mod stdin;
