pub mod brands;
pub mod deal;
