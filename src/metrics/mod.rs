pub mod collector;
pub mod export;
