mod products;
pub mod content;

pub use products::*;
