pub(crate) mod health;
pub mod predict;

pub use health::health_check;
