pub mod core;
pub mod dispatch;
