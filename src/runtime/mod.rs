//! Application lifecycle and execution modes

pub mod lifetime;
pub mod modes;

pub use lifetime::startup::AppContext;
