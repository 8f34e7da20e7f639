//! Configuration for spendtrack

pub mod settings;

pub use settings::Settings;
