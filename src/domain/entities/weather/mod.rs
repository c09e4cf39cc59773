//! Weather Log Entity Module

pub mod weather_log;

pub use weather_log::*;
