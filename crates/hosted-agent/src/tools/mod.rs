//! A set of local tools that agents can call.

mod weather;

pub use weather::WeatherTool;
