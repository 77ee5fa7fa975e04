// Sara - Rule-governed generation relay
// Library exports

pub mod config;
pub mod logging;
pub mod prompt;
pub mod providers;
pub mod rules;
pub mod server;
