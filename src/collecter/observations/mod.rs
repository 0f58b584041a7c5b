pub mod collecter;
pub mod settings;
