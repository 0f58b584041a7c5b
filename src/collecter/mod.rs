pub mod fd;
pub mod observations;
pub mod settings;
