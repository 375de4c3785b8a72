pub mod app;
pub mod commands;
pub mod display;
pub mod formatters;
