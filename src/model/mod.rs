pub mod builder;
pub mod command;
pub mod config;
pub mod menu;
