pub mod config;
pub mod folder;
pub mod run;
