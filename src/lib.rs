pub mod app;
pub mod build;
pub mod classify;
pub mod config;
pub mod launch;
pub mod orchestrator;
pub mod process;
pub mod resolver;
pub mod runtime;
pub mod sandbox;
pub mod shared;
