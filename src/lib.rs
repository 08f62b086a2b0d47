pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod view;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::VisualizerConfig};

pub use app::Session;
pub use core::application::ApplicationModel;
pub use utils::error::{Result, VisualizerError};
