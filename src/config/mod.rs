pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::VisualizerConfig;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "graph-visualizer")]
#[command(about = "Graph-Algorithms Visualizer: edit a weighted graph and play DFS, BFS, Dijkstra and Prim on it")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Command script to run instead of reading commands from stdin
    #[arg(short, long)]
    pub script: Option<String>,

    /// Directory used by save, load and render (overrides output.path)
    #[arg(long)]
    pub output_path: Option<String>,

    /// Delay between two played steps in milliseconds (overrides player.delay_ms)
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Start with an empty canvas instead of the four corner vertices
    #[arg(long)]
    pub no_corner_vertices: bool,

    /// Render the final canvas to this SVG file on exit (overrides output.svg_file)
    #[arg(long)]
    pub export: Option<String>,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 套用命令列覆蓋設定
    pub fn apply_overrides(&self, config: &mut VisualizerConfig) {
        if let Some(output_path) = &self.output_path {
            config.output.path = output_path.clone();
            tracing::info!("🔧 Output path overridden to: {}", output_path);
        }
        if let Some(delay_ms) = self.delay_ms {
            config.player.delay_ms = delay_ms;
            tracing::info!("🔧 Play delay overridden to: {}ms", delay_ms);
        }
        if self.no_corner_vertices {
            config.canvas.corner_vertices = false;
        }
        if let Some(export) = &self.export {
            config.output.svg_file = Some(export.clone());
        }
    }
}
