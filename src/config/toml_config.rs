use crate::core::ConfigProvider;
use crate::domain::model::CanvasSettings;
use crate::utils::error::{Result, VisualizerError};
use crate::utils::validation::{validate_path, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub canvas: CanvasConfig,
    pub player: PlayerConfig,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: i32,
    pub height: i32,
    pub height_offset: i32,
    pub vertex_diameter: i32,
    pub corner_vertices: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        let defaults = CanvasSettings::default();
        Self {
            width: defaults.width,
            height: defaults.height,
            height_offset: defaults.height_offset,
            vertex_diameter: defaults.vertex_diameter,
            corner_vertices: defaults.corner_vertices,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub delay_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { delay_ms: 700 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
    pub svg_file: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: ".".to_string(),
            svg_file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: Option<String>,
}

impl VisualizerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| VisualizerError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| VisualizerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| VisualizerError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let canvas = &self.canvas;
        validate_range("canvas.vertex_diameter", canvas.vertex_diameter, 10, 200)?;
        validate_range("canvas.width", canvas.width, canvas.vertex_diameter * 2, 10_000)?;
        validate_range("canvas.height", canvas.height, canvas.vertex_diameter * 2, 10_000)?;
        validate_range(
            "canvas.height_offset",
            canvas.height_offset,
            0,
            canvas.height - canvas.vertex_diameter * 2,
        )?;
        validate_range("player.delay_ms", self.player.delay_ms, 0, 60_000)?;
        validate_path("output.path", &self.output.path)?;
        if let Some(svg_file) = &self.output.svg_file {
            validate_path("output.svg_file", svg_file)?;
        }

        if let Some(level) = self.log_level() {
            if !LOG_LEVELS.contains(&level) {
                return Err(VisualizerError::InvalidConfigValueError {
                    field: "monitoring.log_level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
                });
            }
        }
        Ok(())
    }

    pub fn canvas_settings(&self) -> CanvasSettings {
        CanvasSettings {
            width: self.canvas.width,
            height: self.canvas.height,
            height_offset: self.canvas.height_offset,
            vertex_diameter: self.canvas.vertex_diameter,
            corner_vertices: self.canvas.corner_vertices,
        }
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }
}

impl ConfigProvider for VisualizerConfig {
    fn canvas(&self) -> CanvasSettings {
        self.canvas_settings()
    }

    fn play_delay(&self) -> Duration {
        Duration::from_millis(self.player.delay_ms)
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }
}

impl Validate for VisualizerConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
