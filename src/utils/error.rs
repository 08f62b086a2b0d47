use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualizerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid input '{value}' for {field}: {reason}")]
    InvalidInputError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Vertex '{label}' not found")]
    VertexNotFound { label: char },

    #[error("Vertex '{label}' already exists")]
    DuplicateVertex { label: char },

    #[error("Edge <{from} -> {to}> not found")]
    EdgeNotFound { from: char, to: char },

    #[error("Edge <{from} -> {to}> already exists")]
    DuplicateEdge { from: char, to: char },

    #[error("Point ({x}, {y}) is outside of the canvas")]
    OutOfBounds { x: i32, y: i32 },

    #[error("Command error: {message}")]
    CommandError { message: String },

    #[error("Snapshot error: {message}")]
    SnapshotError { message: String },

    /// the command input or the output stream of the session failed
    #[error("Session I/O error: {0}")]
    SessionIoError(std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Graph,
    Io,
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl VisualizerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) | Self::SerializationError(_) | Self::SnapshotError { .. } => {
                ErrorCategory::Io
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::InvalidInputError { .. } | Self::CommandError { .. } | Self::OutOfBounds { .. } => {
                ErrorCategory::Input
            }
            Self::VertexNotFound { .. }
            | Self::DuplicateVertex { .. }
            | Self::EdgeNotFound { .. }
            | Self::DuplicateEdge { .. } => ErrorCategory::Graph,
            Self::SessionIoError(_) => ErrorCategory::Terminal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 使用者輸入錯誤只需提示，session 繼續
            ErrorCategory::Input | ErrorCategory::Graph => ErrorSeverity::Low,
            ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            // session 無法再讀寫指令，只能結束
            ErrorCategory::Terminal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the file exists and the output path is writable",
            Self::SerializationError(_) | Self::SnapshotError { .. } => {
                "Make sure the file is a graph snapshot written by `save`"
            }
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Make sure the configuration file exists and is valid TOML"
            }
            Self::InvalidConfigValueError { .. } | Self::MissingConfigError { .. } => {
                "Fix the configuration value and restart"
            }
            Self::InvalidInputError { .. } => {
                "Vertex ids are a single character, edge weights a single signed digit"
            }
            Self::VertexNotFound { .. } | Self::EdgeNotFound { .. } => {
                "Use `show` to list the current vertices and edges"
            }
            Self::DuplicateVertex { .. } | Self::DuplicateEdge { .. } => {
                "Remove the existing element first or choose another id"
            }
            Self::OutOfBounds { .. } => "Click inside the canvas",
            Self::CommandError { .. } => "Type `help` to list the available commands",
            Self::SessionIoError(_) => "Check that the terminal or the redirected streams are still open",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("File operation failed: {}", self),
            ErrorCategory::Terminal => format!("Session aborted: {}", self),
            ErrorCategory::Input | ErrorCategory::Graph => self.to_string(),
        }
    }

    pub(crate) fn invalid_input(field: &str, value: &str, reason: &str) -> Self {
        Self::InvalidInputError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn session_io(error: std::io::Error) -> Self {
        Self::SessionIoError(error)
    }

    pub(crate) fn command(message: impl Into<String>) -> Self {
        Self::CommandError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VisualizerError>;
