use crate::utils::error::{Result, VisualizerError};
use regex::Regex;
use std::sync::OnceLock;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn weight_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[+-]?\d$").expect("weight pattern is a valid regex"))
}

/// 驗證頂點 id：必須剛好一個非空白字元
pub fn validate_vertex_label(input: &str) -> Result<char> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(label), None) if !label.is_whitespace() => Ok(label),
        _ => Err(VisualizerError::invalid_input(
            "vertex id",
            input,
            "should be exactly 1 non-blank char",
        )),
    }
}

/// 驗證邊的權重：一位數，可帶正負號
pub fn validate_edge_weight(input: &str) -> Result<i32> {
    if !weight_pattern().is_match(input) {
        return Err(VisualizerError::invalid_input(
            "edge weight",
            input,
            "should be a single digit with optional sign",
        ));
    }
    input
        .parse::<i32>()
        .map_err(|e| VisualizerError::invalid_input("edge weight", input, &e.to_string()))
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(VisualizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(VisualizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(VisualizerError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
