pub mod labels;
pub mod svg;

pub use labels::{ResultLabel, StatusLabel};
pub use svg::SvgRenderer;
