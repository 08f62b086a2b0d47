use std::fmt::Write;

use crate::core::graph::GraphModel;
use crate::domain::model::CanvasSettings;
use crate::view::labels::DisplayBackground;

const PANEL_COLOR: &str = "#b27a7a";
const HIGHLIGHT_PANEL_COLOR: &str = "#c0c0c0";
const VERTEX_COLOR: &str = "#ffff00";
const VERTEX_SELECTED_COLOR: &str = "#ff3333";
const TEXT_COLOR: &str = "#000000";
const BAR_HEIGHT: i32 = 30;

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders the visualizer window (status bar, graph, display bar) as an SVG document.
pub struct SvgRenderer {
    canvas: CanvasSettings,
}

impl SvgRenderer {
    pub fn new(canvas: CanvasSettings) -> Self {
        Self { canvas }
    }

    pub fn render(
        &self,
        graph: &GraphModel,
        status_text: &str,
        display_text: &str,
        display_background: DisplayBackground,
    ) -> String {
        let width = self.canvas.width;
        let graph_height = self.canvas.graph_height();
        let total_height = graph_height + 2 * BAR_HEIGHT;
        let diameter = self.canvas.vertex_diameter;
        let mut svg = String::new();

        // write! into a String cannot fail
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = total_height
        );
        let _ = writeln!(
            svg,
            r#"  <rect name="Graph" x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            width, total_height, PANEL_COLOR
        );
        let _ = writeln!(
            svg,
            r#"  <text name="Mode" x="{}" y="{}" font-family="Arial" font-size="18" text-anchor="end" fill="{}">{}</text>"#,
            width - 5,
            BAR_HEIGHT - 8,
            TEXT_COLOR,
            escape_xml(status_text)
        );

        let _ = writeln!(svg, r#"  <g transform="translate(0,{})">"#, BAR_HEIGHT);
        // edges first so they end up underneath vertices and labels
        for edge in graph.edges() {
            let (Some(from), Some(to)) = (graph.vertex(edge.from), graph.vertex(edge.to)) else {
                continue;
            };
            let color = if edge.selected {
                VERTEX_SELECTED_COLOR
            } else {
                VERTEX_COLOR
            };
            let _ = writeln!(
                svg,
                r#"    <line name="{}" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
                escape_xml(&edge.name()),
                from.center.x,
                from.center.y,
                to.center.x,
                to.center.y,
                color,
                diameter / 10
            );
        }
        let label_font_size = diameter * 2 / 5;
        for edge in graph.edges() {
            if let Some(position) = graph.weight_label_position(edge) {
                let _ = writeln!(
                    svg,
                    r#"    <text name="{}" x="{}" y="{}" font-family="Arial" font-weight="bold" font-size="{}" fill="{}">{}</text>"#,
                    escape_xml(&edge.label_name()),
                    position.x,
                    position.y + label_font_size,
                    label_font_size,
                    VERTEX_COLOR,
                    edge.weight
                );
            }
        }
        let vertex_font_size = diameter * 4 / 5;
        for vertex in graph.vertices() {
            let fill = if vertex.selected {
                VERTEX_SELECTED_COLOR
            } else {
                VERTEX_COLOR
            };
            let _ = writeln!(
                svg,
                r#"    <circle name="{}" cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                escape_xml(&vertex.name()),
                vertex.center.x,
                vertex.center.y,
                diameter / 2,
                fill
            );
            let _ = writeln!(
                svg,
                r#"    <text name="VertexLabel {}" x="{}" y="{}" font-family="Arial" font-weight="bold" font-size="{}" text-anchor="middle" dominant-baseline="central" fill="{}">{}</text>"#,
                escape_xml(&vertex.label.to_string()),
                vertex.center.x,
                vertex.center.y,
                vertex_font_size,
                PANEL_COLOR,
                escape_xml(&vertex.label.to_string())
            );
        }
        let _ = writeln!(svg, "  </g>");

        let display_color = match display_background {
            DisplayBackground::Panel => PANEL_COLOR,
            DisplayBackground::Highlighted => HIGHLIGHT_PANEL_COLOR,
        };
        let display_top = BAR_HEIGHT + graph_height;
        let _ = writeln!(
            svg,
            r#"  <rect x="0" y="{}" width="{}" height="{}" fill="{}"/>"#,
            display_top, width, BAR_HEIGHT, display_color
        );
        let _ = writeln!(
            svg,
            r#"  <text name="Display" x="{}" y="{}" font-family="Arial" font-size="18" text-anchor="middle" fill="{}">{}</text>"#,
            width / 2,
            display_top + BAR_HEIGHT - 8,
            TEXT_COLOR,
            escape_xml(display_text)
        );
        svg.push_str("</svg>\n");
        svg
    }
}
