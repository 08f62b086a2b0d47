use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::core::application::{ApplicationModel, ClickOutcome};
use crate::core::player::PlayerTick;
use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{AlgorithmType, GraphSnapshot, Mode, Point};
use crate::utils::error::{Result, VisualizerError};
use crate::utils::validation::validate_vertex_label;
use crate::view::{ResultLabel, StatusLabel, SvgRenderer};

pub const HELP_TEXT: &str = "\
Commands:
  mode <none|add-vertex|add-edge|remove-vertex|remove-edge>
  click <x> <y> [input]        click on the canvas, input answers the id/weight dialog
  add-vertex <id> <x> <y>      add a vertex centered at (x, y)
  add-edge <a> <b> <weight>    connect two vertices, weight is a single signed digit
  remove-vertex <id>           remove a vertex and its edges
  remove-edge <a> <b>          remove an edge
  algorithm <dfs|bfs|dijkstra|prim>
  start <id>                   choose the starting vertex of the selected algorithm
  new                          clear the graph
  status | show                print the labels / list the graph
  save <file> | load <file>    store or restore the graph as JSON
  render <file>                write the canvas as SVG
  help | exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Mode(Mode),
    Click { point: Point, input: Option<String> },
    AddVertex { input: String, point: Point },
    AddEdge { from: char, to: char, weight: String },
    RemoveVertex(char),
    RemoveEdge(char, char),
    Algorithm(AlgorithmType),
    Start(char),
    New,
    Status,
    Show,
    Save(String),
    Load(String),
    Render(String),
    Help,
    Exit,
}

fn coordinate(value: Option<&str>, name: &str) -> Result<i32> {
    let value = value.ok_or_else(|| VisualizerError::command(format!("missing {}", name)))?;
    value
        .parse()
        .map_err(|_| VisualizerError::invalid_input(name, value, "expected an integer"))
}

fn label_arg(value: Option<&str>) -> Result<char> {
    validate_vertex_label(value.ok_or_else(|| VisualizerError::command("missing vertex id"))?)
}

fn file_arg(value: Option<&str>) -> Result<String> {
    value
        .map(str::to_string)
        .ok_or_else(|| VisualizerError::command("missing file name"))
}

impl Command {
    /// 解析一行指令；空行與 `#` 註解回傳 None
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let mut args = line.split_whitespace();
        let keyword = args.next().unwrap_or_default().to_ascii_lowercase();

        let command = match keyword.as_str() {
            "mode" => Command::Mode(
                args.next()
                    .ok_or_else(|| VisualizerError::command("missing mode"))?
                    .parse()?,
            ),
            "click" => Command::Click {
                point: Point::new(coordinate(args.next(), "x")?, coordinate(args.next(), "y")?),
                input: args.next().map(str::to_string),
            },
            "add-vertex" => Command::AddVertex {
                input: args
                    .next()
                    .ok_or_else(|| VisualizerError::command("missing vertex id"))?
                    .to_string(),
                point: Point::new(coordinate(args.next(), "x")?, coordinate(args.next(), "y")?),
            },
            "add-edge" => Command::AddEdge {
                from: label_arg(args.next())?,
                to: label_arg(args.next())?,
                weight: args
                    .next()
                    .ok_or_else(|| VisualizerError::command("missing weight"))?
                    .to_string(),
            },
            "remove-vertex" => Command::RemoveVertex(label_arg(args.next())?),
            "remove-edge" => Command::RemoveEdge(label_arg(args.next())?, label_arg(args.next())?),
            "algorithm" => Command::Algorithm(
                args.next()
                    .ok_or_else(|| VisualizerError::command("missing algorithm"))?
                    .parse()?,
            ),
            "start" => Command::Start(label_arg(args.next())?),
            "new" => Command::New,
            "status" => Command::Status,
            "show" => Command::Show,
            "save" => Command::Save(file_arg(args.next())?),
            "load" => Command::Load(file_arg(args.next())?),
            "render" => Command::Render(file_arg(args.next())?),
            "help" => Command::Help,
            "exit" | "quit" => Command::Exit,
            other => {
                return Err(VisualizerError::command(format!("unknown command '{}'", other)))
            }
        };

        if let Some(extra) = args.next() {
            return Err(VisualizerError::command(format!(
                "unexpected argument '{}' for '{}'",
                extra, keyword
            )));
        }
        Ok(Some(command))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue(Vec<String>),
    Exit,
}

fn describe(outcome: &ClickOutcome) -> String {
    match outcome {
        ClickOutcome::Ignored => "nothing to do here".to_string(),
        ClickOutcome::Cancelled => "cancelled".to_string(),
        ClickOutcome::VertexAdded(label) => format!("added Vertex {}", label),
        ClickOutcome::VertexSelected(label) => format!("selected Vertex {}", label),
        ClickOutcome::EdgeAdded(from, to) => format!("added Edge <{} -> {}>", from, to),
        ClickOutcome::VertexRemoved(label) => format!("removed Vertex {}", label),
        ClickOutcome::EdgeRemoved(from, to) => format!("removed Edge <{} -> {}>", from, to),
        ClickOutcome::AlgorithmStarted(label) => format!("started from Vertex {}", label),
    }
}

/// A command session driving the application model, the way menus and mouse clicks drive
/// the visualizer window.
pub struct Session {
    model: ApplicationModel,
    status: StatusLabel,
    result: ResultLabel,
    storage: Arc<dyn Storage>,
    renderer: SvgRenderer,
    play_delay: Duration,
}

impl Session {
    pub fn new<C: ConfigProvider>(config: &C, storage: Arc<dyn Storage>) -> Result<Self> {
        let canvas = config.canvas();
        let mut model = ApplicationModel::new(canvas);
        let status = StatusLabel::new(Mode::START);
        let result = ResultLabel::new();
        model.register_listener(Box::new(status.clone()));
        model.register_listener(Box::new(result.clone()));
        if canvas.corner_vertices {
            model.add_corner_vertices()?;
        }

        Ok(Self {
            model,
            status,
            result,
            storage,
            renderer: SvgRenderer::new(canvas),
            play_delay: config.play_delay(),
        })
    }

    pub fn model(&self) -> &ApplicationModel {
        &self.model
    }

    pub fn status_text(&self) -> String {
        self.status.text()
    }

    pub fn display_text(&self) -> String {
        self.result.text()
    }

    pub fn render_svg(&self) -> String {
        self.renderer.render(
            self.model.graph(),
            &self.status_text(),
            &self.display_text(),
            self.result.background(),
        )
    }

    pub async fn export(&self, file: &str) -> Result<()> {
        self.storage
            .write_file(file, self.render_svg().as_bytes())
            .await
    }

    fn vertex_center(&self, label: char) -> Result<Point> {
        let center = self.model.graph().require_vertex(label)?.center;
        // another vertex drawn on top would receive the click
        if self.model.graph().vertex_at(&center) != Some(label) {
            return Err(VisualizerError::command(format!(
                "Vertex {} is covered by another vertex",
                label
            )));
        }
        Ok(center)
    }

    /// a point on the edge a-b that hits this edge and no other element
    fn edge_point(&self, a: char, b: char) -> Result<Point> {
        let graph = self.model.graph();
        let edge = graph
            .edge(a, b)
            .ok_or(VisualizerError::EdgeNotFound { from: a, to: b })?;
        let from = graph.require_vertex(edge.from)?.center;
        let to = graph.require_vertex(edge.to)?.center;
        let along = |a: i32, b: i32, i: i64| (a as i64 + (b as i64 - a as i64) * i / 10) as i32;
        (1..10)
            .map(|i| Point::new(along(from.x, to.x, i), along(from.y, to.y, i)))
            .find(|point| graph.edge_at(point) == Some((edge.from, edge.to)))
            .ok_or_else(|| VisualizerError::command(format!("{} cannot be clicked", edge.name())))
    }

    pub async fn execute_line(&mut self, line: &str) -> Result<CommandOutcome> {
        match Command::parse(line)? {
            Some(command) => self.execute(command).await,
            None => Ok(CommandOutcome::Continue(Vec::new())),
        }
    }

    pub async fn execute(&mut self, command: Command) -> Result<CommandOutcome> {
        tracing::debug!("executing {:?}", command);
        let lines = match command {
            Command::Mode(mode) => {
                self.model.set_mode(mode);
                vec![self.status_text()]
            }
            Command::Click { point, input } => {
                vec![describe(&self.model.click(point, input.as_deref())?)]
            }
            Command::AddVertex { input, point } => {
                self.model.set_mode(Mode::AddVertex);
                vec![describe(&self.model.click(point, Some(input.as_str()))?)]
            }
            Command::AddEdge { from, to, weight } => {
                if from == to {
                    return Err(VisualizerError::command("an edge needs two different vertices"));
                }
                self.model.set_mode(Mode::AddEdge);
                let first = self.vertex_center(from)?;
                let second = self.vertex_center(to)?;
                self.model.click(first, None)?;
                let outcome = self.model.click(second, Some(weight.as_str()));
                if outcome.is_err() {
                    // drop the pending selection of the first vertex
                    self.model.set_mode(Mode::AddEdge);
                }
                vec![describe(&outcome?)]
            }
            Command::RemoveVertex(label) => {
                self.model.set_mode(Mode::RemoveVertex);
                let center = self.vertex_center(label)?;
                vec![describe(&self.model.click(center, None)?)]
            }
            Command::RemoveEdge(a, b) => {
                self.model.set_mode(Mode::RemoveEdge);
                let point = self.edge_point(a, b)?;
                vec![describe(&self.model.click(point, None)?)]
            }
            Command::Algorithm(algorithm_type) => {
                self.model.start_algorithm(algorithm_type);
                vec![
                    format!("{} selected", algorithm_type.algorithm_name()),
                    self.display_text(),
                ]
            }
            Command::Start(label) => {
                if self.model.algorithm_type().is_none() {
                    return Err(VisualizerError::command(
                        "choose an algorithm before choosing a starting vertex",
                    ));
                }
                let center = self.vertex_center(label)?;
                vec![describe(&self.model.click(center, None)?)]
            }
            Command::New => {
                self.model.request_reset_graph();
                vec!["new graph".to_string()]
            }
            Command::Status => vec![self.status_text(), self.display_text()],
            Command::Show => self.graph_listing(),
            Command::Save(file) => {
                let snapshot = self.model.graph().snapshot();
                let data = serde_json::to_vec_pretty(&snapshot)?;
                self.storage.write_file(&file, &data).await?;
                tracing::info!("💾 Graph saved to: {}", file);
                vec![format!("saved {}", file)]
            }
            Command::Load(file) => {
                let data = self.storage.read_file(&file).await?;
                let snapshot: GraphSnapshot = serde_json::from_slice(&data)?;
                self.model.load_snapshot(&snapshot)?;
                tracing::info!("📁 Graph loaded from: {}", file);
                vec![format!(
                    "loaded {} ({} vertices, {} edges)",
                    file,
                    self.model.graph().vertices().len(),
                    self.model.graph().edges().len()
                )]
            }
            Command::Render(file) => {
                self.export(&file).await?;
                vec![format!("rendered {}", file)]
            }
            Command::Help => vec![HELP_TEXT.to_string()],
            Command::Exit => return Ok(CommandOutcome::Exit),
        };
        Ok(CommandOutcome::Continue(lines))
    }

    fn graph_listing(&self) -> Vec<String> {
        let graph = self.model.graph();
        if graph.is_empty() {
            return vec!["empty graph".to_string()];
        }
        let mark = |selected: bool| if selected { " *" } else { "" };
        graph
            .vertices()
            .iter()
            .map(|v| format!("{} at {}{}", v.name(), v.center, mark(v.selected)))
            .chain(
                graph
                    .edges()
                    .iter()
                    .map(|e| format!("{} weight {}{}", e.name(), e.weight, mark(e.selected))),
            )
            .collect()
    }

    async fn emit<W: AsyncWrite + Unpin>(writer: &mut W, lines: &[String]) -> Result<()> {
        for line in lines.iter().filter(|l| !l.is_empty()) {
            writer
                .write_all(format!("{}\n", line).as_bytes())
                .await
                .map_err(VisualizerError::session_io)?;
        }
        writer.flush().await.map_err(VisualizerError::session_io)
    }

    async fn report_error<W: AsyncWrite + Unpin>(writer: &mut W, error: &VisualizerError) -> Result<()> {
        tracing::warn!("⚠️ {} (Category: {:?})", error, error.category());
        Self::emit(writer, &[format!("❌ {}", error.user_friendly_message())]).await
    }

    /// Run a command script. Every command waits until a started traversal has been played.
    /// Returns the number of commands that failed.
    pub async fn run_script<R, W>(&mut self, reader: R, writer: &mut W) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut failures = 0;
        let mut line_number = 0;
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(VisualizerError::session_io)?
        {
            line_number += 1;
            match self.execute_line(&line).await {
                Ok(CommandOutcome::Exit) => break,
                Ok(CommandOutcome::Continue(output)) => Self::emit(writer, &output).await?,
                Err(e) => {
                    failures += 1;
                    tracing::debug!("line {} failed", line_number);
                    Self::report_error(writer, &e).await?;
                }
            }
            if self.model.is_playing() {
                self.model.play_to_end(self.play_delay).await;
                Self::emit(writer, &[self.display_text()]).await?;
            }
        }
        Ok(failures)
    }

    /// Read commands interactively while a started traversal keeps playing in between.
    pub async fn run_interactive<R, W>(&mut self, reader: R, writer: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        Self::emit(writer, &[self.status_text()]).await?;
        loop {
            let playing = self.model.is_playing();
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.map_err(VisualizerError::session_io)? else {
                        break;
                    };
                    match self.execute_line(&line).await {
                        Ok(CommandOutcome::Exit) => break,
                        Ok(CommandOutcome::Continue(output)) => Self::emit(writer, &output).await?,
                        Err(e) => Self::report_error(writer, &e).await?,
                    }
                }
                _ = tokio::time::sleep(self.play_delay), if playing => {
                    if let PlayerTick::Finished(_) = self.model.tick() {
                        Self::emit(writer, &[self.display_text()]).await?;
                    }
                }
            }
        }
        if self.model.is_playing() {
            self.model.play_to_end(Duration::ZERO).await;
            Self::emit(writer, &[self.display_text()]).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("  # comment").unwrap(), None);
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(
            Command::parse("MODE add-edge").unwrap(),
            Some(Command::Mode(Mode::AddEdge))
        );
        assert_eq!(
            Command::parse("click 10 20").unwrap(),
            Some(Command::Click {
                point: Point::new(10, 20),
                input: None
            })
        );
        assert_eq!(
            Command::parse("add-edge A B -3").unwrap(),
            Some(Command::AddEdge {
                from: 'A',
                to: 'B',
                weight: "-3".to_string()
            })
        );
        assert_eq!(
            Command::parse("algorithm prim").unwrap(),
            Some(Command::Algorithm(AlgorithmType::Prim))
        );
        assert_eq!(Command::parse("quit").unwrap(), Some(Command::Exit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("fly away").is_err());
        assert!(Command::parse("click 10").is_err());
        assert!(Command::parse("click x 10").is_err());
        assert!(Command::parse("remove-vertex AB").is_err());
        assert!(Command::parse("new graph").is_err());
        assert!(Command::parse("algorithm kruskal").is_err());
        assert!(Command::parse("save").is_err());
    }
}
