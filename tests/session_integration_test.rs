use graph_visualizer::domain::model::AlgorithmState;
use graph_visualizer::utils::error::{ErrorSeverity, VisualizerError};
use graph_visualizer::{LocalStorage, Session, VisualizerConfig};
use std::io::ErrorKind;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::BufReader;

const GRAPH_SCRIPT: &str = "\
# 五個頂點的測試圖
add-vertex A 100 100
add-vertex B 300 100
add-vertex C 100 300
add-vertex D 300 300
add-vertex E 100 450
add-edge A B 1
add-edge A C 2
add-edge B D 3
add-edge C D 1
add-edge C E 4
";

fn test_config(delay_ms: u64) -> VisualizerConfig {
    VisualizerConfig::from_toml_str(&format!(
        "[canvas]\ncorner_vertices = false\n\n[player]\ndelay_ms = {}\n",
        delay_ms
    ))
    .unwrap()
}

fn session_with_delay(temp_dir: &TempDir, delay_ms: u64) -> Session {
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    Session::new(&test_config(delay_ms), Arc::new(storage)).unwrap()
}

fn new_session(temp_dir: &TempDir) -> Session {
    session_with_delay(temp_dir, 0)
}

async fn run(session: &mut Session, script: &str) -> (usize, String) {
    let mut output = Vec::new();
    let failures = session
        .run_script(script.as_bytes(), &mut output)
        .await
        .unwrap();
    (failures, String::from_utf8(output).unwrap())
}

#[tokio::test]
async fn test_build_graph_from_script() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = new_session(&temp_dir);

    let (failures, output) = run(&mut session, GRAPH_SCRIPT).await;

    assert_eq!(failures, 0, "unexpected failures:\n{}", output);
    assert_eq!(session.model().graph().vertices().len(), 5);
    assert_eq!(session.model().graph().edges().len(), 5);
    assert!(output.contains("added Vertex E"));
    assert!(output.contains("added Edge <C -> E>"));
    assert_eq!(session.status_text(), "Current Mode -> Add an Edge");
}

#[tokio::test]
async fn test_every_algorithm_from_a() {
    let cases = [
        ("dfs", "DFS : A -> B -> D -> C -> E"),
        ("bfs", "BFS : A -> B -> C -> D -> E"),
        ("dijkstra", "B=1, C=2, D=3, E=6"),
        ("prim", "B=A, C=A, D=C, E=C"),
    ];

    for (algorithm, expected) in cases {
        let temp_dir = TempDir::new().unwrap();
        let mut session = new_session(&temp_dir);
        run(&mut session, GRAPH_SCRIPT).await;

        let script = format!("algorithm {}\nstart A\n", algorithm);
        let (failures, output) = run(&mut session, &script).await;

        assert_eq!(failures, 0);
        assert!(output.contains("Please choose a starting vertex"));
        assert!(output.contains("started from Vertex A"));
        assert_eq!(session.display_text(), expected, "algorithm {}", algorithm);
        assert!(output.trim_end().ends_with(expected));
        assert_eq!(
            session.model().algorithm_state(),
            Some(AlgorithmState::Terminated)
        );
    }
}

#[tokio::test]
async fn test_algorithm_can_be_restarted_from_another_vertex() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = new_session(&temp_dir);
    run(&mut session, GRAPH_SCRIPT).await;

    run(&mut session, "algorithm bfs\nstart A\nstart E\n").await;

    assert_eq!(session.display_text(), "BFS : E -> C -> D -> A -> B");
}

#[tokio::test]
async fn test_mode_change_stops_algorithm() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = new_session(&temp_dir);
    run(&mut session, GRAPH_SCRIPT).await;

    let (failures, _) = run(&mut session, "algorithm dfs\nstart A\nmode remove-vertex\n").await;

    assert_eq!(failures, 0);
    assert_eq!(session.display_text(), "");
    assert_eq!(
        session.model().algorithm_state(),
        Some(AlgorithmState::Stopped)
    );
    assert_eq!(session.status_text(), "Current Mode -> Remove a Vertex");
    assert!(session
        .model()
        .graph()
        .vertices()
        .iter()
        .all(|v| !v.selected));
}

#[tokio::test]
async fn test_remove_commands() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = new_session(&temp_dir);
    run(&mut session, GRAPH_SCRIPT).await;

    let (failures, output) = run(&mut session, "remove-edge C A\nremove-vertex D\nshow\n").await;

    assert_eq!(failures, 0, "{}", output);
    assert!(output.contains("removed Edge <A -> C>"));
    assert!(output.contains("removed Vertex D"));
    let graph = session.model().graph();
    assert_eq!(graph.vertices().len(), 4);
    // A-B and C-E remain
    assert_eq!(graph.edges().len(), 2);
    assert!(graph.edge('B', 'D').is_none());
    assert!(output.contains("Edge <A -> B> weight 1"));
}

#[tokio::test]
async fn test_errors_are_reported_and_session_continues() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = new_session(&temp_dir);

    let script = "\
add-vertex AB 100 100
add-vertex A 100 100
add-edge A Z 1
add-vertex Q 900 100
fly away
start A
add-vertex B 300 100
add-edge A B 12
add-edge A B 7
";
    let (failures, output) = run(&mut session, script).await;

    assert_eq!(failures, 6, "{}", output);
    assert_eq!(output.matches("❌").count(), 6);
    assert!(output.contains("Vertex 'Z' not found"));
    assert_eq!(session.model().graph().vertices().len(), 2);
    assert_eq!(session.model().graph().edge('A', 'B').unwrap().weight, 7);
}

#[tokio::test]
async fn test_exit_stops_reading() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = new_session(&temp_dir);

    run(&mut session, "add-vertex A 100 100\nexit\nadd-vertex B 300 100\n").await;

    assert_eq!(session.model().graph().vertices().len(), 1);
}

#[tokio::test]
async fn test_new_clears_graph() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = new_session(&temp_dir);
    run(&mut session, GRAPH_SCRIPT).await;

    let (_, output) = run(&mut session, "mode remove-edge\nnew\nstatus\nshow\n").await;

    assert!(output.trim_end().ends_with("empty graph"));
    assert!(session.model().graph().is_empty());
    assert_eq!(session.status_text(), "Current Mode -> Add a Vertex");
}

#[tokio::test]
async fn test_corner_vertices_are_placed() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let session = Session::new(&VisualizerConfig::default(), Arc::new(storage)).unwrap();

    let labels: Vec<char> = session
        .model()
        .graph()
        .vertices()
        .iter()
        .map(|v| v.label)
        .collect();
    assert_eq!(labels, vec!['0', '1', '2', '3']);
}

#[tokio::test]
async fn test_interactive_session_finishes_playback() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = new_session(&temp_dir);
    run(&mut session, GRAPH_SCRIPT).await;

    let mut output = Vec::new();
    session
        .run_interactive("algorithm bfs\nstart A\n".as_bytes(), &mut output)
        .await
        .unwrap();
    let output = String::from_utf8(output).unwrap();

    assert!(output.starts_with("Current Mode -> Add an Edge"));
    assert!(output.contains("BFS : A -> B -> C -> D -> E"));
    assert_eq!(session.display_text(), "BFS : A -> B -> C -> D -> E");
}

#[tokio::test]
async fn test_click_far_outside_canvas_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let config = VisualizerConfig::from_toml_str("[player]\ndelay_ms = 0\n").unwrap();
    let mut session = Session::new(&config, Arc::new(storage)).unwrap();

    let script = "\
mode remove-vertex
click -2147483648 0
click 0 2147483647
click 25 25
";
    let (failures, output) = run(&mut session, script).await;

    assert_eq!(failures, 2, "{}", output);
    assert!(output.contains("Point (-2147483648, 0) is outside of the canvas"));
    assert!(output.contains("removed Vertex 0"));
    assert_eq!(session.model().graph().vertices().len(), 3);
}

#[tokio::test]
async fn test_interactive_mode_change_stops_running_playback() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = session_with_delay(&temp_dir, 200);
    run(&mut session, GRAPH_SCRIPT).await;

    // BFS needs five ticks, the mode change arrives between the first and the second one
    let input = tokio_test::io::Builder::new()
        .read(b"algorithm bfs\nstart A\n")
        .wait(Duration::from_millis(300))
        .read(b"mode none\n")
        .build();
    let mut output = Vec::new();
    session
        .run_interactive(BufReader::new(input), &mut output)
        .await
        .unwrap();
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("started from Vertex A"));
    assert!(!output.contains("BFS : A"));
    assert_eq!(
        session.model().algorithm_state(),
        Some(AlgorithmState::Stopped)
    );
    assert!(!session.model().is_playing());
    assert_eq!(session.display_text(), "");
    assert_eq!(session.status_text(), "Current Mode -> None");
}

#[tokio::test]
async fn test_broken_output_stream_aborts_session() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = new_session(&temp_dir);
    let mut output = tokio_test::io::Builder::new()
        .write_error(std::io::Error::new(ErrorKind::BrokenPipe, "closed"))
        .build();

    let err = session
        .run_script("status\n".as_bytes(), &mut output)
        .await
        .unwrap_err();

    assert!(matches!(err, VisualizerError::SessionIoError(_)));
    assert_eq!(err.severity(), ErrorSeverity::Critical);
}

#[tokio::test]
async fn test_broken_input_stream_aborts_interactive_session() {
    let temp_dir = TempDir::new().unwrap();
    let mut session = new_session(&temp_dir);
    let input = tokio_test::io::Builder::new()
        .read(b"add-vertex A 100 100\n")
        .read_error(std::io::Error::other("terminal lost"))
        .build();
    let mut output = Vec::new();

    let err = session
        .run_interactive(BufReader::new(input), &mut output)
        .await
        .unwrap_err();

    assert_eq!(err.severity(), ErrorSeverity::Critical);
    assert_eq!(session.model().graph().vertices().len(), 1);
}
