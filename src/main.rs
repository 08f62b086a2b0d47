use std::sync::Arc;

use clap::Parser;
use graph_visualizer::core::ConfigProvider;
use graph_visualizer::utils::error::{ErrorSeverity, VisualizerError};
use graph_visualizer::utils::{logger, validation::Validate};
use graph_visualizer::{CliConfig, LocalStorage, Session, VisualizerConfig};
use tokio::io::BufReader;

fn exit_code(error: &VisualizerError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,      // 警告，但成功
        ErrorSeverity::Medium => 2,   // 檔案錯誤
        ErrorSeverity::High => 1,     // 配置錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    }
}

fn fail(error: &VisualizerError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", error.recovery_suggestion());
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 建議: {}", error.recovery_suggestion());
    std::process::exit(exit_code(error));
}

fn load_config(cli: &CliConfig) -> Result<VisualizerConfig, VisualizerError> {
    let mut config = match &cli.config {
        Some(path) => VisualizerConfig::from_file(path)?,
        None => VisualizerConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

async fn run(cli: &CliConfig, config: &VisualizerConfig) -> Result<(), VisualizerError> {
    let storage = Arc::new(LocalStorage::new(config.output_path().to_string()));
    let mut session = Session::new(config, storage)?;
    let mut stdout = tokio::io::stdout();

    match &cli.script {
        Some(script) => {
            tracing::info!("📜 Running script: {}", script);
            let file = tokio::fs::File::open(script).await?;
            let failures = session
                .run_script(BufReader::new(file), &mut stdout)
                .await?;
            if failures > 0 {
                tracing::warn!("⚠️ {} command(s) failed", failures);
            }
        }
        None => {
            tracing::info!("⌨️ Reading commands from stdin, type `help` for the command list");
            session
                .run_interactive(BufReader::new(tokio::io::stdin()), &mut stdout)
                .await?;
        }
    }

    if let Some(svg_file) = &config.output.svg_file {
        session.export(svg_file).await?;
        tracing::info!("🖼️ Canvas rendered to: {}", svg_file);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 配置錯誤時 logger 還沒初始化，直接輸出到 stderr
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e).max(1));
        }
    };

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose, config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting graph-visualizer");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
        tracing::debug!("Canvas: {:?}", config.canvas_settings());
    }

    if let Err(e) = run(&cli, &config).await {
        fail(&e);
    }

    tracing::info!("👋 graph-visualizer finished");
    Ok(())
}
