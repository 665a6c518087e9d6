use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use gitscope_core::RepoContext;
use gitscope_git::LogReader;
use gitscope_graph::Palette;
use gitscope_logging::{init_tracing, LogEvent, LogFormat, Logger};

mod config;
mod render;

use config::ProjectConfig;
use render::GraphRenderer;

#[derive(Parser, Debug)]
#[command(
    name = "gitscope",
    about = "Commit-graph viewer for git repositories",
    version,
    author
)]
struct Cli {
    /// Repository to inspect (default: current directory)
    #[arg(short = 'C', long)]
    repo: Option<PathBuf>,

    /// Maximum number of commits to load (default: full history)
    #[arg(short = 'n', long)]
    max_count: Option<usize>,

    /// Commits fetched per history page
    #[arg(long)]
    page_size: Option<usize>,

    /// Walk only the checked-out branch instead of all local branches
    #[arg(long)]
    head_only: bool,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormatChoice,

    /// Log level filter (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Output the layout as JSON instead of drawing it
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let repo_dir = match cli.repo.clone() {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    let log_format: LogFormat = cli.log_format.into();
    init_tracing(&cli.log_level, log_format);
    let logger = Logger::new(log_format);

    let config = ProjectConfig::load_with_fallback(&repo_dir)?;
    let page_size = config.effective_page_size(cli.page_size);
    let all_branches = config.effective_all_branches(cli.head_only);
    let palette = Palette::new(config.graph.colors.clone());

    let reader = LogReader::new().with_all_branches(all_branches);
    let mut context = RepoContext::open_with(repo_dir, page_size, reader, palette)
        .context("Failed to open repository")?;

    logger.log(&LogEvent::RepoOpened {
        path: context.repo_path().to_path_buf(),
        branches: context.branches().len(),
        current_branch: context.current_branch().map(str::to_string),
    });

    loop {
        let appended = context.load_next_page().context("Failed to load history")?;
        if appended == 0 {
            break;
        }
        logger.log(&LogEvent::PageLoaded {
            page: context.pages_loaded(),
            commits: appended,
            total_loaded: context.loaded(),
        });
        if cli.max_count.is_some_and(|max| context.loaded() >= max) {
            break;
        }
    }

    let graph = context.layout();

    logger.log(&LogEvent::LayoutComputed {
        commits: graph.nodes.len(),
        lanes: graph.lanes.len(),
        columns: graph.column_count(),
        curves: graph.curves.len(),
    });
    if !graph.unresolved_refs.is_empty() {
        logger.log(&LogEvent::RefsUnresolved {
            count: graph.unresolved_refs.len(),
        });
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&graph)?;
        println!("{}", json);
    } else {
        let renderer = GraphRenderer::new(!cli.no_color);
        print!("{}", renderer.render(&graph, context.commits()));
    }

    Ok(())
}
