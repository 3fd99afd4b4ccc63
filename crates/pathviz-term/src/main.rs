//! pathviz: watch Dijkstra's algorithm explore a grid in the terminal.

mod app;
mod screen;

use std::fs::File;
use std::path::PathBuf;

use clap::Parser;

use pathviz_core::VizConfig;
use pathviz_core::config::{DEFAULT_DELAY_MS, DEFAULT_DIM};
use pathviz_session::FileStore;

use app::App;

/// Interactive shortest-path visualizer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of rows
    #[arg(long, default_value_t = DEFAULT_DIM)]
    rows: i32,

    /// Number of columns
    #[arg(long, default_value_t = DEFAULT_DIM)]
    cols: i32,

    /// Square grid size; overrides --rows and --cols
    #[arg(short, long)]
    size: Option<i32>,

    /// Pause after each visited cell, in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_DELAY_MS)]
    delay_ms: u64,

    /// File used by save and load
    #[arg(long, default_value = "pathviz-grid.json")]
    save_file: PathBuf,

    /// Write logs to this file (RUST_LOG selects the level)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> VizConfig {
        let (rows, cols) = match self.size {
            Some(n) => (n, n),
            None => (self.rows, self.cols),
        };
        VizConfig {
            rows,
            cols,
            delay_ms: self.delay_ms,
        }
    }
}

fn init_logging(path: Option<&PathBuf>) -> std::io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let config = args.config();
    let mut app = App::new(config, FileStore::new(&args.save_file))?;
    log::info!("starting with a {}x{} grid", config.rows, config.cols);
    app::run(&mut app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_overrides_rows_and_cols() {
        let args = Args::parse_from(["pathviz", "--rows", "7", "--size", "12"]);
        assert_eq!(args.config().dims(), pathviz_core::Dims::square(12));
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["pathviz"]);
        let config = args.config();
        assert_eq!(config, VizConfig::default());
        assert_eq!(args.save_file, PathBuf::from("pathviz-grid.json"));
        assert!(args.log_file.is_none());
    }

    #[test]
    fn rectangular_grid() {
        let args = Args::parse_from(["pathviz", "--rows", "6", "--cols", "9", "-d", "10"]);
        let config = args.config();
        assert_eq!((config.rows, config.cols, config.delay_ms), (6, 9, 10));
    }
}
