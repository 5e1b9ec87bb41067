use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use castrays::QueryRequest;
use castrays::config::{FileConfig, OutputFormat};
use castrays::faces::build_polygons;
use castrays::grid::{AsciiStyle, ContainmentMap, GridRange, evaluate, render_ascii};

/// Classify integer grid points against polygons projected from mesh faces
///
/// Examples:
///   # Evaluate a query file and print the JSON map
///   castrays scene.json
///
///   # Override the grid and preview it as text
///   castrays scene.json --min-x 0 --max-x 79 --min-y 0 --max-y 39 -f ascii
///
///   # Read the query from stdin and write a pretty map to a file
///   cat scene.json | castrays --pretty -o map.json
#[derive(Parser, Debug)]
#[command(name = "castrays")]
#[command(version, about, long_about = None)]
struct Args {
    /// Query JSON file, or - for stdin
    #[arg(default_value = "-")]
    query: PathBuf,

    /// Path to config file (optional, auto-searches castrays.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Smallest X of the grid (overrides the query)
    #[arg(long, allow_hyphen_values = true)]
    min_x: Option<i32>,

    /// Largest X of the grid (overrides the query)
    #[arg(long, allow_hyphen_values = true)]
    max_x: Option<i32>,

    /// Smallest Y of the grid (overrides the query)
    #[arg(long, allow_hyphen_values = true)]
    min_y: Option<i32>,

    /// Largest Y of the grid (overrides the query)
    #[arg(long, allow_hyphen_values = true)]
    max_y: Option<i32>,

    /// Output file (defaults to stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long)]
    format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Refuse grids with more cells than this
    #[arg(long)]
    max_cells: Option<u64>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = match args.config {
        Some(ref path) => FileConfig::from_path(path)?,
        None => FileConfig::load().unwrap_or_default(),
    };

    let verbose = args.verbose || file_config.verbose;
    let format = args.format.unwrap_or(file_config.format);
    let pretty = args.pretty || file_config.pretty;
    let max_cells = args.max_cells.unwrap_or(file_config.max_cells);
    let output = args.output.clone().or_else(|| file_config.output.clone());
    let style = AsciiStyle::from(file_config.ascii);

    init_logging(verbose);

    let spinner = create_spinner("Loading query...");
    let start = Instant::now();
    let query = load_query(&args.query)?;
    spinner.finish_with_message(format!(
        "Loaded {} face groups [{:.1}s]",
        query.face_groups.len(),
        start.elapsed().as_secs_f32()
    ));

    let spinner = create_spinner("Building polygons...");
    let start = Instant::now();
    let polygons = build_polygons(&query.face_groups).context("Failed to build polygons")?;
    spinner.finish_with_message(format!(
        "Built {} polygons in {} groups [{:.1}s]",
        polygons.polygon_count(),
        polygons.group_count(),
        start.elapsed().as_secs_f32()
    ));
    if verbose {
        if let Some(bounds) = polygons.bounds() {
            eprintln!(
                "  Polygon bounds: x {:.2}..{:.2}, y {:.2}..{:.2} ({:.2} x {:.2})",
                bounds.min_x,
                bounds.max_x,
                bounds.min_y,
                bounds.max_y,
                bounds.width(),
                bounds.height()
            );
        }
        eprintln!("  Total polygon area: {:.2}", polygons.total_area());
    }

    let range = query.resolve_range_with(cli_range(&args)?, &polygons)?;
    let cells = range.cell_count().unwrap_or(u64::MAX);
    if cells > max_cells {
        bail!(
            "Grid x {}..={}, y {}..={} has {} cells, more than the limit of {}",
            range.min_x,
            range.max_x,
            range.min_y,
            range.max_y,
            cells,
            max_cells
        );
    }
    if verbose {
        eprintln!(
            "  Grid: x {}..={}, y {}..={} ({} cells)",
            range.min_x, range.max_x, range.min_y, range.max_y, cells
        );
    }

    let spinner = create_spinner("Casting rays...");
    let start = Instant::now();
    let map = evaluate(&range, &polygons).context("Failed to evaluate grid")?;
    spinner.finish_with_message(format!(
        "Classified {} cells, {} inside [{:.1}s]",
        cells,
        map.inside_count(),
        start.elapsed().as_secs_f32()
    ));

    let rendered = render_output(&map, format, pretty, style)?;
    write_output(output.as_deref(), &rendered)?;

    eprintln!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    if let Some(path) = output {
        eprintln!("Output: {}", path.display());
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_query(path: &Path) -> Result<QueryRequest> {
    if path == Path::new("-") {
        let json = std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?;
        QueryRequest::from_json(&json)
    } else {
        QueryRequest::from_path(path)
    }
}

fn cli_range(args: &Args) -> Result<Option<GridRange>> {
    match (args.min_x, args.max_x, args.min_y, args.max_y) {
        (Some(min_x), Some(max_x), Some(min_y), Some(max_y)) => {
            Ok(Some(GridRange::new(min_x, max_x, min_y, max_y)))
        }
        (None, None, None, None) => Ok(None),
        _ => bail!("--min-x, --max-x, --min-y and --max-y must be given together"),
    }
}

fn render_output(
    map: &ContainmentMap,
    format: OutputFormat,
    pretty: bool,
    style: AsciiStyle,
) -> Result<String> {
    let mut text = match format {
        OutputFormat::Json if pretty => {
            serde_json::to_string_pretty(map).context("Failed to serialize map")?
        }
        OutputFormat::Json => serde_json::to_string(map).context("Failed to serialize map")?,
        OutputFormat::Ascii => return Ok(render_ascii(map, style)),
        OutputFormat::Summary => {
            let range = map.range();
            format!(
                "columns: {}\nrows: {}\ninside: {}\noutside: {}",
                range.width(),
                range.height(),
                map.inside_count(),
                range.width() * range.height() - map.inside_count()
            )
        }
    };
    text.push('\n');
    Ok(text)
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, text)
            .context(format!("Failed to write output file: {:?}", path)),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("Failed to write to stdout")
        }
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
