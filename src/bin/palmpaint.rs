//! Headless palmpaint CLI: create, paint and convert land-use grids.
//!
//! Usage examples:
//!   palmpaint new -o park.json --nx 40 --ny 30 --res 2
//!   palmpaint paint park.json --tool water --at 10,12 --at 10,13 --size 3
//!   palmpaint paint park.json --tool building --at 5,5 --building-height 12
//!   palmpaint export park.json -o park_static.nc
//!   palmpaint import park_static.nc -o restored.json
//!   palmpaint report park_static.nc -o report.txt
//!   palmpaint preview park.json -o park.png --scale 8

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use palmpaint::brush::PaintSession;
use palmpaint::codec::{preview, project, raster};
use palmpaint::core::config::EditorConfig;
use palmpaint::core::types::{CellCoord, Result};
use palmpaint::grid::Grid;
use palmpaint::report;
use palmpaint::tool::{BuildingParams, Tool};

/// Land-use grid editor for PALM static drivers.
#[derive(Parser, Debug)]
#[command(name = "palmpaint", version, about = "Paint land-use grids and export PALM static drivers")]
struct Cli {
    /// JSON config file. Falls back to $PALMPAINT_CONFIG, then built-in defaults.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a bare-soil project
    New {
        /// Output project file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
        /// Cells in x (defaults to the config)
        #[arg(long)]
        nx: Option<usize>,
        /// Cells in y (defaults to the config)
        #[arg(long)]
        ny: Option<usize>,
        /// Cell size in meters (defaults to the config)
        #[arg(long)]
        res: Option<f64>,
    },

    /// Paint one stroke through the given cells
    Paint {
        /// Project or raster to edit
        input: PathBuf,
        /// vegetation, pavement, soil, water or building
        #[arg(short, long)]
        tool: Tool,
        /// Stroke point as "row,col". Repeat for a drag.
        #[arg(long = "at", value_name = "ROW,COL", required = true, value_parser = parse_cell)]
        at: Vec<CellCoord>,
        /// Brush size (odd, 1-9)
        #[arg(short, long)]
        size: Option<u32>,
        #[command(flatten)]
        building: BuildingArgs,
        /// Output project file (defaults to overwriting a project input)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Apply a tool to every cell
    Fill {
        input: PathBuf,
        #[arg(short, long)]
        tool: Tool,
        #[command(flatten)]
        building: BuildingArgs,
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Write a netCDF static driver
    Export {
        input: PathBuf,
        #[arg(short, long, value_name = "FILE.nc")]
        output: PathBuf,
        /// Title attribute (defaults to the config)
        #[arg(long)]
        title: Option<String>,
        /// Author attribute (defaults to the config)
        #[arg(long)]
        author: Option<String>,
    },

    /// Convert a netCDF static driver to a project file
    Import {
        input: PathBuf,
        #[arg(short, long, value_name = "FILE.json")]
        output: PathBuf,
    },

    /// Print or save the domain report
    Report {
        input: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Render a PNG preview
    Preview {
        input: PathBuf,
        #[arg(short, long, value_name = "FILE.png")]
        output: PathBuf,
        /// Image pixels per cell
        #[arg(long, default_value_t = 8)]
        scale: u32,
    },
}

/// Building tool overrides
#[derive(clap::Args, Debug)]
struct BuildingArgs {
    #[arg(long)]
    building_id: Option<i32>,
    /// Meters
    #[arg(long)]
    building_height: Option<f64>,
    #[arg(long)]
    building_type: Option<i32>,
}

impl BuildingArgs {
    fn apply_to(&self, mut params: BuildingParams) -> BuildingParams {
        if let Some(id) = self.building_id {
            params.id = id;
        }
        if let Some(height) = self.building_height {
            params.height = height;
        }
        if let Some(kind) = self.building_type {
            params.kind = kind;
        }
        params
    }
}

fn parse_cell(s: &str) -> std::result::Result<CellCoord, String> {
    project::parse_key(s).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    palmpaint::core::logging::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = EditorConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Command::New { output, nx, ny, res } => {
            let grid = Grid::new(
                nx.unwrap_or(config.grid.nx),
                ny.unwrap_or(config.grid.ny),
                res.unwrap_or(config.grid.res),
            )?
            .with_origin(config.origin);
            project::save(&grid, &output)?;
        }

        Command::Paint { input, tool, at, size, building, output } => {
            let mut session = open_session(&input, &config, &building)?;
            session
                .set_tool(tool)
                .set_brush_size(size.unwrap_or(config.brush_size));
            let written = session.stroke(&at);
            log::info!("Painted {} cells with {}", written, tool);
            project::save(session.grid(), output_path(&input, output.as_deref())?)?;
        }

        Command::Fill { input, tool, building, output } => {
            let mut session = open_session(&input, &config, &building)?;
            session.set_tool(tool);
            let written = session.fill();
            log::info!("Filled {} cells with {}", written, tool);
            project::save(session.grid(), output_path(&input, output.as_deref())?)?;
        }

        Command::Export { input, output, title, author } => {
            let grid = load_grid(&input, &config)?;
            let mut driver = config.driver.clone();
            if let Some(title) = title {
                driver.title = title;
            }
            if let Some(author) = author {
                driver.author = author;
            }
            raster::save(&grid, &driver, &output)?;
        }

        Command::Import { input, output } => {
            let decoded = raster::load(&input)?;
            if !decoded.missing_channels.is_empty() {
                log::info!(
                    "Channels not in {}: {}",
                    input.display(),
                    decoded.missing_channels.join(", ")
                );
            }
            project::save(&decoded.grid, &output)?;
        }

        Command::Report { input, output } => {
            let grid = load_grid(&input, &config)?;
            let domain = report::generate(&grid);
            match output {
                Some(path) => domain.save(&path)?,
                None => print!("{}", domain.to_text(chrono::Local::now().naive_local())),
            }
        }

        Command::Preview { input, output, scale } => {
            let grid = load_grid(&input, &config)?;
            preview::save(&grid, scale, &output)?;
        }
    }
    Ok(())
}

/// Load a grid from a project file or a netCDF raster, sniffed by content
fn load_grid(path: &Path, config: &EditorConfig) -> Result<Grid> {
    let bytes = std::fs::read(path)?;
    if raster::is_raster(&bytes) {
        let decoded = raster::decode(&bytes)?;
        if !decoded.missing_channels.is_empty() {
            log::debug!("Substituted channels: {}", decoded.missing_channels.join(", "));
        }
        Ok(decoded.grid)
    } else {
        // project files carry no geo-reference
        Ok(project::load(path)?.with_origin(config.origin))
    }
}

fn open_session(input: &Path, config: &EditorConfig, building: &BuildingArgs) -> Result<PaintSession> {
    let grid = load_grid(input, config)?;
    let defaults = config
        .building
        .unwrap_or_else(|| BuildingParams::for_resolution(grid.res()));
    let mut session = PaintSession::new(grid);
    session.set_building(building.apply_to(defaults));
    Ok(session)
}

/// Painted grids are saved as projects; a raster input needs an explicit output
fn output_path<'a>(input: &'a Path, output: Option<&'a Path>) -> Result<&'a Path> {
    if let Some(output) = output {
        return Ok(output);
    }
    let bytes = std::fs::read(input)?;
    if raster::is_raster(&bytes) {
        return Err(palmpaint::core::Error::Config(format!(
            "{} is a raster; pass --output for the edited project",
            input.display()
        )));
    }
    Ok(input)
}
