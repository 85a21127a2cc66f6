// ----------------------------------- CLI -----------------------------------
use clap::Parser;

use sinomat::utils::{parse_list, AngleList};
use sinomat::Rounding;

/// Build the sparse system matrix of a parallel-beam projection
#[derive(Parser, Debug, Clone)]
#[command(name = "sysmat")]
pub struct Cli {

    /// TOML file describing the matrix. Options given on the command line
    /// override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of pixels along each side of the square image
    #[arg(short = 'm', long)]
    pub pixels: Option<usize>,

    /// Projection angles in degrees, comma-separated
    #[arg(short, long, value_parser = parse_list::<f64>, allow_hyphen_values = true)]
    pub angles: Option<AngleList>,

    /// Number of sensors per projection [default: ceil(√2 × pixels)]
    #[arg(short = 'n', long)]
    pub sensors: Option<usize>,

    /// How projections falling exactly between two sensors are assigned
    #[arg(value_enum, short, long)]
    pub rounding: Option<Rounding>,

    /// Write the non-zero entries, one `row col weight` per line
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[cfg(not(feature = "serial"))]
    /// Maximum number of rayon threads
    #[arg(short = 'j', long, default_value = "4")]
    pub num_threads: usize,
}

// --------------------------------------------------------------------------------

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use sinomat::config::{Config, read_config_file};
use sinomat::utils::{group_digits, timing::Progress};
use sinomat::CsrMatrix;

fn main() -> Result<(), Box<dyn Error>> {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
                         .unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Cli::parse();
    let config = merge_config(&args)?;

    #[cfg(not(feature = "serial"))]
    {
        // Set the maximum number of threads used by rayon for parallel iteration
        rayon::ThreadPoolBuilder::new().num_threads(args.num_threads).build_global()?;
    }

    let mut progress = Progress::new();
    progress.start("Building system matrix");
    let matrix = config.build()?;
    progress.done();

    let (rows, cols) = matrix.shape();
    println!("System matrix: {} x {} ({} angles x {} sensors, {} x {} pixels)",
             group_digits(rows), group_digits(cols),
             matrix.n_angles(), matrix.n_sensors(),
             matrix.grid().n, matrix.grid().n);
    println!("Non-zero entries: {}", group_digits(matrix.nnz()));

    if let Some(path) = &args.out {
        progress.start(&format!("Writing entries to {}", path.display()));
        write_entries(path, matrix.csr())?;
        progress.done();
    }
    Ok(())
}

/// Combine config file (if any) with command-line options; the latter win.
fn merge_config(args: &Cli) -> Result<Config, Box<dyn Error>> {
    let mut config = match (&args.config, args.pixels) {
        (Some(path), _) => read_config_file(path)?,
        (None, Some(pixels)) => Config { pixels, sensors: None, angles: vec![], rounding: Rounding::default() },
        (None, None) => return Err("either --pixels or --config must be given".into()),
    };
    if let Some(pixels)   =  args.pixels        { config.pixels   = pixels         }
    if let Some(sensors)  =  args.sensors       { config.sensors  = Some(sensors)  }
    if let Some(angles)   = &args.angles        { config.angles   = angles.clone() }
    if let Some(rounding) =  args.rounding      { config.rounding = rounding       }
    Ok(config)
}

fn write_entries(path: &Path, matrix: &CsrMatrix) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (row, col, weight) in matrix.iter() {
        writeln!(out, "{row} {col} {weight}")?;
    }
    out.flush()
}
