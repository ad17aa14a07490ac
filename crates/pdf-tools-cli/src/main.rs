use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use pdf_async_runtime::{PdfCommand, PdfUpdate, worker_task};
use pdf_unbooklet::{PaperSize, PosterOptions, Rotation, SampleBooklet, ScanOrder, UnbookletOptions};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

mod logger;

#[derive(Parser)]
#[command(name = "pdft", about = "PDF tools CLI", version)]
struct Cli {
    /// Show debug output, including the page assignment of every sheet
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split scanned booklet sheets back into single pages in reading order
    Unbooklet {
        /// Input PDF of scanned double-wide sheets
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file [default: <input>-<output size>.pdf]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Sheets were scanned starting from the center spread
        #[arg(long)]
        from_binder: bool,

        /// Print page and sheet numbers onto every output page
        #[arg(long)]
        debug: bool,

        /// Format of the scanned sheets [default: a4]
        #[arg(long, value_enum)]
        sheet_size: Option<PaperArg>,

        /// Format of the output pages [default: a4]
        #[arg(long, value_enum)]
        output_size: Option<OutputSizeArg>,

        /// JSON options file; flags given on the command line take precedence
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the effective options to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Show statistics only, don't generate PDF
        #[arg(long)]
        stats_only: bool,
    },

    /// Enlarge pages to a bigger format, tiled over sheets of the original format
    Poster {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file [default: <input>-poster.pdf]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Format of the input pages and printed tiles
        #[arg(long, default_value = "a4", value_enum)]
        source: PaperArg,

        /// Format of the enlarged page
        #[arg(long, default_value = "a3", value_enum)]
        target: PaperArg,
    },

    /// Generate a numbered sample booklet
    Sample {
        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of double-wide sheets
        #[arg(long, default_value = "2")]
        sheets: usize,

        /// Order the sheets as if scanned from the center spread
        #[arg(long)]
        from_binder: bool,

        /// Page rotations in degrees, cycled over the sheets (e.g. 0,90,180)
        #[arg(long, value_delimiter = ',')]
        rotate: Vec<i64>,
    },

    /// Show statistics about a scanned booklet
    Info {
        /// Input PDF file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputSizeArg {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    /// Keep the size of the half sheet
    Native,
}

impl From<PaperArg> for PaperSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A0 => Self::A0,
            PaperArg::A1 => Self::A1,
            PaperArg::A2 => Self::A2,
            PaperArg::A3 => Self::A3,
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
            PaperArg::Tabloid => Self::Tabloid,
        }
    }
}

impl From<OutputSizeArg> for Option<PaperSize> {
    fn from(arg: OutputSizeArg) -> Self {
        match arg {
            OutputSizeArg::A3 => Some(PaperSize::A3),
            OutputSizeArg::A4 => Some(PaperSize::A4),
            OutputSizeArg::A5 => Some(PaperSize::A5),
            OutputSizeArg::Letter => Some(PaperSize::Letter),
            OutputSizeArg::Legal => Some(PaperSize::Legal),
            OutputSizeArg::Native => None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::new(cli.verbose).init()?;

    match cli.command {
        Commands::Unbooklet {
            input,
            output,
            from_binder,
            debug,
            sheet_size,
            output_size,
            config,
            save_config,
            stats_only,
        } => {
            let mut options = match &config {
                Some(path) => UnbookletOptions::load(path).await?,
                None => UnbookletOptions::default(),
            };
            options.input_file = input.clone();
            if from_binder {
                options.scan_order = ScanOrder::CenterFirst;
            }
            if debug {
                options.debug = true;
            }
            if let Some(size) = sheet_size {
                options.sheet_size = size.into();
            }
            if let Some(size) = output_size {
                options.output_size = size.into();
            }
            options.validate()?;

            if let Some(path) = &save_config {
                options.save(path).await?;
                println!("Options → {}", path.display());
            }

            let document = pdf_unbooklet::load_pdf(&input).await?;
            let stats = pdf_unbooklet::calculate_statistics(&document)?;
            print_statistics(&stats);

            if stats_only {
                return Ok(());
            }

            let output = output.unwrap_or_else(|| {
                derived_output(&input, &output_suffix(options.output_size, options.debug))
            });
            run_command(PdfCommand::Unbooklet {
                options,
                output_path: output,
            })
            .await?;
        }

        Commands::Poster {
            input,
            output,
            source,
            target,
        } => {
            let options = PosterOptions {
                input_file: input.clone(),
                source_size: source.into(),
                target_size: target.into(),
            };
            options.validate()?;

            let output = output.unwrap_or_else(|| derived_output(&input, "-poster"));
            run_command(PdfCommand::Poster {
                options,
                output_path: output,
            })
            .await?;
        }

        Commands::Sample {
            output,
            sheets,
            from_binder,
            rotate,
        } => {
            let rotations = rotate
                .iter()
                .map(|&degrees| match Rotation::from_degrees(degrees) {
                    Some(rotation) => Ok(rotation),
                    None => bail!("Rotation must be a multiple of 90 degrees, got {}", degrees),
                })
                .collect::<Result<Vec<_>>>()?;

            run_command(PdfCommand::CreateSample {
                sample: SampleBooklet {
                    sheets,
                    scan_order: ScanOrder::from_binder(from_binder),
                    rotations,
                },
                output_path: output,
            })
            .await?;
        }

        Commands::Info { input } => {
            let document = pdf_unbooklet::load_pdf(&input).await?;
            let stats = pdf_unbooklet::calculate_statistics(&document)?;
            print_statistics(&stats);
        }
    }

    Ok(())
}

/// Hand one command to the worker and report its outcome
async fn run_command(command: PdfCommand) -> Result<()> {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();

    let worker = tokio::spawn(worker_task(command_rx, update_tx));
    command_tx.send(command)?;
    drop(command_tx);

    let mut operation = String::new();
    let mut failure = None;
    while let Some(update) = update_rx.recv().await {
        match update {
            PdfUpdate::Progress {
                operation: current_operation,
                current,
                total,
            } => {
                if current_operation != operation {
                    log::info!("{}", current_operation);
                    operation = current_operation;
                }
                log::trace!("{}/{}", current, total);
            }
            PdfUpdate::UnbookletComplete { path, page_count } => {
                println!("Reassembled {} pages → {}", page_count, path.display());
            }
            PdfUpdate::PosterComplete { path, page_count } => {
                println!("Poster of {} tiles → {}", page_count, path.display());
            }
            PdfUpdate::SampleComplete { path, page_count } => {
                println!("Sample booklet of {} sheets → {}", page_count, path.display());
            }
            PdfUpdate::ConfigLoaded { .. } | PdfUpdate::StatsCalculated { .. } => {}
            PdfUpdate::Error { message } => failure = Some(message),
        }
    }
    worker.await?;

    match failure {
        Some(message) => bail!(message),
        None => Ok(()),
    }
}

fn print_statistics(stats: &pdf_unbooklet::UnbookletStatistics) {
    println!("Booklet Statistics:");
    println!("  Sheets: {}", stats.sheets);
    println!("  Output pages: {}", stats.output_pages);
    for rotation in Rotation::ALL {
        let count = stats.sheets_with_rotation(rotation);
        if count > 0 {
            println!("  Rotated {:>3}°: {}", rotation.degrees(), count);
        }
    }
    if stats.missing_rotation > 0 {
        println!(
            "  Portrait sheets without rotation: {}",
            stats.missing_rotation
        );
    }
}

/// `scan.pdf` + `-A4` -> `scan-A4.pdf`, next to the input
fn derived_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{}{}.pdf", stem, suffix))
}

/// `-A4`, `-Letter`, `-native`, with `_debug` appended for annotated runs
fn output_suffix(output_size: Option<PaperSize>, debug: bool) -> String {
    let size = match output_size {
        Some(PaperSize::Custom { .. }) => "custom".to_string(),
        Some(size) => format!("{:?}", size),
        None => "native".to_string(),
    };
    if debug {
        format!("-{}_debug", size)
    } else {
        format!("-{}", size)
    }
}
