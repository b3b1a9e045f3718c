use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use palette_index::{ColorMatch, Palette, Rgb, Target};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use palscan::models::{parse_origin, parse_rgb_triple, AppConfig};
use palscan::rendering;
use palscan::services::{
    verify_image_palette, ColorFinder, ColorLister, FindOptions, ListMode, ListReport,
    PaletteStore,
};

#[derive(Parser)]
#[command(name = "palscan")]
#[command(about = "Palette-aware image color finder and lister")]
struct Cli {
    /// Palette JSON file (overrides config and PALETTE_FILE)
    #[arg(long, global = true)]
    palette: Option<PathBuf>,

    /// YAML config file (overrides CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate every pixel of one palette color
    Find {
        /// Input image
        image: PathBuf,

        #[command(flatten)]
        target: TargetArgs,

        /// Canvas offset added to pixel coordinates (e.g. "-120,40")
        #[arg(long, value_parser = parse_origin, allow_hyphen_values = true)]
        origin: Option<(i64, i64)>,

        /// Per-channel tolerance; 0 is an exact match
        #[arg(long, default_value_t = 0)]
        tolerance: u8,

        /// Prefix for the output tag
        #[arg(long, default_value = "")]
        prefix: String,

        /// Output directory (defaults to find_output_dir from config)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// List every distinct color with its pixel count
    List {
        /// Input image
        image: PathBuf,

        #[arg(long, value_enum, default_value_t = Mode::Strict)]
        mode: Mode,

        /// Fall back to the nearest palette color in annotate mode
        #[arg(long)]
        nearest: bool,

        /// Prefix for the output tag
        #[arg(long, default_value = "")]
        prefix: String,

        /// Output directory (defaults to list_output_dir from config)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Rows to print after writing
        #[arg(long, default_value_t = 30)]
        top: usize,
    },
    /// Report image colors missing from the palette
    Verify {
        /// Input image
        image: PathBuf,
    },
    /// Resolve a target or look up a color in the palette
    Lookup {
        #[command(flatten)]
        target: TargetArgs,

        /// Fall back to the nearest palette color (only with --rgb/--hex)
        #[arg(long, conflicts_with = "target")]
        nearest: bool,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct TargetArgs {
    /// Palette name or "id:N"
    #[arg(long)]
    target: Option<String>,

    /// Exact color as "R,G,B"
    #[arg(long, value_parser = parse_rgb_triple)]
    rgb: Option<Rgb>,

    /// Exact color as "#RRGGBB"
    #[arg(long)]
    hex: Option<Rgb>,
}

impl TargetArgs {
    fn to_target(&self) -> anyhow::Result<Target> {
        if let Some(rgb) = self.rgb.or(self.hex) {
            return Ok(Target::Rgb(rgb));
        }
        match &self.target {
            Some(descriptor) => Ok(Target::parse(descriptor)?),
            None => anyhow::bail!("one of --target, --rgb or --hex is required"),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Counts only, no palette
    Raw,
    /// Fail on colors outside the palette
    Strict,
    /// Tag each color with its palette match
    Annotate,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palscan=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config_file = cli
        .config
        .clone()
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));
    let palette_override = cli
        .palette
        .clone()
        .or_else(|| std::env::var("PALETTE_FILE").ok().map(PathBuf::from));
    let config = AppConfig::load(config_file.as_deref()).with_palette_override(palette_override);

    let Some(command) = cli.command else {
        run_status_command(&config, config_file.as_deref());
        return Ok(());
    };

    let mut store = PaletteStore::new();

    match command {
        Commands::Find {
            image,
            target,
            origin,
            tolerance,
            prefix,
            out_dir,
        } => {
            let palette = load_palette(&mut store, &config)?;
            let target = target.to_target()?;
            let options = FindOptions {
                canvas_origin: origin.unwrap_or((0, 0)),
                tolerance,
                prefix,
            };
            let mut finder = ColorFinder::new(&config);
            if let Some(dir) = out_dir {
                finder = finder.with_output_dir(dir);
            }
            run_find_command(&finder, &palette, &image, &target, &options)
        }
        Commands::List {
            image,
            mode,
            nearest,
            prefix,
            out_dir,
            top,
        } => {
            let mut lister = ColorLister::new(&config);
            if let Some(dir) = out_dir {
                lister = lister.with_output_dir(dir);
            }
            let report = match mode {
                Mode::Raw => lister.list(&image, ListMode::Raw, &prefix)?,
                Mode::Strict => {
                    let palette = load_palette(&mut store, &config)?;
                    lister.list(&image, ListMode::Strict(&palette), &prefix)?
                }
                Mode::Annotate => {
                    let palette = load_palette(&mut store, &config)?;
                    let mode = ListMode::Annotate {
                        palette: &palette,
                        use_nearest: nearest,
                    };
                    lister.list(&image, mode, &prefix)?
                }
            };
            print_list_report(&report, matches!(mode, Mode::Raw), top);
            Ok(())
        }
        Commands::Verify { image } => {
            let palette = load_palette(&mut store, &config)?;
            let unknown = verify_image_palette(&image, &palette)?;
            if unknown.is_empty() {
                println!("[OK] all colors of {} are in the palette", image.display());
                return Ok(());
            }
            println!(
                "{} color(s) of {} are not in the palette:",
                unknown.len(),
                image.display()
            );
            for rgb in &unknown {
                println!("  rgb({:>3}, {:>3}, {:>3}) {}", rgb.r, rgb.g, rgb.b, rgb.to_hex());
            }
            std::process::exit(1);
        }
        Commands::Lookup { target, nearest } => {
            let palette = load_palette(&mut store, &config)?;
            run_lookup_command(&palette, &target, nearest)
        }
    }
}

fn load_palette(
    store: &mut PaletteStore,
    config: &AppConfig,
) -> anyhow::Result<std::sync::Arc<Palette>> {
    store
        .get_or_load(&config.palette)
        .with_context(|| format!("loading palette {}", config.palette.display()))
}

fn run_find_command(
    finder: &ColorFinder,
    palette: &Palette,
    image: &Path,
    target: &Target,
    options: &FindOptions,
) -> anyhow::Result<()> {
    let report = finder.find(palette, image, target, options)?;
    let entry = &report.entry;

    println!(
        "[TARGET] {} (id {}) rgb{} {}{} via {}",
        entry.name,
        entry.id,
        entry.rgb,
        entry.hex(),
        if entry.premium { " ★" } else { "" },
        report.provenance.as_str()
    );
    println!("[OK] {} matching pixel(s)", report.count);
    println!("CSV:     {}", report.csv_path.display());
    println!("MASK:    {}", report.mask_path.display());
    println!("PREVIEW: {}", report.preview_path.display());
    Ok(())
}

fn print_list_report(report: &ListReport, raw: bool, top: usize) {
    println!(
        "[OK] {} distinct color(s), {} px",
        report.colors.len(),
        report.total_pixels()
    );
    println!("CSV: {}", report.csv_path.display());
    if let Some(path) = &report.text_path {
        println!("TXT: {}", path.display());
    }
    if top == 0 || report.colors.is_empty() {
        return;
    }

    println!();
    let shown = &report.colors[..top.min(report.colors.len())];
    if raw {
        let width = shown
            .iter()
            .map(|c| c.count.to_string().len())
            .max()
            .unwrap_or(1);
        for c in shown {
            println!(
                "rgb({:>3}, {:>3}, {:>3}): {:>width$} px",
                c.rgb.r, c.rgb.g, c.rgb.b, c.count
            );
        }
    } else {
        let lines: Vec<_> = shown.iter().map(|c| c.report_line()).collect();
        print!("{}", rendering::render_text_report(&lines));
    }
    if shown.len() < report.colors.len() {
        println!("... {} more", report.colors.len() - shown.len());
    }
}

fn run_lookup_command(palette: &Palette, args: &TargetArgs, nearest: bool) -> anyhow::Result<()> {
    let target = args.to_target()?;

    if let (Target::Rgb(rgb), true) = (&target, nearest) {
        let found = palette.color_info(*rgb, true);
        match found {
            ColorMatch::Exact(entry) | ColorMatch::Nearest(entry) => {
                println!(
                    "{} -> {} (id {}) {} [{}]",
                    rgb.to_hex(),
                    entry.name,
                    entry.id,
                    entry.hex(),
                    found.kind()
                );
            }
            ColorMatch::NoMatch => println!("{} -> none", rgb.to_hex()),
        }
        return Ok(());
    }

    let resolution = palette.resolve(&target)?;
    let entry = resolution.entry;
    println!("name:     {}", entry.name);
    println!("id:       {}", entry.id);
    println!("rgb:      {}", entry.rgb);
    println!("hex:      {}", entry.hex());
    println!("premium:  {}", entry.premium);
    println!("match:    {}", resolution.provenance.as_str());
    Ok(())
}

/// Display status and configuration information
fn run_status_command(config: &AppConfig, config_file: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    println!("Palscan v{VERSION}");
    println!("Palette-aware image color finder and lister\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE  = {}",
        std::env::var("CONFIG_FILE").unwrap_or_else(|_| "(not set)".to_string())
    );
    println!(
        "  PALETTE_FILE = {}",
        std::env::var("PALETTE_FILE").unwrap_or_else(|_| "(not set)".to_string())
    );

    println!("\nConfiguration:");
    let config_source = match config_file {
        Some(path) if path.exists() => path.display().to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("  Config:   {config_source}");
    let palette_state = if config.palette.exists() {
        ""
    } else {
        " (not found)"
    };
    println!("  Palette:  {}{palette_state}", config.palette.display());
    println!("  Find out: {}", config.find_output_dir.display());
    println!("  List out: {}", config.list_output_dir.display());

    println!("\nCommands:");
    println!("  palscan find     Locate pixels of a palette color");
    println!("  palscan list     List image colors with counts");
    println!("  palscan verify   Report colors outside the palette");
    println!("  palscan lookup   Resolve a color against the palette");
    println!("\nRun 'palscan --help' for more details.");
}
