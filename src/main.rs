use clap::{Args, Parser, Subcommand};
use image::ImageReader;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use laserspot::debug::DebugSink;
use laserspot::models::{Detection, DetectionMethod, LaserColor};
use laserspot::{DetectorConfig, LaserDetector, overlay, spell, tracker};

#[derive(Parser)]
#[command(name = "laserspot")]
#[command(about = "Track a laser pointer dot in a webcam feed")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Track the laser live from a camera
    Track {
        /// Camera index
        #[arg(long, default_value_t = 0)]
        camera: u32,

        #[command(flatten)]
        detector: DetectorArgs,
    },

    /// Run a single detection on an image file
    Detect {
        /// Path to input image file
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,

        #[command(flatten)]
        detector: DetectorArgs,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Save a copy of the image with the detection drawn on it
        #[arg(long, value_name = "FILE")]
        annotate: Option<PathBuf>,

        /// Save intermediate images to directory (must be empty)
        #[arg(long, value_name = "DIR")]
        debug_out: Option<PathBuf>,
    },

    /// Print text letter by letter, cycling through the alphabet
    Spell {
        #[arg(value_name = "TEXT")]
        text: String,

        /// Pause between steps in milliseconds
        #[arg(long, default_value_t = spell::DEFAULT_DELAY.as_millis() as u64)]
        delay_ms: u64,
    },
}

#[derive(Args)]
struct DetectorArgs {
    /// Detection method
    #[arg(long, value_enum, default_value_t = DetectionMethod::Brightness)]
    method: DetectionMethod,

    /// Laser color for the hsv method
    #[arg(long, value_enum, default_value_t = LaserColor::Red)]
    color: LaserColor,

    /// Brightness threshold
    #[arg(long, default_value_t = 200)]
    threshold: u8,

    /// Minimum detection area
    #[arg(long, default_value_t = 10.0)]
    min_area: f64,

    /// Maximum detection area
    #[arg(long, default_value_t = 500.0)]
    max_area: f64,
}

impl DetectorArgs {
    fn config(&self) -> anyhow::Result<DetectorConfig> {
        let config = DetectorConfig {
            min_area: self.min_area,
            max_area: self.max_area,
            brightness_threshold: self.threshold,
        };
        config.validate()?;
        Ok(config)
    }
}

#[derive(Serialize)]
struct DetectReport<'a> {
    image: &'a std::path::Path,
    method: DetectionMethod,
    color: Option<LaserColor>,
    config: &'a DetectorConfig,
    detection: Option<Detection>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Command::Track { camera, detector } => run_track(camera, &detector),
        Command::Detect {
            image_path,
            detector,
            json,
            annotate,
            debug_out,
        } => run_detect(image_path, &detector, json, annotate, debug_out),
        Command::Spell { text, delay_ms } => {
            let mut stdout = std::io::stdout().lock();
            spell::spell_out(&text, &mut stdout, std::time::Duration::from_millis(delay_ms))
        }
    }
}

#[cfg(feature = "camera")]
fn run_track(camera: u32, args: &DetectorArgs) -> anyhow::Result<()> {
    use laserspot::capture::CameraSource;
    use laserspot::display::PreviewWindow;

    let detector = LaserDetector::new(args.config()?);
    let mut source = CameraSource::open(camera)?;
    let (width, height) = source.resolution();
    let mut window = PreviewWindow::open(width, height)?;

    let mut session = tracker::TrackingSession::new(detector, args.method, args.color);
    session.run(&mut source, &mut window)
}

#[cfg(not(feature = "camera"))]
fn run_track(_camera: u32, _args: &DetectorArgs) -> anyhow::Result<()> {
    anyhow::bail!("live tracking needs the `camera` feature")
}

fn run_detect(
    image_path: PathBuf,
    args: &DetectorArgs,
    json: bool,
    annotate: Option<PathBuf>,
    debug_out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = args.config()?;

    info!("Loading image: {:?}", image_path);
    let img = ImageReader::open(&image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?
        .to_rgb8();
    info!("Image loaded: {}x{}", img.width(), img.height());

    let mut detector = LaserDetector::new(config.clone());
    if let Some(dir) = debug_out {
        detector = detector.with_debug(DebugSink::new(dir)?);
    }

    let detection = detector.locate(&img, args.method, args.color);

    if let Some(out) = annotate {
        let mut annotated = img.clone();
        if let Some(d) = &detection {
            overlay::draw_marker(&mut annotated, d.position);
        }
        tracker::save_frame(&annotated, &out)?;
        info!("Annotated image saved to {}", out.display());
    }

    if json {
        let report = DetectReport {
            image: &image_path,
            method: args.method,
            color: (args.method == DetectionMethod::Hsv).then_some(args.color),
            config: &config,
            detection,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", overlay::status_line(args.method, config.brightness_threshold, args.color));
    match detection {
        Some(d) => println!(
            "Laser: ({}, {}) - area: {:.1}, brightness: {:.1}",
            d.position.x, d.position.y, d.area, d.brightness
        ),
        None => println!("No laser detected."),
    }

    Ok(())
}
