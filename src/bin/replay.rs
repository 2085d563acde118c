//! Replay a recorded detection log through a stream pipeline.
//!
//! The log is a JSON array with one entry per frame:
//!
//! ```json
//! [{"width": 640, "height": 480, "detections": [{"bbox": [10, 20, 50, 80], "score": 0.9, "label": 0}]}]
//! ```
//!
//! One JSON frame report is written to stdout per frame.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{error, info};
use serde::Deserialize;

use occupancy_rs::{
    BoundaryStrategy, Detection, Error, Frame, FrameSource, PipelineConfig, Result, StreamPipeline,
};

#[derive(Parser, Debug)]
#[command(name = "occupancy-replay", about = "Replay a detection log and count line crossings")]
struct Args {
    /// Detection log (JSON array of frames)
    #[arg(value_name = "PATH")]
    log: PathBuf,

    /// Pipeline configuration (JSON)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override max_disappeared from the configuration
    #[arg(long)]
    max_disappeared: Option<u32>,

    /// Pin the counting line at this x instead of half the frame width
    #[arg(long)]
    boundary_x: Option<i32>,

    /// Only print the final totals
    #[arg(long)]
    summary: bool,
}

#[derive(Debug, Deserialize)]
struct RecordedFrame {
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    detections: Vec<Detection>,
}

impl Frame for RecordedFrame {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

struct RecordedSource {
    frames: std::vec::IntoIter<RecordedFrame>,
}

impl FrameSource for RecordedSource {
    type Frame = RecordedFrame;

    fn next_frame(&mut self) -> Result<Option<RecordedFrame>> {
        Ok(self.frames.next())
    }
}

fn load_config(args: &Args) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(max_disappeared) = args.max_disappeared {
        config.max_disappeared = max_disappeared;
    }
    if let Some(x) = args.boundary_x {
        config.boundary = BoundaryStrategy::Fixed(x);
    }
    Ok(config)
}

fn replay(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let frames: Vec<RecordedFrame> = serde_json::from_str(&fs::read_to_string(&args.log)?)?;
    info!("Replaying {} frames from {}", frames.len(), args.log.display());

    let mut pipeline = StreamPipeline::new(config)?;
    let mut source = RecordedSource {
        frames: frames.into_iter(),
    };
    let mut detector =
        |frame: &RecordedFrame| -> Result<Vec<Detection>> { Ok(frame.detections.clone()) };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_error: Option<Error> = None;

    pipeline.run(&mut source, &mut detector, |_, report| {
        if args.summary || write_error.is_some() {
            return;
        }
        let written = serde_json::to_writer(&mut out, report)
            .map_err(Error::from)
            .and_then(|_| writeln!(out).map_err(Error::from));
        if let Err(e) = written {
            write_error = Some(e);
        }
    })?;

    if let Some(e) = write_error {
        return Err(e);
    }

    let counter = pipeline.counter();
    writeln!(
        out,
        "{}",
        serde_json::json!({
            "total_in": counter.total_in(),
            "total_out": counter.total_out(),
            "occupancy": counter.occupancy(),
        })
    )?;
    out.flush()?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = replay(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
