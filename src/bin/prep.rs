use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use ecgtrain::{build_dataset, io::write_dataset, PipelineConfig};

#[derive(Parser)]
#[command(name = "prep", about = "Build the windowed dataset and write it to safetensors")]
struct Args {
    /// Directory with REFERENCE.csv and per-record safetensors payloads
    #[arg(long)]
    records: PathBuf,

    /// Bundled safetensors file (signal matrix + parallel labels)
    #[arg(long)]
    bundle: PathBuf,

    /// Documented sampling rate of the bundle rows (Hz)
    #[arg(long, default_value_t = 128.0)]
    bundle_fs: f32,

    /// Output safetensors path
    #[arg(long)]
    output: PathBuf,

    /// Target sampling rate (Hz)
    #[arg(long, default_value_t = 300.0)]
    target_fs: f32,

    /// Window duration (s)
    #[arg(long, default_value_t = 15.0)]
    window_dur: f32,

    /// Overlap fraction between consecutive windows
    #[arg(long, default_value_t = 0.5)]
    overlap: f32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let cfg = PipelineConfig {
        target_fs: args.target_fs,
        window_dur: args.window_dur,
        overlap: args.overlap,
    };

    let ds = build_dataset(&args.records, &args.bundle, args.bundle_fs, &cfg)?;
    println!("{}", ds.summary());

    write_dataset(&ds, &args.output)?;
    println!("written → {}", args.output.display());

    Ok(())
}
