use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
struct Args {
    path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let recording = yoga_runner::load_recording_json_from_path(args.path)?;
    println!("title={}", recording.meta.title);
    println!("size={}x{}", recording.meta.width, recording.meta.height);
    println!("frames={}", recording.frames.len());
    println!("duration_ms={}", recording.duration_ms());
    Ok(())
}
