//! looper CLI: runs a scripted session against the wall clock.
//!
//! Usage:
//!   cargo run --bin lp-cli -- --script "record start:1 run:2 record run:4"
//!   cargo run --bin lp-cli -- --bpm 120 --assist 8 --async --trace

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use lp_master::{parse_script, Assist, Controller, DiagnosticLogger, SequencerConfig, SystemClock};

#[derive(Parser, Debug)]
#[command(name = "lp-cli", about = "Live-looping arpeggiator sequencer")]
struct Args {
    /// Tempo in beats per minute
    #[arg(long, default_value_t = 60)]
    bpm: u16,

    /// Quantization grid for starts and stops: no, 12, 8, 6, 4 or 3
    #[arg(long, default_value = "no")]
    assist: Assist,

    /// Number of layers available to play on
    #[arg(long, default_value_t = 4)]
    layers: usize,

    /// Actions to run, e.g. "record start:1 run:2 record run:4"
    #[arg(long, default_value = "record start:1 run:1 start:3 run:1 stop:0 record run:4")]
    script: String,

    /// Poll with async clicks instead of blocking on each subdivision
    #[arg(long = "async")]
    polling: bool,

    /// Print every engine trace line
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.trace {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    DiagnosticLogger::init(level).context("installing logger")?;

    let actions = parse_script(&args.script).context("parsing script")?;
    let config = SequencerConfig {
        bpm: args.bpm,
        assist: args.assist,
    };

    let mut ctrl = Controller::new(args.layers, SystemClock::new(), config);
    if args.polling {
        ctrl = ctrl.polling();
    }

    println!("Tempo:   {} BPM", ctrl.sequencer().bpm());
    println!("Assist:  {:?}", ctrl.sequencer().assist());
    println!("Layers:  {}", args.layers);
    println!("Actions: {}", actions.len());
    println!();

    ctrl.run_script(&actions).context("running script")?;

    for mark in ctrl.marks() {
        println!("{}  bar {}", mark.time, mark.bar);
    }
    println!();

    let seq = ctrl.sequencer();
    println!("State:   {} (was {})", seq.state(), seq.previous_state());
    println!("Time:    {}", seq.now());
    if ctrl.idle_revokes() > 0 {
        println!("Revokes: {} had nothing to undo", ctrl.idle_revokes());
    }
    if let Some(bars) = seq.loop_bars() {
        println!("Loop:    {} bars, {} events", bars, seq.log().len());
    }
    for layer in seq.layers() {
        let played: Vec<String> = layer.played().iter().map(|d| d.to_string()).collect();
        println!("Layer {}: [{}]", layer.id(), played.join(" "));
    }

    Ok(())
}
