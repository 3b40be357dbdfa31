use std::{
    cell::RefCell,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use signflow::{Controller, PhaseRegistry, PlayState, SequenceDocument, SequenceEvent};

#[derive(Parser, Debug)]
#[command(name = "signflow", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a document up to a timestamp and write that frame as a PNG.
    Frame(FrameArgs),
    /// Play a document headlessly, printing events as JSON lines.
    Play(PlayArgs),
    /// Check options and phase types without playing.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input sequence document (JSON).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Timestamp to stop at, in ms from the start of playback.
    #[arg(long, default_value_t = 0.0)]
    at: f64,

    /// Simulated frame rate of the host loop.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input sequence document (JSON).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Give up after this many ms (looping documents never finish on their own).
    #[arg(long, default_value_t = 60_000.0)]
    limit: f64,

    /// Simulated frame rate of the host loop.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Print the display as ASCII when playback ends.
    #[arg(long)]
    ascii: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input sequence document (JSON).
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn read_document(path: &Path) -> anyhow::Result<SequenceDocument> {
    let f = File::open(path).with_context(|| format!("open document '{}'", path.display()))?;
    let r = BufReader::new(f);
    let doc: SequenceDocument =
        serde_json::from_reader(r).with_context(|| "parse sequence document JSON")?;
    Ok(doc)
}

fn frame_step(fps: f64) -> anyhow::Result<f64> {
    if !(fps.is_finite() && fps > 0.0) {
        anyhow::bail!("--fps must be a positive number, got {fps}");
    }
    Ok(1000.0 / fps)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path)?;
    let step = frame_step(args.fps)?;
    let mut controller = Controller::from_document(&doc)?;
    controller.play(0.0)?;

    let mut now = 0.0;
    while now < args.at {
        now = (now + step).min(args.at);
        controller.tick(now)?;
    }

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    controller
        .rasterize()
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path)?;
    let step = frame_step(args.fps)?;
    let mut controller = Controller::from_document(&doc)?;

    let pending: Rc<RefCell<Vec<SequenceEvent>>> = Rc::default();
    let sink = pending.clone();
    controller.subscribe(move |e| sink.borrow_mut().push(*e));

    let mut now = 0.0;
    controller.play(now)?;
    loop {
        for event in pending.borrow_mut().drain(..) {
            let mut line = serde_json::to_value(event)?;
            line["at"] = serde_json::json!(now);
            println!("{line}");
        }
        if controller.status().state == PlayState::Idle || now >= args.limit {
            break;
        }
        now += step;
        controller.tick(now)?;
    }

    if args.ascii {
        println!("{}", controller.ascii());
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let doc = read_document(&args.in_path)?;
    let resolved = doc
        .options()
        .resolve()
        .with_context(|| "resolve display options")?;
    PhaseRegistry::default()
        .check(&doc.sequence)
        .with_context(|| "check phase types")?;
    println!(
        "ok: {} steps, {:?} display",
        doc.sequence.len(),
        resolved.render.mode
    );
    Ok(())
}
