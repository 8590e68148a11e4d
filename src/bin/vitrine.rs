use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

use vitrine::carousel::script::{Script, run_script};

#[derive(Parser, Debug)]
#[command(name = "vitrine", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay an event script against one carousel and print the trace as JSON lines.
    Simulate(SimulateArgs),
    /// Print the duplication and timing plan for a marquee strip.
    Marquee(MarqueeArgs),
    /// Validate a lead and print the status message a visitor would see.
    Lead(LeadArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Site config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Event script JSON.
    #[arg(long)]
    script: PathBuf,
}

#[derive(Parser, Debug)]
struct MarqueeArgs {
    /// Container width in pixels.
    #[arg(long)]
    container: f64,

    /// Width of one item in pixels; repeat for each item.
    #[arg(long = "item", required = true)]
    items: Vec<f64>,

    /// Scroll speed in pixels per second.
    #[arg(long)]
    speed: Option<f64>,
}

#[derive(Parser, Debug)]
struct LeadArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    email: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Marquee(args) => cmd_marquee(args),
        Command::Lead(args) => cmd_lead(args),
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let site = match &args.config {
        Some(path) => vitrine::SiteConfig::from_path(path)
            .with_context(|| format!("load site config '{}'", path.display()))?,
        None => vitrine::SiteConfig::default(),
    };
    let raw = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read script '{}'", args.script.display()))?;
    let script: Script = serde_json::from_str(&raw)
        .with_context(|| format!("parse script '{}'", args.script.display()))?;

    let lines = run_script(&site.carousel, &script)?;
    let mut out = std::io::stdout().lock();
    for line in &lines {
        serde_json::to_writer(&mut out, line)?;
        writeln!(out)?;
    }
    Ok(())
}

fn cmd_marquee(args: MarqueeArgs) -> anyhow::Result<()> {
    let mut config = vitrine::MarqueeConfig::default();
    if let Some(speed) = args.speed {
        config.speed_px_s = speed;
    }
    let container = vitrine::Width::new(args.container)?;
    let mut marquee = vitrine::Marquee::new(config, args.items);
    let plan = marquee
        .mount(container, 0)
        .context("marquee items have no measurable width")?;
    println!("{}", serde_json::to_string(plan)?);
    Ok(())
}

fn cmd_lead(args: LeadArgs) -> anyhow::Result<()> {
    let mut form = vitrine::LeadForm::new()
        .with("name", &args.name)
        .with("phone", &args.phone);
    if let Some(email) = &args.email {
        form.set("email", email);
    }
    match form.validate() {
        Ok(lead) => {
            println!("{}", serde_json::to_string(&lead)?);
            Ok(())
        }
        Err(err) => anyhow::bail!("{err}"),
    }
}
