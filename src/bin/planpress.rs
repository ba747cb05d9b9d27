use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use planpress::generate::{GenerateConfig, generate_plan};
use planpress::notify::{DeliveryOutcome, NotifyConfig, notify};
use planpress::quotes::QuoteBook;
use planpress::render::{RenderOptions, default_output_name, render_plan_to_file};
use planpress::{Intake, Plan};

#[derive(Parser, Debug)]
#[command(name = "planpress", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a training plan JSON into the branded PDF.
    Render(RenderArgs),
    /// Generate a training plan from an athlete intake via the model API.
    Generate(GenerateArgs),
    /// Email the athlete a link to their generated plan.
    Notify(NotifyArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input plan JSON.
    #[arg(long)]
    plan: PathBuf,

    /// Output PDF path (default: output/<plan-name>-<date>.pdf).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Quote book JSON (default: quotes.json next to the plan, if present).
    #[arg(long)]
    quotes: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Athlete intake JSON.
    #[arg(long)]
    intake: PathBuf,

    /// Directory the generated plan is written to.
    #[arg(long, default_value = "plans")]
    plans_dir: PathBuf,

    /// Model used for generation.
    #[arg(long, default_value = planpress::generate::DEFAULT_MODEL)]
    model: String,

    /// Prompt template override (built-in template otherwise).
    #[arg(long)]
    template: Option<PathBuf>,

    /// Directory with training guide markdown folded into the system context.
    #[arg(long)]
    guides: Option<PathBuf>,

    /// Example plan JSON included in the system context.
    #[arg(long)]
    example: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct NotifyArgs {
    /// Athlete intake JSON.
    #[arg(long)]
    intake: PathBuf,

    /// Directory searched for generated plans.
    #[arg(long, default_value = "plans")]
    plans_dir: PathBuf,

    /// Directory searched for rendered PDFs.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Build the email but do not send it.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Generate(args) => cmd_generate(args),
        Command::Notify(args) => cmd_notify(args),
    }
}

fn read_plan_json(path: &Path) -> anyhow::Result<Plan> {
    planpress::plan::load_plan(path).with_context(|| format!("load plan '{}'", path.display()))
}

fn read_intake_json(path: &Path) -> anyhow::Result<Intake> {
    planpress::intake::load_intake(path)
        .with_context(|| format!("load intake '{}'", path.display()))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let plan = read_plan_json(&args.plan)?;

    let quotes_path = args.quotes.unwrap_or_else(|| {
        args.plan
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("quotes.json")
    });
    let quotes = QuoteBook::load(&quotes_path)?;

    let out_path = match args.out {
        Some(path) => path,
        None => {
            let today = chrono::Local::now().date_naive();
            Path::new("output").join(default_output_name(&plan, today))
        }
    };

    let options = RenderOptions::default();
    render_plan_to_file(&plan, &quotes, &options, &out_path)?;

    eprintln!("wrote {}", out_path.display());
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let intake = read_intake_json(&args.intake)?;

    let cfg = GenerateConfig {
        model: args.model,
        plans_dir: args.plans_dir,
        template_path: args.template,
        guides_dir: args.guides,
        example_plan_path: args.example,
    };

    let generated = generate_plan(&intake, &cfg)?;
    if !generated.valid {
        eprintln!("plan failed validation, saved anyway for review");
    }
    eprintln!("wrote {}", generated.path.display());
    Ok(())
}

fn cmd_notify(args: NotifyArgs) -> anyhow::Result<()> {
    let intake = read_intake_json(&args.intake)?;

    let cfg = NotifyConfig {
        plans_dir: args.plans_dir,
        output_dir: args.output_dir,
        dry_run: args.dry_run,
    };

    match notify(&intake, &cfg)? {
        DeliveryOutcome::Sent => eprintln!("notification sent to {}", intake.email),
        DeliveryOutcome::Skipped(reason) => eprintln!("notification skipped: {reason}"),
    }
    Ok(())
}
