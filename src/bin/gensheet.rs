//! CLI for GenSheet - batch image generation and contact sheets.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use gensheet::config::{self, Overrides, Preset, RunConfig};
use gensheet::{GenSheetError, ImageProvider, OpenAiImageProvider};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gensheet")]
#[command(about = "Generate one image per prompt and render a contact-sheet gallery")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate images for every prompt, then write generated.json and index.html
    Generate(GenerateArgs),

    /// Re-render index.html from an existing generated.json
    Gallery(GalleryArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Campaign preset supplying file names, slug length and captions
    #[arg(short, long, value_enum, default_value = "concepts")]
    preset: PresetArg,

    /// Prompt file (defaults to the preset's)
    #[arg(long)]
    prompts: Option<PathBuf>,

    /// Root for timestamped output directories
    #[arg(long)]
    out_root: Option<PathBuf>,

    /// Resume into this directory, skipping images already there
    /// (falls back to LATEST_OUT_DIR)
    #[arg(long)]
    resume_dir: Option<PathBuf>,

    /// Model identifier
    #[arg(long)]
    model: Option<String>,

    /// Image size, e.g. 1024x1024
    #[arg(long)]
    size: Option<String>,

    /// Quality tier (standard, hd)
    #[arg(long)]
    quality: Option<String>,

    /// Style tag (vivid, natural)
    #[arg(long)]
    style: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Gallery page title
    #[arg(long)]
    title: Option<String>,
}

#[derive(Args)]
struct GalleryArgs {
    /// Output directory containing generated.json
    dir: PathBuf,

    /// Preset controlling captions and headings
    #[arg(short, long, value_enum, default_value = "concepts")]
    preset: PresetArg,

    /// Gallery page title
    #[arg(long)]
    title: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    Concepts,
    Lockups,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Concepts => Preset::Concepts,
            PresetArg::Lockups => Preset::Lockups,
        }
    }
}

impl From<GenerateArgs> for Overrides {
    fn from(args: GenerateArgs) -> Self {
        Overrides {
            prompts: args.prompts,
            out_root: args.out_root,
            resume_dir: args.resume_dir,
            model: args.model,
            size: args.size,
            quality: args.quality,
            style: args.style,
            timeout_secs: args.timeout_secs,
            title: args.title,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    // clap exits with 2 on usage errors, which is reserved for a missing credential
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.exit_code() == 0 => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(gensheet::EXIT_FAILURE);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            return ExitCode::from(gensheet::EXIT_FAILURE);
        }
    };

    let result = runtime.block_on(async {
        match cli.command {
            Commands::Generate(args) => generate(args, cli.json).await,
            Commands::Gallery(args) => gallery(args, cli.json),
        }
    });

    match result {
        Ok(()) => ExitCode::from(gensheet::EXIT_SUCCESS),
        Err(err) => match err.downcast_ref::<GenSheetError>() {
            Some(e @ GenSheetError::MissingCredential(_)) => {
                eprintln!("{e}");
                ExitCode::from(e.exit_code())
            }
            Some(e) => {
                eprintln!("Error: {err:?}");
                ExitCode::from(e.exit_code())
            }
            None => {
                eprintln!("Error: {err:?}");
                ExitCode::from(gensheet::EXIT_FAILURE)
            }
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn generate(args: GenerateArgs, json_output: bool) -> anyhow::Result<()> {
    let preset: Preset = args.preset.into();
    let config = RunConfig::resolve(preset, args.into());

    // Credential is checked before touching the prompt file or disk
    let provider = OpenAiImageProvider::builder()
        .timeout(config.timeout)
        .build()?;

    let prompts = gensheet::load_prompts(&config.prompts_path)?;
    tracing::info!(
        provider = provider.name(),
        preset = %config.preset,
        prompts = prompts.len(),
        out_dir = %config.out_dir.display(),
        resume = config.skip_existing,
        "starting batch"
    );

    let report = gensheet::run_batch(&provider, &prompts, &config)
        .await
        .with_context(|| format!("batch into {} aborted", config.out_dir.display()))?;

    if json_output {
        let result = serde_json::json!({
            "success": true,
            "output": report.gallery.display().to_string(),
            "generated": report.generated,
            "skipped": report.skipped,
            "items": report.items,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("\nWrote: {}", report.gallery.display());
    }

    Ok(())
}

fn gallery(args: GalleryArgs, json_output: bool) -> anyhow::Result<()> {
    let items = gensheet::read_manifest(&args.dir)
        .with_context(|| format!("reading manifest in {}", args.dir.display()))?;

    let options =
        config::gallery_options(args.preset.into(), args.title.as_deref(), &args.dir, items.len());
    let path = gensheet::write_gallery(&args.dir, &items, &options)?;

    if json_output {
        let result = serde_json::json!({
            "success": true,
            "output": path.display().to_string(),
            "figures": items.len(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Wrote: {}", path.display());
    }

    Ok(())
}
