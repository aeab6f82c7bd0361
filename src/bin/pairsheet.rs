use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pairsheet", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge the pairs in a job file into one comparison sheet PNG.
    Merge(MergeArgs),
}

#[derive(Parser, Debug)]
struct MergeArgs {
    /// Input merge job JSON.
    #[arg(long)]
    job: PathBuf,

    /// TTF/OTF font for the label captions. Bars render uncaptioned
    /// without one.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output PNG path. Defaults to comparison_<YYYY-MM-DD>.png in the
    /// current directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Merge(args) => cmd_merge(args),
    }
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let job = pairsheet::MergeJob::from_path(&args.job)?;

    let mut compositor = match args.font {
        Some(path) => pairsheet::Compositor::with_font(pairsheet::LabelFont::from_file(path)?),
        None => pairsheet::Compositor::new(),
    };
    let result = compositor.merge(&job.pairs, &job.settings)?;

    let out = args.out.unwrap_or_else(|| {
        PathBuf::from(format!("comparison_{}.png", chrono::Local::now().format("%Y-%m-%d")))
    });
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, &result.png)
        .with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!(
        "wrote {} ({}x{}, {} pairs)",
        out.display(),
        result.width,
        result.height,
        job.pairs.iter().filter(|p| p.is_complete()).count()
    );
    Ok(())
}
