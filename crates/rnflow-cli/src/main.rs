//! rnflow command-line compiler.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rnflow_assets::HostedFontCatalog;
use rnflow_codegen::{CompileOptions, Compiler};
use rnflow_io::Snapshot;
use rnflow_ir::ImageFillMode;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rnflow")]
#[command(author, version, about = "Compile design snapshots into React Native modules", long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a selection into a module, its media and fonts.css
    Compile {
        #[command(flatten)]
        input: InputArgs,

        /// Directory to write the module and assets into
        #[arg(long)]
        out_dir: PathBuf,
    },

    /// Print the uniquified IR as JSON
    Ir {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Scene snapshot (JSON)
    #[arg(long = "in")]
    input: PathBuf,

    /// Design-tool id of the node to compile (defaults to the first root)
    #[arg(long)]
    root: Option<String>,

    /// Options document (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// How image fills reach the markup
    #[arg(long, value_enum)]
    image_fills: Option<ImageFills>,

    /// Name of the exported component
    #[arg(long)]
    component_name: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ImageFills {
    /// Background layers only
    Css,
    /// Also pass the topmost image to ImageBackground
    ImageBackground,
}

impl From<ImageFills> for ImageFillMode {
    fn from(value: ImageFills) -> Self {
        match value {
            ImageFills::Css => ImageFillMode::Css,
            ImageFills::ImageBackground => ImageFillMode::ImageBackground,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Compile { input, out_dir } => compile(&input, &out_dir),
        Commands::Ir { input } => dump_ir(&input),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Options from `--config`, with flags taking precedence.
fn resolve_options(args: &InputArgs) -> Result<CompileOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            CompileOptions::from_json(&json).with_context(|| format!("Invalid config: {}", path.display()))?
        }
        None => CompileOptions::default(),
    };
    if let Some(mode) = args.image_fills {
        options = options.with_image_fills(mode.into());
    }
    if let Some(name) = &args.component_name {
        options = options.with_component_name(name.clone());
    }
    Ok(options)
}

fn build_compiler(options: CompileOptions) -> Result<Compiler<'static>> {
    let catalog = match &options.hosted_fonts {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read font catalog: {}", path.display()))?;
            Some(HostedFontCatalog::from_json(&json).context("Invalid font catalog")?)
        }
        None => None,
    };
    let compiler = Compiler::new(options).context("Failed to set up the compiler")?;
    Ok(match catalog {
        Some(catalog) => compiler.with_catalog(catalog),
        None => compiler,
    })
}

fn load(args: &InputArgs) -> Result<(Snapshot, Compiler<'static>)> {
    let snapshot = Snapshot::load(&args.input)
        .with_context(|| format!("Failed to load snapshot: {}", args.input.display()))?;
    let compiler = build_compiler(resolve_options(args)?)?;
    Ok((snapshot, compiler))
}

fn compile(args: &InputArgs, out_dir: &Path) -> Result<()> {
    let (snapshot, compiler) = load(args)?;
    let root = snapshot.root(args.root.as_deref())?;

    let module = match pollster::block_on(compiler.compile(snapshot.tree(), root, &snapshot)) {
        Ok(module) => module,
        Err(err) => {
            error!(%err, "compilation failed");
            bail!(err.user_message());
        }
    };

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    if module.code.is_empty() {
        warn!(name = %module.name, "selection produced no markup, module not written");
    } else {
        let path = out_dir.join(module.file_name());
        fs::write(&path, &module.code).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "module written");
    }

    for record in &module.assets.media {
        let path = out_dir.join(&record.filename);
        fs::write(&path, &record.bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if !module.assets.fonts.is_empty() {
        let path = out_dir.join("fonts.css");
        fs::write(&path, module.fonts_css()).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    println!(
        "{}: {} media file(s), {} font(s)",
        module.file_name(),
        module.assets.media.len(),
        module.assets.fonts.len()
    );
    Ok(())
}

fn dump_ir(args: &InputArgs) -> Result<()> {
    let (snapshot, compiler) = load(args)?;
    let root = snapshot.root(args.root.as_deref())?;

    let ir = match pollster::block_on(compiler.lower(snapshot.tree(), root, &snapshot)) {
        Ok(ir) => ir,
        Err(err) => {
            error!(%err, "lowering failed");
            bail!(err.user_message());
        }
    };
    println!("{}", serde_json::to_string_pretty(&ir)?);
    Ok(())
}
