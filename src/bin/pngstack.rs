use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "pngstack", version)]
struct Cli {
    /// Log canvas and encoder activity to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite the raw tiles listed in a JSON manifest into a PNG.
    Stack(StackArgs),
    /// Encode a single raw pixel buffer as a PNG.
    Encode(EncodeArgs),
}

#[derive(Parser, Debug)]
struct StackArgs {
    /// Input manifest JSON.
    #[arg(long)]
    manifest: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Override the manifest's compression level.
    #[arg(long, value_enum)]
    compression: Option<CompressionChoice>,
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Raw packed pixel file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Width in pixels.
    #[arg(long)]
    width: u32,

    /// Height in pixels.
    #[arg(long)]
    height: u32,

    /// Pixel layout of the input: rgb, bgr, rgba or bgra.
    #[arg(long, default_value = "rgb")]
    format: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Compression level.
    #[arg(long, value_enum, default_value_t = CompressionChoice::Default)]
    compression: CompressionChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CompressionChoice {
    Default,
    Fast,
    Best,
}

impl From<CompressionChoice> for pngstack::Compression {
    fn from(c: CompressionChoice) -> Self {
        match c {
            CompressionChoice::Default => Self::Default,
            CompressionChoice::Fast => Self::Fast,
            CompressionChoice::Best => Self::Best,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Stack(args) => cmd_stack(args),
        Command::Encode(args) => cmd_encode(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_stack(args: StackArgs) -> anyhow::Result<()> {
    let mut manifest = pngstack::StackManifest::from_path(&args.manifest)?;
    if let Some(c) = args.compression {
        manifest.compression = c.into();
    }

    let root = args.manifest.parent().unwrap_or_else(|| Path::new("."));
    let png = pngstack::compose_manifest(&manifest, root)?;

    write_png(&args.out, png.bytes())
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let format: pngstack::PixelFormat = args.format.parse()?;
    let pixels = std::fs::read(&args.in_path)
        .with_context(|| format!("read pixels '{}'", args.in_path.display()))?;

    let codec = pngstack::PngCodec::new(
        pngstack::EncodeConfig::default().with_compression(args.compression.into()),
    );
    let png = pngstack::FlatImage::new(&pixels, args.width, args.height, format)
        .encode_with(&codec)?;

    write_png(&args.out, png.bytes())
}

fn write_png(out: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, bytes).with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}
