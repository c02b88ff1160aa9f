//! pixel-steg - hide data in the low-order bits of PNG images.
//!
//! Thin host around the library engine: loads and saves PNG files and
//! maps command-line flags onto engine options.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use pixel_steg::config::HEADER_SIZE;
use pixel_steg::stego::{carrier, Header};
use pixel_steg::{Channel, Encryption, EngineOptions, Method, PixelBuffer, SteganographyEngine};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "pixel-steg")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Bit-plane image steganography",
    long_about = "Hide and extract data in the low-order bits of PNG images, and check images for hidden data."
)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a message or file in an image
    Encode {
        /// Cover image
        cover: PathBuf,

        /// Output image (PNG)
        output: PathBuf,

        /// Text to hide
        #[arg(long, conflicts_with = "file")]
        message: Option<String>,

        /// File to hide, stored with its name
        #[arg(long, conflicts_with = "message")]
        file: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Extract hidden data from an image
    Decode {
        /// Image carrying hidden data
        image: PathBuf,

        /// Write the data to this file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Data was hidden with --file; restore the stored filename
        #[arg(long)]
        as_file: bool,

        /// Print the data as hex
        #[arg(long, conflicts_with = "as_file")]
        hex: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Show how much data an image can hold
    Capacity {
        /// Cover image
        image: PathBuf,

        /// Print JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Check an image for hidden data
    Detect {
        /// Image to analyze
        image: PathBuf,

        /// Print JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Dump the payload header of an image
    Inspect {
        /// Image to inspect
        image: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,
    },
}

/// Engine options shared by every subcommand. Flags override `--config`.
#[derive(Args)]
struct EngineArgs {
    /// JSON options file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Channels in iteration order (e.g. rgb, bgra)
    #[arg(long)]
    channels: Option<String>,

    /// Low-order bits per channel (1-7)
    #[arg(long)]
    bits: Option<u8>,

    /// Method tag written into the header
    #[arg(long)]
    method: Option<Method>,

    /// Scatter bits over pseudo-random pixels
    #[arg(long)]
    spread: bool,

    /// Seed for --spread
    #[arg(long)]
    seed: Option<u32>,

    /// XOR the payload with a password
    #[arg(long)]
    xor: bool,

    /// Password for --xor (prompted when omitted)
    #[arg(long)]
    password: Option<String>,
}

impl EngineArgs {
    fn options(&self) -> anyhow::Result<EngineOptions> {
        let mut options = match &self.config {
            Some(path) => EngineOptions::load(path)
                .with_context(|| format!("Failed to load options from {}", path.display()))?,
            None => EngineOptions::default(),
        };

        if let Some(channels) = &self.channels {
            options.channels = Channel::parse_list(channels)?;
        }
        if let Some(bits) = self.bits {
            options.bits_per_channel = bits;
        }
        if let Some(method) = self.method {
            options.method = method;
        }
        if self.spread {
            options.spread = true;
        }
        if let Some(seed) = self.seed {
            options.seed = seed;
        }
        if self.xor {
            options.encryption = Encryption::Xor;
        }
        if let Some(password) = &self.password {
            options.password = password.clone();
        }
        if options.encryption == Encryption::Xor && options.password.is_empty() {
            options.password = prompt_password("Password: ")?;
        }

        Ok(options)
    }

    fn engine(&self) -> anyhow::Result<SteganographyEngine> {
        Ok(SteganographyEngine::new(self.options()?)?)
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Encode {
            cover,
            output,
            message,
            file,
            engine,
        } => cmd_encode(&cover, &output, message, file, &engine),

        Commands::Decode {
            image,
            output,
            as_file,
            hex,
            engine,
        } => cmd_decode(&image, output, as_file, hex, &engine),

        Commands::Capacity {
            image,
            json,
            engine,
        } => cmd_capacity(&image, json, &engine),

        Commands::Detect {
            image,
            json,
            engine,
        } => cmd_detect(&image, json, &engine),

        Commands::Inspect { image, engine } => cmd_inspect(&image, &engine),
    }
}

fn prompt_password(prompt: &str) -> io::Result<String> {
    match rpassword::prompt_password(prompt) {
        Ok(password) => Ok(password),
        Err(_) => {
            eprint!("{}", prompt);
            io::stderr().flush()?;
            let mut password = String::new();
            io::stdin().read_line(&mut password)?;
            Ok(password.trim().to_string())
        }
    }
}

fn load_image(path: &Path) -> anyhow::Result<PixelBuffer> {
    let image = image::open(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?;
    tracing::info!(
        width = image.width(),
        height = image.height(),
        "loaded {}",
        path.display()
    );
    Ok(PixelBuffer::from(image.to_rgba8()))
}

fn save_image(buffer: PixelBuffer, path: &Path) -> anyhow::Result<()> {
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if !is_png {
        tracing::warn!(
            "{} is not a .png path; lossy formats destroy hidden data",
            path.display()
        );
    }

    buffer
        .into_rgba_image()?
        .save(path)
        .with_context(|| format!("Failed to write image {}", path.display()))
}

fn cmd_encode(
    cover: &Path,
    output: &Path,
    message: Option<String>,
    file: Option<PathBuf>,
    args: &EngineArgs,
) -> anyhow::Result<()> {
    let engine = args.engine()?;
    let image = load_image(cover)?;

    let result = match (message, file) {
        (Some(text), None) => engine.encode_text(&image, &text)?,
        (None, Some(path)) => {
            let data = std::fs::read(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            engine.encode_file(&image, &data, &filename)?
        }
        (None, None) => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            engine.encode(&image, buffer)?
        }
        (Some(_), Some(_)) => unreachable!(),
    };

    save_image(result.image, output)?;

    println!("Encoded {} bytes into {}", result.bytes_encoded, output.display());
    println!("  Capacity: {} bytes", result.capacity);
    println!("  Used:     {:.1}%", result.used_capacity);

    Ok(())
}

fn cmd_decode(
    path: &Path,
    output: Option<PathBuf>,
    as_file: bool,
    hex: bool,
    args: &EngineArgs,
) -> anyhow::Result<()> {
    let engine = args.engine()?;
    let image = load_image(path)?;

    if as_file {
        let file = engine.decode_file(&image, None)?;
        let target = match output {
            Some(path) => path,
            None => {
                let name = Path::new(&file.filename)
                    .file_name()
                    .map(PathBuf::from)
                    .unwrap_or_default();
                if name.as_os_str().is_empty() {
                    bail!("Hidden file has no usable name; pass --output");
                }
                name
            }
        };
        std::fs::write(&target, &file.data)?;
        println!("Wrote {} bytes to {}", file.data.len(), target.display());
        return Ok(());
    }

    let result = engine.decode(&image, None)?;
    match output {
        Some(path) => {
            std::fs::write(&path, &result.data)?;
            println!("Wrote {} bytes to {}", result.bytes_decoded, path.display());
        }
        None if hex => println!("{}", hex::encode(&result.data)),
        None => io::stdout().write_all(&result.data)?,
    }

    Ok(())
}

fn cmd_capacity(path: &Path, json: bool, args: &EngineArgs) -> anyhow::Result<()> {
    let engine = args.engine()?;
    let image = load_image(path)?;
    let info = engine.calculate_capacity(&image);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Image Capacity");
    println!("==============");
    println!("Pixels:           {}", info.pixel_count);
    println!("Bits per pixel:   {}", info.bits_per_pixel);
    println!("Total:            {} bytes", info.total_bytes);
    println!("Usable:           {} bytes", info.usable_bytes);
    println!("Max message:      {} bytes", info.max_message_length);

    Ok(())
}

fn cmd_detect(path: &Path, json: bool, args: &EngineArgs) -> anyhow::Result<()> {
    let engine = args.engine()?;
    let image = load_image(path)?;
    let result = engine.detect(&image);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Detection Report");
    println!("================");
    println!(
        "Hidden data:      {}",
        if result.has_hidden_data { "likely" } else { "not found" }
    );
    println!("Confidence:       {}%", result.confidence);
    if let Some(method) = result.method {
        println!("Method:           {}", method);
    }
    if let Some(size) = result.estimated_size {
        println!("Estimated size:   {} bytes", size);
    }

    if !result.indicators.is_empty() {
        println!();
        println!("Indicators:");
        for indicator in &result.indicators {
            println!("  {}", indicator);
        }
    }

    Ok(())
}

fn cmd_inspect(path: &Path, args: &EngineArgs) -> anyhow::Result<()> {
    let engine = args.engine()?;
    let options = engine.options();
    let image = load_image(path)?;

    let Some(raw) = carrier::extract(&image, HEADER_SIZE, options) else {
        bail!("Image too small to hold a header");
    };
    let bytes = pixel_steg::crypto::decrypt(&raw, options.encryption, &options.password);

    println!("Raw header:       {}", hex::encode(&raw));
    if options.encryption != Encryption::None {
        println!("Decrypted:        {}", hex::encode(&bytes));
    }

    match Header::parse(&bytes) {
        Ok(header) => {
            println!("Length:           {} bytes", header.length);
            println!("Method tag:       {}", header.method_tag);
            println!("Bits per channel: {}", header.bits_per_channel);
            println!("Channel mask:     {:#06b}", header.channel_mask);
            println!("Spread:           {}", header.spread);
        }
        Err(e) => println!("{}", e),
    }

    Ok(())
}
