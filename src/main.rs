use clap::{Parser, Subcommand};
use picture_sources::{OutputFormat, RenderOptions, Resolver, config, logging, output};
use std::path::PathBuf;

/// Rendering options shared by commands that build CDN URLs.
#[derive(clap::Args, Clone)]
struct RenderArgs {
    /// Image source URL
    src: String,

    /// Target width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Target height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// CDN fit mode (scale-down, contain, cover, crop, pad)
    #[arg(long)]
    fit: Option<String>,

    /// Request lossless output (quality=100)
    #[arg(long)]
    lossless: bool,
}

impl RenderArgs {
    fn options(&self) -> RenderOptions {
        RenderOptions {
            width: self.width,
            height: self.height,
            fit: self.fit.clone(),
            is_lossless: self.lossless,
        }
    }
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "picture-sources")]
#[command(about = "Resolve CDN image URLs into responsive <picture> sources")]
#[command(long_about = "\
Resolve CDN image URLs into responsive <picture> sources

Images on a configured CDN origin are rewritten to the CDN's image-resizing
endpoint and expanded into four <source> descriptors:

  1. (min-width: <breakpoint>px)  image/webp
  2. (min-width: <breakpoint>px)  original type
  3. catch-all                    image/webp
  4. catch-all                    original type

Any other URL is printed back unchanged. Stock-photo URLs are recognized but
not transformed.

Run 'picture-sources gen-config' to generate a documented sources.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (missing file = stock defaults)
    #[arg(long, default_value = "sources.toml", global = true)]
    config: PathBuf,

    /// Show debug logs on stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve an image URL into a direct URL and responsive sources
    Resolve {
        #[command(flatten)]
        render: RenderArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a pixel-density srcset (1x, 2x, 3x) for an image URL
    Srcset {
        #[command(flatten)]
        render: RenderArgs,

        /// Request webp output from the CDN
        #[arg(long)]
        webp: bool,
    },
    /// Validate the config file and print the effective settings
    CheckConfig,
    /// Print a stock sources.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Command::Resolve { render, json } => {
            let resolver = load_resolver(&cli.config)?;
            let resolved = resolver
                .resolve_sources(&render.src, &render.options())
                .inspect_err(|e| tracing::error!(src = %render.src, error = %e, "cannot resolve"))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&resolved)?);
            } else {
                output::print_resolved(&resolved);
            }
        }
        Command::Srcset { render, webp } => {
            let resolver = load_resolver(&cli.config)?;
            let format = if webp {
                OutputFormat::WebP
            } else {
                OutputFormat::Original
            };
            let srcset = resolver
                .density_srcset(&render.src, &render.options(), format)
                .inspect_err(|e| tracing::error!(src = %render.src, error = %e, "cannot build srcset"))?;
            match srcset {
                Some(srcset) => println!("{}", srcset),
                None => {
                    tracing::info!(src = %render.src, "not a CDN origin, printing source unchanged");
                    println!("{}", render.src);
                }
            }
        }
        Command::CheckConfig => {
            println!("==> Checking {}", cli.config.display());
            let resolver = load_resolver(&cli.config)?;
            output::print_config(resolver.config());
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file and build a resolver from it.
fn load_resolver(path: &std::path::Path) -> Result<Resolver, config::ConfigError> {
    let config = config::load_config(path)
        .inspect_err(|e| tracing::error!(path = %path.display(), error = %e, "invalid config"))?;
    Ok(Resolver::new(config))
}
