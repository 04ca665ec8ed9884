use anyhow::Context;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use webp_squeeze::cli::{prompt_max_width, resolve_max_width, Args};
use webp_squeeze::constants::{BANNER_TITLE, BANNER_WIDTH};
use webp_squeeze::logger::{self, Verbosity};
use webp_squeeze::{
    batch_compress_images, classify_input, compress_image, InputKind, TransformConfig,
};

fn main() -> anyhow::Result<()> {
    let args = Args::parse_lenient();

    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);
    logger::set_verbosity(verbosity);
    init_tracing(verbosity);

    print_banner();

    let interactive = std::io::stdin().is_terminal() && !args.quiet;
    let max_width = resolve_max_width(args.width, interactive, prompt_max_width);
    let config = TransformConfig::new(Some(max_width), args.quality, args.output.clone())
        .context("invalid configuration")?;
    tracing::debug!(?config, "Resolved configuration");

    match classify_input(&args.input)? {
        InputKind::File => {
            // a failed file is reported, not fatal
            let _ = compress_image(&args.input, &config);
        }
        InputKind::Directory => {
            batch_compress_images(&args.input, &config)?;
        }
    }

    Ok(())
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.tracing_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_banner() {
    let rule = "=".repeat(BANNER_WIDTH);
    webp_squeeze::info!("{}", rule);
    webp_squeeze::info!("{}", BANNER_TITLE);
    webp_squeeze::info!("{}", rule);
    webp_squeeze::info!("");
}
