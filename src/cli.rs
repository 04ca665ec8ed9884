use crate::constants::DEFAULT_MAX_WIDTH;
use crate::validation::{parse_max_width, parse_quality};
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "webp-squeeze",
    about = "Convert images to compressed WebP, downscaling to a maximum width",
    long_about = "webp-squeeze converts PNG, JPEG, GIF, BMP, TIFF and WebP images to lossy WebP. \
                  Transparent areas are flattened onto white, and images wider than the maximum \
                  width are downscaled with a Lanczos filter while keeping their aspect ratio. \
                  Given a directory, every supported image directly inside it is converted.",
    version,
    after_help = "EXAMPLES:\n  \
    webp-squeeze myth-cu-chulainn.png\n  \
    webp-squeeze ./mythology-images/\n  \
    webp-squeeze ./images/ --output ./optimized/ --width 400"
)]
pub struct Args {
    #[arg(help = "Image file or directory of images")]
    pub input: PathBuf,

    #[arg(
        long,
        value_name = "DIR",
        help = "Output directory (default: same as input)",
        long_help = "Directory for the generated .webp files. Created if missing. \
                     Defaults to the directory of each input file."
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        value_name = "PIXELS",
        allow_negative_numbers = true,
        value_parser = parse_max_width,
        help = "Max width (default: 300, prompts when interactive)",
        long_help = "Maximum output width in pixels. Narrower images are never upscaled. \
                     When omitted and stdin is a terminal, the width is asked for interactively."
    )]
    pub width: Option<u32>,

    #[arg(
        long,
        value_name = "0-100",
        allow_negative_numbers = true,
        value_parser = parse_quality,
        help = "WebP quality (default: 85)"
    )]
    pub quality: Option<u8>,

    #[arg(long, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short, long, help = "Print extra detail and debug logs")]
    pub verbose: bool,
}

impl Args {
    /// Parse process arguments, dropping unknown flags with a warning.
    pub fn parse_lenient() -> Self {
        let (known, unknown) = split_unknown_flags(std::env::args_os());
        for flag in &unknown {
            crate::warn!("Unknown argument: {}", flag.to_string_lossy());
        }
        Args::parse_from(known)
    }
}

/// Separate tokens this CLI cannot use from the ones clap should parse.
///
/// The first element is the program name and is always kept. Unknown flags,
/// extra positionals after `<INPUT>`, and a value-taking option with no value
/// left are all set aside. Values that follow a known option taking a value
/// are kept even when they look like flags, so `--width -5` still reaches
/// validation.
pub fn split_unknown_flags<I, T>(args: I) -> (Vec<OsString>, Vec<OsString>)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut cmd = Args::command();
    cmd.build();

    let takes_value = |token: &str| -> Option<bool> {
        if let Some(long) = token.strip_prefix("--") {
            let name = long.split('=').next().unwrap_or(long);
            cmd.get_arguments()
                .find(|arg| arg.get_long() == Some(name))
                .map(|arg| arg.get_action().takes_values() && !long.contains('='))
        } else {
            let mut chars = token.strip_prefix('-')?.chars();
            let short = chars.next()?;
            cmd.get_arguments()
                .find(|arg| arg.get_short() == Some(short))
                .map(|arg| arg.get_action().takes_values() && chars.next().is_none())
        }
    };

    let mut known = Vec::new();
    let mut unknown = Vec::new();
    let mut has_input = false;
    let mut iter = args.into_iter().map(Into::into);
    if let Some(program) = iter.next() {
        known.push(program);
    }

    while let Some(token) = iter.next() {
        let text = token.to_string_lossy().into_owned();

        if text == "--" {
            for rest in iter.by_ref() {
                if has_input {
                    unknown.push(rest);
                } else {
                    known.push(OsString::from("--"));
                    known.push(rest);
                    has_input = true;
                }
            }
            break;
        }

        let looks_like_flag =
            text.starts_with('-') && text.len() > 1 && text.parse::<f64>().is_err();
        if !looks_like_flag {
            if has_input {
                unknown.push(token);
            } else {
                known.push(token);
                has_input = true;
            }
            continue;
        }

        match takes_value(&text) {
            Some(true) => match iter.next() {
                Some(value) => {
                    known.push(token);
                    known.push(value);
                }
                None => unknown.push(token),
            },
            Some(false) => known.push(token),
            None => unknown.push(token),
        }
    }

    (known, unknown)
}

/// Decide the max width when `--width` may be absent.
///
/// `read_line` is only called when `interactive` is true; it should prompt
/// and return the raw line the user typed.
pub fn resolve_max_width<F>(width: Option<u32>, interactive: bool, read_line: F) -> u32
where
    F: FnOnce() -> std::io::Result<String>,
{
    if let Some(width) = width {
        return width;
    }

    if !interactive {
        crate::info!(
            "No --width provided and not in interactive mode. Using default: {}px",
            DEFAULT_MAX_WIDTH
        );
        return DEFAULT_MAX_WIDTH;
    }

    let line = match read_line() {
        Ok(line) => line,
        Err(e) => {
            crate::warn!("Could not read width ({}). Using default width of {}.", e, DEFAULT_MAX_WIDTH);
            return DEFAULT_MAX_WIDTH;
        }
    };

    let trimmed = line.trim();
    if trimmed.is_empty() {
        return DEFAULT_MAX_WIDTH;
    }

    match parse_max_width(trimmed) {
        Ok(width) => width,
        Err(_) => {
            crate::warn!("Invalid input. Using default width of {}.", DEFAULT_MAX_WIDTH);
            DEFAULT_MAX_WIDTH
        }
    }
}

/// Prompt on stdout and read one line from stdin.
pub fn prompt_max_width() -> std::io::Result<String> {
    use std::io::Write;

    print!("Enter max width in pixels (default: {}): ", DEFAULT_MAX_WIDTH);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line)
}
