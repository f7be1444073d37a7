// SPDX-License-Identifier: MPL-2.0
use cropframe::config;
use cropframe::error::Error;
use cropframe::media::{Filter, ImagePayload};
use cropframe::ui::{CropForm, Host, Resizer, ResizerOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const HELP: &str = "\
cropframe - crop a square out of a picture

USAGE:
  cropframe <INPUT> [OPTIONS]

OPTIONS:
  --x <X>             Left edge of the crop square (default: centered)
  --y <Y>             Top edge of the crop square (default: centered)
  --side <SIDE>       Side of the crop square (default: 3/4 of the shorter side)
  --fit               Pull an out-of-bounds crop square inside the image
                      instead of rejecting it
  --filter <NAME>     Retouch filter: none, chrome or sepia (default: last used)
  --output <PATH>     Where to write the cropped PNG (default: <INPUT>-crop.png)
  --preview <PATH>    Also write the crop preview surface as PNG
  -h, --help          Print this help
";

struct Args {
    input: PathBuf,
    x: Option<String>,
    y: Option<String>,
    side: Option<String>,
    fit: bool,
    filter: Option<Filter>,
    output: Option<PathBuf>,
    preview: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let parsed = Args {
        x: args.opt_value_from_str("--x")?,
        y: args.opt_value_from_str("--y")?,
        side: args.opt_value_from_str("--side")?,
        fit: args.contains("--fit"),
        filter: args.opt_value_from_str("--filter")?,
        output: args.opt_value_from_str("--output")?,
        preview: args.opt_value_from_str("--preview")?,
        input: args.free_from_str()?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        log::warn!("Ignoring unused arguments: {rest:?}");
    }
    Ok(Some(parsed))
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    input.with_file_name(format!("{stem}-crop.png"))
}

async fn run(args: Args) -> Result<(), Error> {
    let mut config = config::load().unwrap_or_else(|err| {
        log::warn!("Using default settings: {err}");
        config::Config::default()
    });

    let options = ResizerOptions::from_config(&config);
    let options = ResizerOptions {
        renderer: options.renderer.with_system_fonts(),
        ..options
    };

    let bytes = std::fs::read(&args.input)?;
    let mut resizer = Resizer::load(ImagePayload::Bytes(bytes), options).await?;
    let host = Host::new();
    resizer.attach_to(&host)?;

    let mut form = CropForm::new();
    if let Some(event) = resizer.on_animation_frame() {
        form.handle_event(event);
    }

    if args.x.is_some() || args.y.is_some() || args.side.is_some() {
        let (x, y, side) = form.fields();
        let x = args.x.clone().unwrap_or_else(|| x.to_string());
        let y = args.y.clone().unwrap_or_else(|| y.to_string());
        let side = args.side.clone().unwrap_or_else(|| side.to_string());
        form.input(&mut resizer, &x, &y, &side)?;
        if let Some(error) = form.error() {
            if !args.fit {
                return Err(Error::InvalidRegion(error));
            }
            log::info!("Fitting crop square into the image: {error}");
            form.fit(&mut resizer)?;
        }
        if let Some(event) = resizer.on_animation_frame() {
            form.handle_event(event);
        }
    }

    if let Some(preview) = &args.preview {
        if let Some(surface) = resizer.surface() {
            surface
                .save_png(preview)
                .map_err(|e| Error::Encode(e.to_string()))?;
            log::info!("Preview written to {}", preview.display());
        }
    }

    let exported = form.submit(&resizer)?;
    let filter = args.filter.unwrap_or_else(|| config.filter());
    let retouched = filter.apply(&exported.to_rgba_image()?);

    let output = args.output.unwrap_or_else(|| default_output(&args.input));
    retouched
        .save(&output)
        .map_err(|e| Error::Encode(e.to_string()))?;
    println!(
        "{}x{} crop with '{filter}' filter written to {}",
        exported.width,
        exported.height,
        output.display()
    );

    resizer.remove()?;

    config.filter = Some(filter);
    if let Err(err) = config::save(&config) {
        log::warn!("Failed to remember filter choice: {err}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("Error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
