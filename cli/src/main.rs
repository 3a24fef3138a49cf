use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use flash_canvas::assets;
use flash_canvas::compose::{self, ComposeError, ComposeOptions};
use flash_canvas::consts::{EDITOR_HEIGHT, EDITOR_WIDTH};
use flash_canvas::doc::{AnnotationStore, IconKind};
use flash_canvas::grid::GridLayout;
use flash_canvas::state::{ImageStates, SlotId, SlotState, StateError};
use flash_canvas::transform::Transform;
use image::RgbaImage;
use serde_json::{Value, json};
use tracing::level_filters::LevelFilter;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to load image {path}: {source}")]
    Image { path: String, source: image::ImageError },
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error("unknown layout `{0}`")]
    UnknownLayout(String),
    #[error("invalid size `{0}`; expected WIDTHxHEIGHT")]
    InvalidSize(String),
    #[error("nothing to write; pass --output or --data-uri")]
    NoOutput,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "flash", about = "Safety flash image tools: grid composites, layouts, saved editor state")]
struct Cli {
    /// Log level: off, error, warn, info, debug, trace.
    #[arg(long, env = "FLASH_LOG", default_value = "warn", global = true)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite 1-3 images into a 1080x1080 grid bitmap.
    Compose(ComposeArgs),
    /// List grid layouts, optionally only those valid for an image count.
    Layouts {
        #[arg(long)]
        count: Option<usize>,
    },
    /// Print the cover-fit transform for an image on the editor canvas.
    Fit {
        /// Image size as WIDTHxHEIGHT.
        image: String,
        /// Canvas size as WIDTHxHEIGHT.
        #[arg(long)]
        canvas: Option<String>,
    },
    /// Normalize a saved editor state map, dropping malformed entries.
    State(StateArgs),
    /// Print annotation icon URLs.
    Icons {
        #[arg(long, env = "FLASH_BASE_URL", default_value = "")]
        base_url: String,
    },
}

#[derive(Args, Debug)]
struct ComposeArgs {
    /// Slot images in slot order.
    #[arg(required = true, num_args = 1..=3)]
    images: Vec<PathBuf>,

    /// Layout id, e.g. grid-2b. Falls back to the default for the count.
    #[arg(long)]
    layout: Option<String>,

    /// Background colour as #rgb, #rrggbb or #rrggbbaa.
    #[arg(long)]
    background: Option<String>,

    /// PNG output path.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the PNG as a data URI.
    #[arg(long, default_value_t = false)]
    data_uri: bool,
}

#[derive(Args, Debug)]
struct StateArgs {
    /// State JSON file, or - for stdin.
    #[arg(default_value = "-")]
    input: String,

    /// Print only this slot (1-3).
    #[arg(long)]
    slot: Option<usize>,
}

fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_max_level(cli.log_level).with_writer(io::stderr).init();

    if let Err(e) = run(cli.command) {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Compose(args) => {
            let report = run_compose(&args)?;
            print_json(&report)
        }
        Command::Layouts { count } => print_json(&layouts_json(count)),
        Command::Fit { image, canvas } => {
            let value = fit_json(&image, canvas.as_deref())?;
            print_json(&value)
        }
        Command::State(args) => {
            let raw = read_input(&args.input)?;
            let value = normalize_state(&raw, args.slot)?;
            print_json(&value)
        }
        Command::Icons { base_url } => print_json(&icons_json(&base_url)),
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .map_err(|source| CliError::Read { path: "stdin".into(), source })?;
        return Ok(raw);
    }
    fs::read_to_string(input).map_err(|source| CliError::Read { path: input.to_owned(), source })
}

fn load_image(path: &Path) -> Result<RgbaImage, CliError> {
    let img = image::open(path).map_err(|source| CliError::Image { path: path.display().to_string(), source })?;
    Ok(img.to_rgba8())
}

fn parse_layout(id: &str) -> Result<GridLayout, CliError> {
    GridLayout::parse(id).ok_or_else(|| CliError::UnknownLayout(id.to_owned()))
}

fn parse_size(raw: &str) -> Result<(f64, f64), CliError> {
    let invalid = || CliError::InvalidSize(raw.to_owned());
    let (w, h) = raw.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
    let w: f64 = w.trim().parse().map_err(|_| invalid())?;
    let h: f64 = h.trim().parse().map_err(|_| invalid())?;
    if !(w.is_finite() && h.is_finite()) {
        return Err(invalid());
    }
    Ok((w, h))
}

// =============================================================
// Commands
// =============================================================

fn run_compose(args: &ComposeArgs) -> Result<Value, CliError> {
    if args.output.is_none() && !args.data_uri {
        return Err(CliError::NoOutput);
    }
    let requested = args.layout.as_deref().map(parse_layout).transpose()?;
    let mut options = ComposeOptions::default();
    if let Some(bg) = &args.background {
        options.background = compose::parse_color(bg)?;
    }

    let images = args.images.iter().map(|p| load_image(p)).collect::<Result<Vec<_>, _>>()?;
    let refs: Vec<Option<&RgbaImage>> = images.iter().map(Some).collect();
    let composite = compose::compose(requested, &refs, &options)?;
    if let Some(req) = requested {
        if req != composite.layout {
            tracing::warn!(requested = req.id(), used = composite.layout.id(), "layout invalid for image count");
        }
    }

    let mut report = json!({ "layout": composite.layout.id(), "images": images.len() });
    if let Some(path) = &args.output {
        composite
            .image
            .save(path)
            .map_err(|source| CliError::Image { path: path.display().to_string(), source })?;
        tracing::info!(path = %path.display(), "wrote composite");
        report["output"] = json!(path.display().to_string());
    }
    if args.data_uri {
        report["data_uri"] = json!(composite.to_data_uri()?);
    }
    Ok(report)
}

fn layouts_json(count: Option<usize>) -> Value {
    let layouts: Vec<GridLayout> = match count {
        Some(n) => GridLayout::options_for(n).to_vec(),
        None => GridLayout::ALL.to_vec(),
    };
    let entries: Vec<Value> = layouts
        .into_iter()
        .map(|layout| {
            let regions: Vec<Value> = layout
                .regions()
                .iter()
                .map(|r| {
                    json!({
                        "key": r.key.name(),
                        "x": r.x,
                        "y": r.y,
                        "width": r.width,
                        "height": r.height,
                        "radius": r.radius,
                        "border": r.border,
                        "z": r.z,
                    })
                })
                .collect();
            json!({ "id": layout.id(), "images": layout.image_count(), "regions": regions })
        })
        .collect();
    Value::Array(entries)
}

fn fit_json(image: &str, canvas: Option<&str>) -> Result<Value, CliError> {
    let (iw, ih) = parse_size(image)?;
    let (cw, ch) = match canvas {
        Some(raw) => parse_size(raw)?,
        None => (EDITOR_WIDTH, EDITOR_HEIGHT),
    };
    let transform = Transform::fit_cover(cw, ch, iw, ih);
    Ok(serde_json::to_value(transform)?)
}

fn normalize_state(raw: &str, slot: Option<usize>) -> Result<Value, CliError> {
    let parsed = ImageStates::parse_lenient(raw);
    let mut states = ImageStates::new();
    for id in SlotId::ALL {
        if let Some(state) = parsed.get(id) {
            let store = AnnotationStore::from_vec(state.annotations.clone());
            states.set(id, SlotState { transform: state.transform, annotations: store.to_saved() });
        }
    }
    match slot {
        Some(n) => match states.get(SlotId::new(n)?) {
            Some(state) => Ok(serde_json::from_str(&state.to_json()?)?),
            None => Ok(Value::Null),
        },
        None => Ok(serde_json::from_str(&states.to_json()?)?),
    }
}

fn icons_json(base_url: &str) -> Value {
    let map: serde_json::Map<String, Value> = IconKind::ALL
        .into_iter()
        .map(|kind| (kind.name().to_owned(), json!(assets::icon_url(base_url, kind))))
        .collect();
    Value::Object(map)
}
