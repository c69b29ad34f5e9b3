//! # QrForge CLI
//!
//! Command-line interface for generating styled QR codes.
//!
//! ## Usage
//!
//! ```bash
//! # List templates
//! qrforge templates
//!
//! # Generate and export a PNG into the current directory
//! qrforge generate https://example.com --template gradient-teal --size 1024
//!
//! # Add a caption and export a PDF
//! qrforge generate https://example.com --caption "Scan Me" --font-size 20 --format pdf
//!
//! # Show history and re-export an entry
//! qrforge history list
//! qrforge history restore <ID> --format svg
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use qrforge::{
    QrForgeError,
    app::App,
    caption::{CaptionStyle, FONT_OPTIONS, TEXT_PRESETS},
    color::Color,
    config::Config,
    export::{EXPORT_DIMENSIONS, ExportFormat, ExportSettings},
    history::{FileStore, format_age, now_millis},
    session::Event,
    template,
};

/// QrForge - styled QR code generator
#[derive(Parser, Debug)]
#[command(name = "qrforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory for persisted history
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available templates
    Templates {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List caption fonts, caption presets and size presets
    Fonts,

    /// Generate a QR code, record it in history and export it
    Generate {
        /// URL or text to encode
        text: String,

        /// Template id (see `qrforge templates`)
        #[arg(long, short)]
        template: Option<String>,

        #[command(flatten)]
        caption: CaptionArgs,

        #[command(flatten)]
        export: ExportArgs,

        /// Record in history without writing a file
        #[arg(long)]
        no_export: bool,
    },

    /// Manage generation history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// List entries, most recent first
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Restore an entry and export it
    Restore {
        id: String,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Remove one entry
    Remove { id: String },

    /// Remove all entries
    Clear,
}

#[derive(Args, Debug)]
struct CaptionArgs {
    /// Caption text shown below the code (max 50 chars)
    #[arg(long)]
    caption: Option<String>,

    /// Caption font family
    #[arg(long)]
    font: Option<String>,

    /// Caption color (#rgb or #rrggbb)
    #[arg(long, value_name = "HEX")]
    caption_color: Option<String>,

    /// Caption font size in px (12-32)
    #[arg(long, value_name = "PX")]
    font_size: Option<u32>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Output format: png, svg or pdf
    #[arg(long, short, default_value = "png")]
    format: ExportFormat,

    /// Square size in px, sets width and height (64-4096)
    #[arg(long, value_name = "PX")]
    size: Option<u32>,

    /// Width in px (64-4096)
    #[arg(long, value_name = "PX")]
    width: Option<u32>,

    /// Height in px (64-4096)
    #[arg(long, value_name = "PX")]
    height: Option<u32>,

    /// Output directory
    #[arg(long, short, default_value = ".")]
    out: PathBuf,
}

impl CaptionArgs {
    fn to_caption(&self) -> Result<Option<CaptionStyle>, QrForgeError> {
        if self.caption.is_none() && self.font.is_none() && self.caption_color.is_none() && self.font_size.is_none() {
            return Ok(None);
        }

        let mut caption = CaptionStyle::new(self.caption.clone().unwrap_or_default());
        if let Some(font) = &self.font {
            caption = caption.font(font.clone());
        }
        if let Some(color) = &self.caption_color {
            caption = caption.color(Color::parse(color)?);
        }
        if let Some(size) = self.font_size {
            caption = caption.size(size);
        }
        Ok(Some(caption))
    }
}

impl ExportArgs {
    fn to_settings(&self) -> ExportSettings {
        ExportSettings::from_overrides(self.format, self.size, self.width, self.height)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), QrForgeError> {
    let config = Config::resolve(cli.data_dir);
    config.validate()?;
    tracing::debug!(data_dir = %config.data_dir.display(), "configuration resolved");

    match cli.command {
        Commands::Templates { json } => list_templates(json),
        Commands::Fonts => {
            list_fonts();
            Ok(())
        }
        Commands::Generate {
            text,
            template,
            caption,
            export,
            no_export,
        } => {
            let mut app = App::new(config.history_store());
            if let Some(id) = template {
                app.dispatch(Event::SelectTemplate(id))?;
            }
            if let Some(caption) = caption.to_caption()? {
                app.dispatch(Event::EditCaption(caption))?;
            }
            app.dispatch(Event::EditExport(export.to_settings()))?;
            app.dispatch(Event::EditInput(text))?;

            let entry = app.generate_encodable()?;
            println!("Generated QR code ({}), history id {}", app.session().template.name, entry.id);

            if !no_export {
                export_current(&mut app, &export.out)?;
            }
            Ok(())
        }
        Commands::History { action } => run_history(App::new(config.history_store()), action),
    }
}

fn run_history(mut app: App<FileStore>, action: HistoryAction) -> Result<(), QrForgeError> {
    match action {
        HistoryAction::List { json } => {
            if json {
                let out = serde_json::to_string_pretty(app.history().entries())
                    .map_err(|e| QrForgeError::Config(format!("Failed to serialize history: {}", e)))?;
                println!("{}", out);
                return Ok(());
            }

            if app.history().is_empty() {
                println!("No history yet. Generated QR codes will appear here.");
                return Ok(());
            }

            let now = now_millis();
            for entry in app.history().entries() {
                let template_name = template::by_id(&entry.template_id)
                    .map(|t| t.name)
                    .unwrap_or("unknown template");
                println!("{}  {}", entry.id, entry.value);
                let caption = if entry.caption.text.is_empty() {
                    String::new()
                } else {
                    format!(", caption \"{}\"", entry.caption.text)
                };
                println!(
                    "    {}{}, {} ago",
                    template_name,
                    caption,
                    format_age(entry.created_at, now)
                );
            }
            Ok(())
        }
        HistoryAction::Restore { id, export } => {
            app.restore(&id)?;
            app.dispatch(Event::EditExport(export.to_settings()))?;
            println!("Restored \"{}\" ({})", app.session().input, app.session().template.name);
            export_current(&mut app, &export.out)
        }
        HistoryAction::Remove { id } => {
            match app.remove_history(&id) {
                Some(entry) => println!("Removed \"{}\"", entry.value),
                None => println!("No history entry with id {}", id),
            }
            Ok(())
        }
        HistoryAction::Clear => {
            app.clear_history();
            println!("History cleared");
            Ok(())
        }
    }
}

fn export_current(app: &mut App<FileStore>, out: &Path) -> Result<(), QrForgeError> {
    let artifact = app.export(now_millis())?;
    let path = artifact.write_to(out)?;
    let settings = app.session().export;
    match settings.format {
        ExportFormat::Svg => println!("Saved {}", path.display()),
        _ => println!("Saved {} ({}x{})", path.display(), settings.width, settings.height),
    }
    Ok(())
}

fn list_templates(json: bool) -> Result<(), QrForgeError> {
    if json {
        let out = serde_json::to_string_pretty(template::all())
            .map_err(|e| QrForgeError::Config(format!("Failed to serialize templates: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    println!("Available templates:");
    for t in template::all() {
        let mut extras = vec![format!("{:?}", t.style()).to_lowercase()];
        if let Some(r) = t.corner_radius {
            extras.push(format!("radius {}", r));
        }
        if let Some(g) = &t.gradient {
            extras.push(format!("gradient {} -> {} @{}°", g.stops[0], g.stops[1], g.rotation_degrees()));
        }
        println!(
            "  {:<14} {:<14} {} on {}  [{}]",
            t.id,
            t.name,
            t.foreground,
            t.background,
            extras.join(", ")
        );
    }
    Ok(())
}

fn list_fonts() {
    println!("Caption fonts:");
    for font in FONT_OPTIONS {
        println!("  {}", font);
    }
    println!("\nCaption presets:");
    for preset in TEXT_PRESETS {
        println!("  {}", preset);
    }
    println!("\nSize presets:");
    for d in EXPORT_DIMENSIONS {
        println!("  {:<16} --size {}", d.label, d.width);
    }
}
