use clap::{Parser, Subcommand};
use photo_gallery::assets::AssetManager;
use photo_gallery::config::{self, PluginConfig};
use photo_gallery::plugin::GalleryPlugin;
use photo_gallery::resolve::{FsProbe, resolve_gallery_path};
use photo_gallery::shortcode::{
    Attributes, GalleryShortcode, HostContext, ShortcodeManager, parse_attributes,
};
use photo_gallery::{logging, output, scan};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "photo-gallery")]
#[command(about = "Render justified image galleries for static sites")]
#[command(long_about = "\
Render justified image galleries for static sites

The gallery shortcode turns a directory of images into a justified grid
with a lightbox. This tool runs the same code outside a host build.

Content structure:

  content/
  ├── gallery.toml                 # Gallery defaults (optional)
  ├── vendor/                      # Bundled jQuery / justifiedGallery / magnific-popup
  └── assets/images/
      └── trip/                    # [gallery path=\"trip\"] finds this via the legacy prefix
          ├── beach-day.jpg        # Title \"Beach Day\"
          └── hotel lobby.png      # URL /assets/images/trip/hotel%20lobby.png

Run 'photo-gallery gen-config' to generate a documented gallery.toml.")]
#[command(version)]
struct Cli {
    /// Content directory (gallery paths are relative to it)
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Config file (default: <source>/gallery.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug for this crate, -vv debug everywhere)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Display overrides for `render`.
#[derive(clap::Args)]
struct RenderArgs {
    /// Gallery directory, relative to the content directory
    path: String,

    /// Target row height in pixels
    #[arg(long)]
    row_height: Option<i64>,

    /// Gap between images in pixels
    #[arg(long)]
    margins: Option<i64>,

    /// Layout of the last row (nojustify, justify, left, center, right, hide)
    #[arg(long)]
    last_row: Option<String>,

    /// Images shown before "Load More" (0 = all)
    #[arg(long)]
    limit: Option<i64>,

    /// Raw shortcode attributes, e.g. 'rowHeight=150 lastRow="justify"'
    #[arg(long)]
    attrs: Option<String>,

    /// Print the stylesheet and script tags before the fragment
    #[arg(long)]
    with_assets: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List the images a gallery path resolves to
    Scan {
        /// Gallery directory, relative to the content directory
        path: String,

        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render the gallery HTML fragment to stdout
    Render(RenderArgs),
    /// Copy the bundled vendor libraries into the output directory
    CopyAssets,
    /// Print a stock gallery.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match &cli.command {
        Command::Scan { path, json } => {
            let gallery_path = resolve_gallery_path(&cli.source, path, &FsProbe);
            let images = scan::scan(&cli.source, &gallery_path);
            if *json {
                println!("{}", serde_json::to_string_pretty(&images)?);
            } else {
                output::print_scan_output(&gallery_path, &images);
            }
        }
        Command::Render(args) => {
            let (config, _) = load_config(&cli)?;
            let mut manager = ShortcodeManager::new();
            manager.register(Box::new(GalleryShortcode::new(config)));

            let mut assets = AssetManager::new();
            let html = {
                let mut host = HostContext::new(&cli.source)
                    .with_output_dir(&cli.output)
                    .with_assets(&mut assets);
                manager
                    .dispatch(GalleryShortcode::NAME, &render_attributes(args), "", &mut host)
                    .unwrap_or_default()
            };

            if args.with_assets {
                println!("{}", assets.render_head().into_string());
            }
            print!("{}", html);
            if args.with_assets {
                println!("{}", assets.render_footer().into_string());
            }
        }
        Command::CopyAssets => {
            let (config, base) = load_config(&cli)?;
            let vendor_dir = config.vendor_dir_from(&base);
            let plugin = GalleryPlugin::new(config, vendor_dir);
            let report = plugin.copy_assets(Some(&cli.output))?;
            output::print_copy_output(report.as_ref());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config and return it with the directory relative paths in it
/// are resolved against.
fn load_config(cli: &Cli) -> Result<(PluginConfig, PathBuf), config::ConfigError> {
    match &cli.config {
        Some(path) => {
            let base = path.parent().unwrap_or(Path::new(".")).to_path_buf();
            Ok((config::load_config_file(path)?, base))
        }
        None => Ok((config::load_config(&cli.source)?, cli.source.clone())),
    }
}

/// Merge `--attrs` with the dedicated flags; flags win.
fn render_attributes(args: &RenderArgs) -> Attributes {
    let mut attrs = args
        .attrs
        .as_deref()
        .map(parse_attributes)
        .unwrap_or_default();

    attrs.insert("path".to_string(), args.path.clone());
    let overrides = [
        ("rowHeight", args.row_height.map(|v| v.to_string())),
        ("margins", args.margins.map(|v| v.to_string())),
        ("lastRow", args.last_row.clone()),
        ("limit", args.limit.map(|v| v.to_string())),
    ];
    for (key, value) in overrides {
        if let Some(value) = value {
            attrs.insert(key.to_string(), value);
        }
    }
    attrs
}
