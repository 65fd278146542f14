use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use utmn_map::canvas::{FsIconLoader, IconLookup};
use utmn_map::core::ObjectType;
use utmn_map::{init_logging, Config, HttpMapClient, IconCache, MapCanvas, PixmapSurface};

const ICON_PRELOAD_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "utmn-map", version, about = "Render UTMN MAP floor plans")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a building and render one floor to PNG
    Render {
        /// Building id
        #[arg(long)]
        building: String,
        /// Floor name; defaults to the first floor
        #[arg(long)]
        floor: Option<String>,
        /// Config file (JSON or TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output PNG path
        #[arg(long)]
        out: PathBuf,
        /// Route start node id
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// Route end node id
        #[arg(long, requires = "from")]
        to: Option<String>,
    },
    /// Show the effective configuration
    Config {
        #[arg(long)]
        print: bool,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::debug!("utmn-map {} (built {})", utmn_map::VERSION, utmn_map::BUILD_DATE);

    match Cli::parse().command {
        Command::Render {
            building,
            floor,
            config,
            out,
            from,
            to,
        } => {
            let config = Config::load_or_default(config.as_deref())?;
            let route = from.zip(to);
            render(&config, &building, floor.as_deref(), route, &out).await
        }
        Command::Config { print, config } => {
            let config = Config::load_or_default(config.as_deref())?;
            if print {
                println!("{}", config.to_toml_string()?);
            } else if let Ok(path) = Config::default_path() {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}

async fn render(
    config: &Config,
    building: &str,
    floor: Option<&str>,
    route: Option<(String, String)>,
    out: &std::path::Path,
) -> anyhow::Result<()> {
    let client = Arc::new(HttpMapClient::from_settings(&config.api));
    let mut canvas = MapCanvas::new(client, building, config)?;
    canvas
        .load()
        .await
        .with_context(|| format!("loading building {building}"))?;

    if let Some(name) = floor {
        canvas.set_current_floor_by_name(name)?;
    }
    if let Some((start, end)) = route {
        canvas.build_route(&start, &end).await?;
        canvas.finish_route_animation();
    }

    let icons = IconCache::install_global(IconCache::new(Arc::new(FsIconLoader::new(
        &config.render.icon_dir,
    ))));
    preload_icons(&icons).await;

    let mut surface =
        PixmapSurface::new(config.render.surface_width, config.render.surface_height)?
            .with_icons(icons);
    canvas.render_to(&mut surface);
    surface
        .save_png(out)
        .with_context(|| format!("writing {}", out.display()))?;

    tracing::info!("Wrote {}", out.display());
    canvas.teardown();
    Ok(())
}

/// Starts every icon load and waits a bounded time for them to settle, so the
/// single frame we render has its icons.
async fn preload_icons(icons: &Arc<IconCache>) {
    let ids: Vec<&str> = ObjectType::ALL
        .iter()
        .filter(|t| !t.is_labelled())
        .map(|t| t.icon_id())
        .collect();
    for id in &ids {
        icons.get_or_load(id);
    }

    let deadline = Instant::now() + ICON_PRELOAD_TIMEOUT;
    while ids
        .iter()
        .any(|id| matches!(icons.peek(id), Some(IconLookup::Pending)))
    {
        if Instant::now() >= deadline {
            tracing::warn!("Some icons are still loading; rendering without them");
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
