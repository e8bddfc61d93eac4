//! Terminal map-viewer front-end for a GeoServer workspace.
//!
//! Resolves layer metadata at startup, then runs one command: print
//! the legend, fetch filtered features for a layer, or identify the
//! feature under a map click.

mod display;
mod legend;
mod panel;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use gs_client::{ClickQuery, GsClient, GsConfig, MapLayer};
use gs_common::{BoundingBox, Operator};

use legend::Legend;
use panel::{params_panel_for, FilterPanel};

#[derive(Parser, Debug)]
#[command(name = "map-viewer")]
#[command(about = "GeoServer WMS/WFS layer viewer")]
struct Args {
    /// GeoServer base URI
    #[arg(long, env = "GEOSERVER_URI", default_value = "http://localhost:8080/geoserver")]
    server: String,

    /// Workspace name
    #[arg(long, env = "GEOSERVER_WORKSPACE", default_value = "osm")]
    workspace: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the legend: all advertised layers, grouped by service.
    Layers,

    /// Fetch features of a vector layer within an extent, optionally
    /// filtered by attribute and parameterized.
    Features {
        /// Layer name as advertised by the server
        #[arg(long)]
        layer: String,

        /// View extent as minx,miny,maxx,maxy
        #[arg(long)]
        extent: String,

        /// Attribute filter as <attribute>,<operator>,<value>; repeatable
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// View parameter as <name>:<value>; repeatable
        #[arg(long = "param")]
        params: Vec<String>,
    },

    /// Identify the feature under a click across all layers.
    Identify {
        /// Click coordinate as x,y in the configured projection
        #[arg(long)]
        at: String,

        /// View extent as minx,miny,maxx,maxy
        #[arg(long)]
        extent: String,

        /// View size in pixels as width,height
        #[arg(long, default_value = "1024,768")]
        size: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(args))
}

async fn run(args: Args) -> Result<()> {
    let client = GsClient::new(GsConfig::new(&args.server, &args.workspace))?;

    info!(server = %args.server, workspace = %args.workspace, "resolving layer metadata");
    let mut layers: Vec<MapLayer> = Vec::new();
    for info in client.fetch_wfs_layers().await? {
        layers.push(MapLayer::new(info));
    }
    for info in client.fetch_wms_layers().await? {
        layers.push(MapLayer::new(info));
    }

    match args.command {
        Command::Layers => {
            let legend = Legend::build(&layers);
            print!("{}", legend.to_display_string(&layers));
        }
        Command::Features {
            layer,
            extent,
            filters,
            params,
        } => {
            let extent = BoundingBox::parse(&extent)?;
            let layer_info = layers
                .iter()
                .find(|l| l.info.name == layer)
                .map(|l| l.info.clone())
                .ok_or_else(|| anyhow!("layer '{}' not advertised by the server", layer))?;

            let mut filter_panel = FilterPanel::new(layer_info.clone());
            filter_panel.on_refresh(Box::new(|| info!("filter changed, re-querying layer")));
            for (i, spec) in filters.iter().enumerate() {
                if i > 0 {
                    filter_panel.add_row();
                }
                let (attribute, operator, value) = parse_filter_spec(spec)?;
                filter_panel
                    .set_row(i, attribute, operator, value)
                    .map_err(|e| anyhow!(e))?;
            }
            filter_panel.request_refresh();

            let view_params = match params_panel_for(&layer_info) {
                Some(mut panel) => {
                    for spec in &params {
                        let (name, value) = spec
                            .split_once(':')
                            .ok_or_else(|| anyhow!("expected <name>:<value>, got '{}'", spec))?;
                        if !panel.set_value(name, value) {
                            return Err(anyhow!("layer declares no view parameter '{}'", name));
                        }
                    }
                    tracing::debug!(values = ?panel.values(), "view parameters set");
                    panel.param_string()
                }
                None if !params.is_empty() => {
                    return Err(anyhow!("layer '{}' declares no view parameters", layer));
                }
                None => String::new(),
            };

            let collection = client
                .fetch_features(&layer_info, &extent, &filter_panel.active_filters(), &view_params)
                .await?;

            info!(count = collection.features.len(), layer = %layer_info.name, "features fetched");
            for feature in &collection.features {
                if let Some(id) = &feature.id {
                    println!("-- {}", id);
                }
                for line in display::popup_lines(feature) {
                    println!("{}", line);
                }
                println!();
            }
        }
        Command::Identify { at, extent, size } => {
            let (x, y) = parse_pair(&at).context("parsing click coordinate")?;
            let extent = BoundingBox::parse(&extent)?;
            let (width, height) = parse_size(&size).context("parsing view size")?;

            // Every advertised layer is queryable in the terminal
            // viewer; there is no visibility toggle to honor.
            for layer in &mut layers {
                layer.visible = true;
            }

            let click = ClickQuery {
                x,
                y,
                extent,
                width,
                height,
            };

            match client.identify(&layers, &click).await {
                Some(feature) => {
                    for line in display::popup_lines(&feature) {
                        println!("{}", line);
                    }
                }
                None => println!("No feature at {},{}", x, y),
            }
        }
    }

    Ok(())
}

/// Parse `<attribute>,<operator>,<value>` into its parts. The value
/// may itself contain commas.
fn parse_filter_spec(spec: &str) -> Result<(&str, Operator, &str)> {
    let mut parts = spec.splitn(3, ',');
    let attribute = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("empty filter spec"))?;
    let operator_token = parts
        .next()
        .ok_or_else(|| anyhow!("filter '{}' is missing an operator", spec))?;
    let value = parts
        .next()
        .ok_or_else(|| anyhow!("filter '{}' is missing a value", spec))?;

    let operator = Operator::from_symbol(operator_token)
        .ok_or_else(|| anyhow!("unknown operator '{}'", operator_token))?;

    Ok((attribute, operator, value))
}

fn parse_pair(s: &str) -> Result<(f64, f64)> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| anyhow!("expected two comma-separated numbers, got '{}'", s))?;
    Ok((a.trim().parse()?, b.trim().parse()?))
}

/// Parse `<width>,<height>`; a zero dimension has no pixels to click.
fn parse_size(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once(',')
        .ok_or_else(|| anyhow!("expected <width>,<height>, got '{}'", s))?;
    let width: u32 = w.trim().parse()?;
    let height: u32 = h.trim().parse()?;
    if width == 0 || height == 0 {
        return Err(anyhow!("view size must be positive, got '{}'", s));
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_spec() {
        let (attr, op, value) = parse_filter_spec("name,=,Main St").unwrap();
        assert_eq!(attr, "name");
        assert_eq!(op, Operator::Equal);
        assert_eq!(value, "Main St");
    }

    #[test]
    fn test_parse_filter_spec_value_keeps_commas() {
        let (_, _, value) = parse_filter_spec("name,LIKE,a,b,c").unwrap();
        assert_eq!(value, "a,b,c");
    }

    #[test]
    fn test_parse_filter_spec_rejects_bad_operator() {
        assert!(parse_filter_spec("name,~,x").is_err());
        assert!(parse_filter_spec("name").is_err());
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("10,20").unwrap(), (10.0, 20.0));
        assert!(parse_pair("10").is_err());
    }

    #[test]
    fn test_parse_size_rejects_zero_dimension() {
        assert_eq!(parse_size("1024,768").unwrap(), (1024, 768));
        assert!(parse_size("0,768").is_err());
        assert!(parse_size("1024,0").is_err());
        assert!(parse_size("-1,768").is_err());
    }
}
