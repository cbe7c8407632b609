use crate::config::Config;
use crate::endpoints::PanelServer;
use crate::geometry::Projection;
use crate::models::ClickEvent;
use crate::panel::SharedPanel;
use crate::query::orchestrator::{ClickOutcome, wire};
use crate::query::{HttpRelayClient, WmsSource};
use crate::render::TableRenderer;
use crate::render::terminal::payload_to_terminal;
use crate::traits::FeatureInfoSource;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;

/// Initial map view of the hosting page: centred on the contiguous US.
const DEFAULT_CENTER: (f64, f64) = (-98.5, 39.8);
const DEFAULT_ZOOM: u8 = 4;

#[derive(Parser, Debug)]
#[command(name = "featureyolo", version, about = "Query WMS feature info through a same-origin relay")]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Click once and print what the panel would show
    Query(QueryArgs),
    /// Serve the click/panel endpoints
    Serve,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Click position in projection units (needs --y)
    #[arg(long, requires = "y", conflicts_with_all = ["lon", "lat"], allow_hyphen_values = true)]
    pub x: Option<f64>,
    #[arg(long, requires = "x", allow_hyphen_values = true)]
    pub y: Option<f64>,

    /// Click position in degrees, converted into the projection (needs --lat)
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// View resolution in projection units per pixel; derived from --zoom when absent
    #[arg(long)]
    pub resolution: Option<f64>,

    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: u8,

    #[arg(long, default_value = "EPSG:3857")]
    pub projection: Projection,

    /// Print the panel HTML instead of a table
    #[arg(long)]
    pub html: bool,
}

impl QueryArgs {
    pub fn click(&self) -> ClickEvent {
        let mut click = match (self.x, self.y, self.lon, self.lat) {
            (Some(x), Some(y), _, _) => {
                let base = ClickEvent::at_lon_lat(0.0, 0.0, self.zoom, self.projection);
                ClickEvent::new((x, y), base.resolution, self.projection)
            }
            (_, _, Some(lon), Some(lat)) => {
                ClickEvent::at_lon_lat(lon, lat, self.zoom, self.projection)
            }
            _ => ClickEvent::at_lon_lat(
                DEFAULT_CENTER.0,
                DEFAULT_CENTER.1,
                self.zoom,
                self.projection,
            ),
        };
        if let Some(resolution) = self.resolution {
            click.resolution = resolution;
        }
        click
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Query(args) => query(&cli.config, &args).await,
        Command::Serve => PanelServer::new(cli.config)?.start().await,
    }
}

async fn query(config: &Config, args: &QueryArgs) -> anyhow::Result<()> {
    let panel = SharedPanel::new();
    let source = config
        .layer()?
        .map(|layer| Arc::new(WmsSource::from_config(&layer)) as Arc<dyn FeatureInfoSource>);
    let relay = Arc::new(HttpRelayClient::new(&config.relay()?)?);
    let renderer = TableRenderer::new(config.columns);

    let Some(orchestrator) = wire(source, relay, Arc::new(panel.clone()), renderer) else {
        return Ok(());
    };

    let outcome = orchestrator.handle_click(&args.click()).await;
    if args.html {
        println!("{}", panel.html());
        return Ok(());
    }

    match outcome {
        ClickOutcome::Rendered(payload) => {
            println!("{}", payload_to_terminal(&payload, config.columns))
        }
        ClickOutcome::Failed(err) => eprintln!("⚠️ {}", err),
        ClickOutcome::Superseded => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("valid arguments")
    }

    #[test]
    fn test_default_query_clicks_the_initial_view_centre() {
        let cli = parse(&["featureyolo", "query"]);
        let Command::Query(args) = cli.command else {
            panic!("expected query");
        };
        let click = args.click();
        let expected = ClickEvent::at_lon_lat(-98.5, 39.8, 4, Projection::WebMercator);
        assert_eq!(click, expected);
    }

    #[test]
    fn test_explicit_coordinates_and_resolution() {
        let cli = parse(&[
            "featureyolo",
            "--wms-layer",
            "ne:countries",
            "query",
            "--x",
            "-1000.5",
            "--y",
            "2000",
            "--resolution",
            "152.87",
        ]);
        assert_eq!(cli.config.wms_layer, "ne:countries");
        let Command::Query(args) = cli.command else {
            panic!("expected query");
        };
        let click = args.click();
        assert_eq!(click.coordinate.x, -1000.5);
        assert_eq!(click.coordinate.y, 2000.0);
        assert_eq!(click.resolution, 152.87);
    }

    #[test]
    fn test_lon_lat_in_geographic_projection() {
        let cli = parse(&[
            "featureyolo",
            "query",
            "--lon",
            "5.5",
            "--lat",
            "-12",
            "--projection",
            "EPSG:4326",
        ]);
        let Command::Query(args) = cli.command else {
            panic!("expected query");
        };
        let click = args.click();
        assert_eq!(click.projection, Projection::Geographic);
        assert_eq!((click.coordinate.x, click.coordinate.y), (5.5, -12.0));
    }

    #[test]
    fn test_x_without_y_is_rejected() {
        assert!(Cli::try_parse_from(["featureyolo", "query", "--x", "1"]).is_err());
    }

    #[test]
    fn test_columns_flag() {
        let cli = parse(&["featureyolo", "--columns", "union", "serve"]);
        assert_eq!(cli.config.columns, crate::render::ColumnStrategy::Union);
        assert!(matches!(cli.command, Command::Serve));
    }
}
