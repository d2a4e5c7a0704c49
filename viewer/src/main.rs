use anyhow::Result;
use clap::Parser;
use common::predictor::PredictorClient;
use common::ViewerConfig;
use log::{info, warn};
use std::path::PathBuf;
use viewer::charts::{ChartSink, HtmlSink, MemorySink, PngSink};
use viewer::{dispatch, DispatchOutcome, ViewState};

#[derive(Parser)]
#[command(name = "viewer")]
#[command(about = "Fetch a stock prediction and chart it as candlesticks with buy/sell markers")]
struct Cli {
    /// Ticker symbol, AAPL when left empty
    #[arg(short, long, default_value = "")]
    ticker: String,

    /// Prediction model, xgb when not given
    #[arg(short, long)]
    model: Option<String>,

    /// Write the chart as a plotly HTML page
    #[arg(long)]
    html: Option<PathBuf>,

    /// Write the chart as a PNG image
    #[arg(long)]
    png: Option<PathBuf>,

    /// Also print the raw payload
    #[arg(long)]
    raw: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ViewerConfig::from_env();
    info!("Using prediction API at {}", config.api_url);

    let mut sinks: Vec<Box<dyn ChartSink>> = Vec::new();
    if let Some(path) = cli.html {
        sinks.push(Box::new(HtmlSink::new(path)));
    }
    if let Some(path) = cli.png {
        sinks.push(Box::new(PngSink::new(path)));
    }
    if sinks.is_empty() {
        sinks.push(Box::new(MemorySink::default()));
    }

    let mut view = ViewState::new(&config, sinks);
    view.ticker_input = cli.ticker;
    if let Some(model) = cli.model {
        view.models.select(&model);
    }

    let client = PredictorClient::new(&config.api_url);
    let outcome = dispatch(&mut view, &client).await?;

    match outcome {
        DispatchOutcome::Skipped => {
            warn!("Ticker is blank, nothing to predict");
        }
        DispatchOutcome::Rendered => {
            println!("{}", view.metrics);
            if cli.raw {
                println!("\n{}", view.payload);
            }
        }
        DispatchOutcome::Failed(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    }

    Ok(())
}
