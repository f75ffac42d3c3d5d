use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "feedsim")]
#[command(about = "Synthetic market-data feed simulator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a series for a ticker and print it as JSON
    Snapshot {
        /// Ticker symbol (e.g. IBM, AAPL)
        #[arg(short, long, default_value = "IBM")]
        ticker: String,
        /// Chart period: 1D, 1W, 1M, 3M, 6M, 1Y, 2Y
        #[arg(short, long, default_value = "1Y")]
        period: String,
        /// Custom range start date (YYYY-MM-DD); requires --end
        #[arg(long)]
        start: Option<String>,
        /// Custom range end date (YYYY-MM-DD); requires --start
        #[arg(long)]
        end: Option<String>,
    },
    /// Stream live updates for a ticker until interrupted
    Stream {
        /// Ticker symbol (e.g. IBM, AAPL)
        #[arg(short, long, default_value = "IBM")]
        ticker: String,
        /// Chart period: 1D, 1W, 1M, 3M, 6M, 1Y, 2Y
        #[arg(short, long, default_value = "1D")]
        period: String,
    },
    /// List supported instruments
    Tickers,
}

pub async fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Snapshot {
            ticker,
            period,
            start,
            end,
        } => {
            commands::snapshot::run(ticker, period, start, end).await;
        }
        Commands::Stream { ticker, period } => {
            commands::stream::run(ticker, period).await;
        }
        Commands::Tickers => {
            commands::tickers::run();
        }
    }
}
