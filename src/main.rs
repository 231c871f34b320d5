use clap::{Parser, Subcommand};
use std::path::PathBuf;

use finket::api::{ServerConfig, SimulateArgs, run_http_server, simulate_report};

#[derive(Parser, Debug)]
#[command(
    name = "finket",
    about = "Financial-education dashboard with a savings and investment simulator"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the dashboard and its JSON API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
        #[arg(
            long,
            default_value = "assets",
            help = "Directory holding the background and logo images"
        )]
        assets_dir: PathBuf,
        #[arg(long, help = "Content catalog JSON replacing the built-in one")]
        catalog: Option<PathBuf>,
    },
    /// Run one savings projection and print it
    Simulate {
        #[command(flatten)]
        args: SimulateArgs,
        #[arg(long, help = "Print the API JSON body instead of a table")]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve {
            port,
            assets_dir,
            catalog,
        } => {
            let config = ServerConfig {
                port,
                assets_dir,
                catalog_path: catalog,
            };
            if let Err(e) = run_http_server(config).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Simulate { args, json } => match simulate_report(args, json) {
            Ok(report) => print!("{report}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
    }
}
