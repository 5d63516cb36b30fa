use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use todolist::connector::api::{Container, ContainerConfig, Router};
use todolist::connector::http;
use todolist::{Commands, DEFAULT_MAX_UNFINISHED};

#[derive(Parser)]
#[command(name = "todolist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, default_value = "~/.todolist")]
    data_dir: String,

    /// Keep todos in memory only; nothing is written to the data directory
    #[arg(long, global = true)]
    memory_storage: bool,

    /// Maximum number of unfinished todos
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_UNFINISHED)]
    max_unfinished: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let data_dir = expand_tilde(&cli.data_dir);
    if !cli.memory_storage {
        std::fs::create_dir_all(&data_dir)?;
    }

    let container = Container::new(ContainerConfig {
        data_dir,
        memory_storage: cli.memory_storage,
        max_unfinished: cli.max_unfinished,
    })?;

    match cli.command {
        Commands::Serve { port, public } => {
            let ip = if public {
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            } else {
                IpAddr::V4(Ipv4Addr::LOCALHOST)
            };
            if container.memory_storage() {
                info!("Serving from in-memory storage; todos are lost on exit");
            } else {
                info!("Serving from data directory {}", container.data_dir());
            }
            http::serve(container.todo_service(), SocketAddr::new(ip, port)).await?;
        }
        command => {
            let router = Router::new(&container);
            let output = router.route(command).await?;
            println!("{}", output);
        }
    }

    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
