use clap::Parser;
use filegate::config::Config;
use filegate::server::Server;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "filegate", version, about = "Serve a directory over HTTP/1.1")]
struct Args {
    /// The IP address of the HTTP server
    #[arg(short = 'i', long = "ipaddress")]
    ip_address: Option<String>,

    /// The port the HTTP server listens on
    #[arg(short, long)]
    port: Option<u16>,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to serve
    #[arg(short, long)]
    root: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::load(),
        };

        if self.ip_address.is_some() || self.port.is_some() {
            let (default_ip, default_port) = cfg
                .server
                .listen_addr
                .rsplit_once(':')
                .map(|(ip, port)| (ip.to_string(), port.to_string()))
                .unwrap_or_else(|| ("127.0.0.1".to_string(), "8080".to_string()));

            let ip = self.ip_address.unwrap_or(default_ip);
            let port = self.port.map(|p| p.to_string()).unwrap_or(default_port);
            cfg.server.listen_addr = format!("{ip}:{port}");
        }

        if let Some(root) = self.root {
            cfg.server.root = root;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Args::parse().into_config()?;
    let server = Server::bind(&cfg).await?;

    server
        .run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutdown signal received");
        })
        .await
}
