use std::path::PathBuf;

use base64::Engine;
use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "buho-cli")]
#[command(about = "Command-line client for the Buho API proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Bearer token forwarded to the Buho API.
    #[arg(short, long, env = "BUHO_TOKEN")]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the proxy is up
    Health,
    /// Send a text message
    SendText {
        #[arg(short, long)]
        number: String,
        #[arg(short, long)]
        message: String,
    },
    /// Send a PDF document
    SendPdf {
        #[arg(short, long)]
        number: String,
        #[arg(short, long, default_value = "")]
        message: String,
        /// Local PDF, base64-encoded before sending
        #[arg(short, long, required_unless_present = "data")]
        file: Option<PathBuf>,
        /// Already-encoded file contents
        #[arg(long, conflicts_with = "file")]
        data: Option<String>,
        /// File name shown to the recipient; defaults to the local file name
        #[arg(long)]
        name: Option<String>,
    },
    /// Send an image, video or other media by link
    SendMedia {
        #[arg(short, long)]
        number: String,
        #[arg(long, default_value = "image")]
        media: String,
        #[arg(short, long, default_value = "")]
        caption: String,
        #[arg(short, long)]
        link: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(token) = &cli.token {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
    }

    let (path, body) = match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url)).send().await?;
            return print_response(res).await;
        }
        Commands::SendText { number, message } => (
            "/api/mensaje/enviar-texto",
            json!({ "numero": number, "mensaje": message }),
        ),
        Commands::SendPdf { number, message, file, data, name } => {
            let archivo = match (data, &file) {
                (Some(data), _) => data,
                (None, Some(path)) => {
                    base64::engine::general_purpose::STANDARD.encode(std::fs::read(path)?)
                }
                (None, None) => return Err("either --file or --data is required".into()),
            };
            let nombre = name
                .or_else(|| {
                    file.as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().into_owned())
                })
                .unwrap_or_else(|| "document.pdf".to_string());
            (
                "/api/mensaje/enviar/pdf",
                json!({
                    "numero": number,
                    "mensaje": message,
                    "archivo": archivo,
                    "nombreArchivo": nombre,
                }),
            )
        }
        Commands::SendMedia { number, media, caption, link } => (
            "/api/mensaje/enviar-medios",
            json!({
                "numero": number,
                "media": media,
                "caption": caption,
                "enlace": link,
            }),
        ),
    };

    let res = client
        .post(format!("{}{}", cli.url, path))
        .headers(headers)
        .json(&body)
        .send()
        .await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
