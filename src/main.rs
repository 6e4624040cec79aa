//! A messenger that never says who sent the message.
//!
//! Hermes relays messages into Slack channels under the display name
//! "Anonymous", using a token the caller obtained through Hermes' own OAuth
//! callback. It holds no state: tokens are returned to the caller and supplied
//! again with every message.
//!
//! See [router] for the routes on offer.

use config::Config;
use dotenvy::dotenv;
use router::Deps;
use std::{net::SocketAddr, process};
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{error, info, warn};

mod config;
mod de;
mod relay;
mod reply;
mod router;
mod slack;
#[cfg(test)]
mod tests_support;

/// Application entrypoint. Initialises tracing, loads configuration from the
/// environment, binds to 0.0.0.0, and starts the server.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    let config = match Config::from_env() {
        Ok(x) => x,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match TcpListener::bind(addr).await {
        Ok(x) => x,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            process::exit(1);
        }
    };

    server_(listener, config).await;
}

/// Initialise a server without graceful shutdown.
async fn server_(listener: TcpListener, config: Config) {
    // Giving a receiver that will never resolve.
    let (_tx, rx) = oneshot::channel::<()>();
    server(listener, config, rx).await;
}

/// Initialise a server with graceful shutdown via `rx`.
async fn server(listener: TcpListener, config: Config, rx: oneshot::Receiver<()>) {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on {}", addr);
    }

    let deps = Deps::from_config(config);

    axum::serve(listener, router::new(deps))
        .with_graceful_shutdown(async {
            rx.await.ok();
        })
        .await
        .expect("Failed to start server");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn config() -> Config {
        Config::from_lookup(|key| match key {
            "SLACK_CLIENT_ID" => Some("id".to_owned()),
            "SLACK_CLIENT_SECRET" => Some("secret".to_owned()),
            "SLACK_SIGNING_SECRET" => Some("signing".to_owned()),
            "REDIRECT_URI" => Some("https://example.com/slack/oauth/callback".to_owned()),
            _ => None,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_real_greeting() {
        let (tx, rx) = oneshot::channel::<()>();

        // Port 0 requests that the OS assigns us an available port.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        // Move the server into the background so that it's not blocking.
        tokio::spawn(async move { server(listener, config(), rx).await });

        let res = reqwest::Client::new()
            .get(format!("http://127.0.0.1:{}/", port))
            .send()
            .await
            .unwrap();

        tx.send(()).unwrap();

        assert_eq!(res.status().as_u16(), StatusCode::OK.as_u16());
        assert_eq!(res.text().await.unwrap(), router::GREETING);
    }
}
