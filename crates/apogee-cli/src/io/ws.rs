// crates/apogee-cli/src/io/ws.rs

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};

use apogee_core::error::{ApogeeError, Result};
use apogee_core::Link;

/// What the socket tasks report back to the session loop.
#[derive(Debug)]
pub enum WsEvent {
    Opened(WsLink),
    Text(String),
    /// Clean close, read error or failed dial. Carries a reason when known.
    Closed(Option<String>),
}

/// Hands outbound text to the writer task of the live socket.
#[derive(Debug)]
pub struct WsLink {
    tx: mpsc::UnboundedSender<String>,
}

impl Link for WsLink {
    fn send_text(&mut self, payload: &str) -> Result<()> {
        self.tx
            .send(payload.to_string())
            .map_err(|_| ApogeeError::Link("socket writer has shut down".into()))
    }
}

/// Dials `url` in the background. Exactly one `Closed` is reported per dial,
/// preceded by `Opened` and any text frames if the dial succeeded. A dial
/// still pending after `limit` counts as failed.
pub fn spawn_dial(url: String, limit: Duration, events: mpsc::UnboundedSender<WsEvent>) {
    tokio::spawn(async move {
        match tokio::time::timeout(limit, connect_async(url.as_str())).await {
            Ok(Ok((stream, _))) => pump(stream, events).await,
            Ok(Err(e)) => {
                warn!(%url, error = %e, "connect failed");
                let _ = events.send(WsEvent::Closed(Some(e.to_string())));
            }
            Err(_) => {
                let reason = format!("dial timed out after {} ms", limit.as_millis());
                warn!(%url, %reason, "connect failed");
                let _ = events.send(WsEvent::Closed(Some(reason)));
            }
        }
    });
}

async fn pump(
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    events: mpsc::UnboundedSender<WsEvent>,
) {
    let (mut write, mut read) = stream.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = write.send(Message::Text(msg)).await {
                warn!(error = %e, "write failed");
                break;
            }
        }
    });

    if events.send(WsEvent::Opened(WsLink { tx })).is_err() {
        writer.abort();
        return;
    }

    let reason = loop {
        match read.next().await {
            Some(Ok(Message::Text(text))) => {
                if events.send(WsEvent::Text(text)).is_err() {
                    break None;
                }
            }
            Some(Ok(Message::Close(frame))) => break frame.map(|f| f.reason.to_string()),
            Some(Ok(other)) => debug!(?other, "ignoring non-text frame"),
            Some(Err(e)) => break Some(e.to_string()),
            None => break None,
        }
    };

    writer.abort();
    let _ = events.send(WsEvent::Closed(reason));
}
