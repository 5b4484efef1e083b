//! Line-oriented TCP chat service.
//!
//! Every connection gets its own [`ChatSession`]. The client sends one
//! utterance per line (UTF-8, `\n` terminated) and receives one answer line
//! per non-blank utterance. Blank lines are ignored. All connections share a
//! single read-only [`Responder`].
//!
//! ```text
//! $ nc 127.0.0.1 8050
//! Hi!
//! hello there
//! bye
//! goodbye
//! ```

use std::future::Future;
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::config::ServerConfig;
use crate::error::Result;
use crate::responder::Responder;
use crate::session::ChatSession;

/// Bind a listener on `config.bind:config.port`.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let listener = TcpListener::bind(config.address()).await?;
    info!("Listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Serve connections until the process ends.
pub async fn serve(
    listener: TcpListener,
    responder: Arc<Responder>,
    session_capacity: usize,
) -> Result<()> {
    serve_until(listener, responder, session_capacity, std::future::pending()).await
}

/// Serve connections until `shutdown` resolves.
///
/// Connections still open at shutdown are left to finish on their own tasks.
pub async fn serve_until<F>(
    listener: TcpListener,
    responder: Arc<Responder>,
    session_capacity: usize,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutting down listener");
                return Ok(());
            }
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(accepted) => accepted,
                    Err(e) => {
                        // Per-connection accept failures (e.g. EMFILE) must not stop the server.
                        warn!("Failed to accept connection: {e}");
                        continue;
                    }
                };
                debug!("Accepted connection from {peer}");

                let responder = Arc::clone(&responder);
                tokio::spawn(async move {
                    match handle_connection(stream, &responder, session_capacity).await {
                        Ok(turns) => debug!("Connection from {peer} closed after {turns} turns"),
                        Err(e) => warn!("Connection from {peer} failed: {e}"),
                    }
                });
            }
        }
    }
}

/// Answer lines from one client until it disconnects. Returns the number of
/// turns in the session at close.
async fn handle_connection(
    stream: TcpStream,
    responder: &Responder,
    session_capacity: usize,
) -> Result<usize> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();
    let mut session = ChatSession::new(session_capacity);

    while let Some(line) = lines.next_line().await? {
        let Some(reply) = session.exchange(responder, &line) else {
            continue;
        };
        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(session.len())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received SIGTERM");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResponderConfig;
    use crate::corpus::Corpus;
    use tokio::sync::oneshot;

    fn responder() -> Arc<Responder> {
        let corpus = Corpus::from_pairs([
            ("hi", "hello there"),
            ("hi there", "hello there"),
            ("bye", "goodbye"),
            ("see you", "goodbye"),
        ]);
        Arc::new(Responder::train(&corpus, &ResponderConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_serve_answers_each_line() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();
        let server = tokio::spawn(serve_until(listener, responder(), 200, async move {
            let _ = stopped.await;
        }));

        let stream = TcpStream::connect(addr).await.unwrap();
        let (reader, mut writer) = stream.into_split();
        let mut lines = BufReader::new(reader).lines();

        writer.write_all(b"Hi!\n\n   \nBYE\n").await.unwrap();
        assert_eq!(lines.next_line().await.unwrap().unwrap(), "hello there");
        assert_eq!(lines.next_line().await.unwrap().unwrap(), "goodbye");

        drop(writer);
        assert_eq!(lines.next_line().await.unwrap(), None);

        stop.send(()).unwrap();
        server.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_connections_are_independent() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, responder(), 200));

        let mut clients = Vec::new();
        for text in ["see you\n", "hi there\n"] {
            let stream = TcpStream::connect(addr).await.unwrap();
            let (reader, mut writer) = stream.into_split();
            writer.write_all(text.as_bytes()).await.unwrap();
            clients.push((BufReader::new(reader).lines(), writer));
        }

        assert_eq!(
            clients[0].0.next_line().await.unwrap().unwrap(),
            "goodbye"
        );
        assert_eq!(
            clients[1].0.next_line().await.unwrap().unwrap(),
            "hello there"
        );
    }
}
