use crate::banner::{ENTRY, PROMPT};
use crate::commands::{CmdCtx, process_command};
use crate::error::{AppResult, InfraError};
use crate::renderer::Color;
use crate::renderer::ansi::paint;
use crate::state::session::{Protocol, Session};
use crate::Registry;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

const IAC: u8 = 255;
const SB: u8 = 250;
const SE: u8 = 240;
const WILL: u8 = 251;
const DONT: u8 = 254;

/// Longest accepted input line. Longer lines are discarded unread and answered with an error.
const MAX_LINE: usize = 4096;

/// Run the telnet server
pub async fn serve(addr: std::net::SocketAddr, registry: Arc<Registry>) -> AppResult<()> {
    let listener = TcpListener::bind(&addr).await.map_err(InfraError::from)?;
    tracing::info!(%addr, "profiles server TCP (telnet) listening");
    serve_listener(listener, registry).await
}

/// Accept loop on an already bound listener.
pub async fn serve_listener(listener: TcpListener, registry: Arc<Registry>) -> AppResult<()> {
    loop {
        match listener.accept().await {
            Ok((stream, peer)) => {
                tracing::info!(%peer, "client connected");

                let registry = registry.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, registry).await {
                        tracing::error!(%peer, error=%e, "connection error");
                    }
                    tracing::info!(%peer, "client disconnected");
                });
            }
            Err(e) => {
                tracing::error!(error=%e, "failed to accept connection");
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            }
        }
    }
}

async fn handle_connection(stream: TcpStream, registry: Arc<Registry>) -> AppResult<()> {
    let (read_half, mut writer) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let sess = Arc::new(RwLock::new(Session::new(Protocol::Telnet)));
    let ctx = Arc::new(CmdCtx::new(registry.clone(), sess.clone()));

    send(&mut writer, ENTRY).await?;
    send(&mut writer, PROMPT).await?;

    let result = read_loop(&mut reader, &mut writer, ctx).await;
    cleanup(&sess, &registry);
    result
}

async fn read_loop<R, W>(reader: &mut R, writer: &mut W, ctx: Arc<CmdCtx>) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        let n = (&mut *reader).take(MAX_LINE as u64 + 1).read_until(b'\n', &mut buf).await?;
        if n == 0 {
            break; // disconnect
        }
        if buf.len() > MAX_LINE && buf.last() != Some(&b'\n') {
            tracing::debug!(limit = MAX_LINE, "input line too long, discarding");
            skip_line(reader).await?;
            send(writer, &format!("{}\n", paint("Input line too long.", Color::Red))).await?;
            send(writer, PROMPT).await?;
            continue;
        }

        let line = String::from_utf8_lossy(&strip_telnet(&buf)).into_owned();
        let raw = line.trim();
        if raw.is_empty() {
            send(writer, PROMPT).await?;
            continue;
        }

        match process_command(raw, ctx.clone()).await {
            Ok(out) => {
                send(writer, &out.message).await?;
                if out.disconnect {
                    break;
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "command failed");
                send(writer, &format!("{}\n", paint(&e.user_message(), Color::Red))).await?;
            }
        }
        send(writer, PROMPT).await?;
    }
    Ok(())
}

// Consume input up to and including the next '\n' without keeping it
async fn skip_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> AppResult<()> {
    loop {
        let chunk = reader.fill_buf().await?;
        if chunk.is_empty() {
            return Ok(());
        }
        match chunk.iter().position(|&b| b == b'\n') {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(());
            }
            None => {
                let len = chunk.len();
                reader.consume(len);
            }
        }
    }
}

fn cleanup(sess: &RwLock<Session>, registry: &Registry) {
    let Some(user) = sess.read().get_user() else {
        return;
    };
    registry.set_online(&user, false);
}

async fn send<W: AsyncWrite + Unpin>(writer: &mut W, s: &str) -> AppResult<()> {
    writer.write_all(&to_crlf(s.as_bytes())).await?;
    writer.flush().await?;
    Ok(())
}

/// Normalizes bare '\n' to "\r\n".
fn to_crlf(src: &[u8]) -> Vec<u8> {
    let mut dst = Vec::with_capacity(src.len() + 8);
    let mut prev = 0u8;
    for &b in src {
        if b == b'\n' && prev != b'\r' {
            dst.push(b'\r');
        }
        dst.push(b);
        prev = b;
    }
    dst
}

/// Drops telnet IAC command sequences (option negotiation, subnegotiation) from input.
fn strip_telnet(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    let mut i = 0;
    while i < src.len() {
        if src[i] != IAC {
            out.push(src[i]);
            i += 1;
            continue;
        }

        match src.get(i + 1).copied() {
            // escaped 0xFF data byte
            Some(IAC) => {
                out.push(IAC);
                i += 2;
            }
            Some(WILL..=DONT) => i += 3,
            Some(SB) => {
                // skip to IAC SE
                let mut j = i + 2;
                while j + 1 < src.len() && !(src[j] == IAC && src[j + 1] == SE) {
                    j += 1;
                }
                i = j + 2;
            }
            Some(_) => i += 2,
            None => i += 1,
        }
    }
    out
}
