//! Artifact retrieval endpoints
//!
//! All four handlers share the `/{mode}/<view>/{id}` shape, where `mode` is
//! `id` for accessions and `upload` for uploaded files. File access is blocking
//! and runs on the blocking pool; the handlers only translate results.

use crate::error::ServerResult;
use crate::state::ServerState;
use artifacts::{ArtifactStore, Mode, Pocket, Sequence, StructureStream, Target};
use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Size of the chunks sent to the client while streaming a structure
const STREAM_CHUNK_BYTES: usize = 64 * 1024;

/// Chunks buffered between the reading task and the response body
const STREAM_CHANNEL_DEPTH: usize = 8;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

fn parse_target(mode: &str, id: String) -> ServerResult<Target> {
    let mode: Mode = mode.parse()?;
    Ok(Target::new(mode, id)?)
}

/// Run a blocking artifact operation against the shared store
async fn with_store<T, F>(state: &ServerState, task: F) -> ServerResult<T>
where
    F: FnOnce(&ArtifactStore) -> artifacts::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = state.store.clone();
    Ok(tokio::task::spawn_blocking(move || task(store.as_ref())).await??)
}

/// `GET /{mode}/pdb/{id}`: decompressed structure file
///
/// A missing file is answered with 404 before the body starts. Once streaming
/// has begun, a read error aborts the body; bytes already sent stay sent.
pub async fn get_structure(
    State(state): State<Arc<ServerState>>,
    Path((mode, id)): Path<(String, String)>,
) -> ServerResult<Response> {
    let target = parse_target(&mode, id)?;
    let open_target = target.clone();
    let stream = with_store(&state, move |store| store.open_structure(&open_target)).await?;

    let (tx, mut rx) = mpsc::channel::<Result<Bytes, io::Error>>(STREAM_CHANNEL_DEPTH);
    tokio::task::spawn_blocking(move || pump(stream, target, tx));

    let body = Body::from_stream(futures::stream::poll_fn(move |cx| rx.poll_recv(cx)));
    Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], body).into_response())
}

fn pump(stream: StructureStream, target: Target, tx: mpsc::Sender<Result<Bytes, io::Error>>) {
    let mut out = BufWriter::with_capacity(STREAM_CHUNK_BYTES, ChannelWriter { tx: tx.clone() });
    let copied = stream
        .copy_to(&mut out)
        .map_err(|e| e.to_string())
        .and_then(|bytes| out.flush().map(|()| bytes).map_err(|e| e.to_string()));

    match copied {
        Ok(bytes) => tracing::debug!(%target, bytes, "Structure streamed"),
        Err(err) => {
            tracing::warn!(%target, error = %err, "Structure stream aborted");
            // fails only when the client is already gone
            let _ = tx.blocking_send(Err(io::Error::other(err)));
        }
    }
}

/// Blocking `Write` adapter feeding a response body channel
struct ChannelWriter {
    tx: mpsc::Sender<Result<Bytes, io::Error>>,
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.tx
            .blocking_send(Ok(Bytes::copy_from_slice(buf)))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "client disconnected"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// `GET /{mode}/seq/{id}`: first-chain sequence with conservation scores
pub async fn get_sequence(
    State(state): State<Arc<ServerState>>,
    Path((mode, id)): Path<(String, String)>,
) -> ServerResult<Json<Sequence>> {
    let target = parse_target(&mode, id)?;
    let sequence = with_store(&state, move |store| store.build_sequence(&target)).await?;
    Ok(Json(sequence))
}

/// `GET /{mode}/mmcif/{id}`: legacy mmCIF conversion
#[deprecated(note = "kept for existing clients; use /{mode}/pdb/{id}")]
pub async fn get_mmcif(
    State(state): State<Arc<ServerState>>,
    Path((mode, id)): Path<(String, String)>,
) -> ServerResult<Response> {
    let target = parse_target(&mode, id)?;
    #[allow(deprecated)]
    let text = with_store(&state, move |store| store.convert_to_legacy_format(&target)).await?;
    Ok(([(header::CONTENT_TYPE, TEXT_PLAIN)], text).into_response())
}

/// `GET /{mode}/csv/{id}`: predicted pockets in table order
pub async fn get_pockets(
    State(state): State<Arc<ServerState>>,
    Path((mode, id)): Path<(String, String)>,
) -> ServerResult<Json<Vec<Pocket>>> {
    let target = parse_target(&mode, id)?;
    let pockets = with_store(&state, move |store| store.parse_pocket_table(&target)).await?;
    Ok(Json(pockets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifacts::ErrorKind;

    #[test]
    fn targets_from_path_segments() {
        assert_eq!(
            parse_target("id", "1abc".into()).unwrap(),
            Target::ByAccession("1abc".into())
        );
        assert_eq!(
            parse_target("upload", "u42".into()).unwrap(),
            Target::ByUpload("u42".into())
        );
        assert_eq!(
            parse_target("pdb", "1abc".into()).unwrap_err().error_code(),
            "UNKNOWN_MODE"
        );
        assert_eq!(
            parse_target("upload", "..".into()).unwrap_err().error_code(),
            ErrorKind::InvalidIdentifier.code()
        );
    }

    #[tokio::test]
    async fn channel_writer_reports_closed_receiver() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let err = tokio::task::spawn_blocking(move || ChannelWriter { tx }.write(b"abc"))
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
