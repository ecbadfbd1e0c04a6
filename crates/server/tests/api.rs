//! Integration tests for the artifact endpoints
//!
//! Each test builds the router over its own temporary artifact tree and drives
//! it with `oneshot` requests, so no socket is bound.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use flate2::write::GzEncoder;
use flate2::Compression;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server::config::ServerConfig;
use server::error::ErrorResponse;
use server::state::ServerState;
use tempfile::TempDir;
use tower::ServiceExt;

struct TestServer {
    dir: TempDir,
    app: Router,
}

impl TestServer {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = ServerConfig::default();
        config.data = artifacts::ArtifactDirs::rooted_at(dir.path());
        for (_, path) in config.data.entries() {
            std::fs::create_dir_all(path).expect("artifact dir");
        }
        let app = server::build_router(Arc::new(ServerState::new(config)));
        Self { dir, app }
    }

    fn data(&self, sub: &str) -> std::path::PathBuf {
        self.dir.path().join("data").join(sub)
    }

    async fn get(&self, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = self
            .app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body.to_vec())
    }

    async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = self.get(uri).await;
        (status, serde_json::from_slice(&body).expect("json body"))
    }
}

fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(bytes).unwrap();
    enc.finish().unwrap()
}

fn write(path: &Path, bytes: &[u8]) {
    std::fs::write(path, bytes).unwrap();
}

fn pdb_text(id_code: &str, residues: &[&str]) -> String {
    let mut text = format!("{:<62}{:<4}\n", "HEADER    TEST STRUCTURE", id_code);
    for (i, res) in residues.iter().enumerate() {
        text.push_str(&format!(
            "ATOM  {:>5}  CA  {:>3} A{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}           C\n",
            i + 1,
            res,
            i + 1,
            1.0,
            2.0,
            3.0,
            1.0,
            20.0
        ));
    }
    text.push_str("END\n");
    text
}

#[tokio::test]
async fn sequence_with_conservation_scores() {
    let srv = TestServer::new();
    write(
        &srv.data("pdb").join("pdb1abc.ent.gz"),
        &gzip(pdb_text("1ABC", &["ALA", "CYS", "ASP"]).as_bytes()),
    );
    write(
        &srv.data("csv").join("pdb1abc.ent.gz.hom.gz"),
        &gzip(b"0.1,0.2,0.3"),
    );

    let (status, body) = srv.get_json("/api/id/seq/1abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"code": "A", "score": 0.1},
            {"code": "C", "score": 0.2},
            {"code": "D", "score": 0.3}
        ])
    );
}

#[tokio::test]
async fn sequence_without_conservation_is_unscored() {
    let srv = TestServer::new();
    write(
        &srv.data("pdb").join("pdb1abc.ent.gz"),
        &gzip(pdb_text("1ABC", &["ALA", "CYS", "ASP"]).as_bytes()),
    );

    let (status, body) = srv.get_json("/api/id/seq/1abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"code": "A", "score": null},
            {"code": "C", "score": null},
            {"code": "D", "score": null}
        ])
    );
}

#[tokio::test]
async fn sequence_score_mismatch_is_conflict() {
    let srv = TestServer::new();
    write(
        &srv.data("uploads").join("u1"),
        pdb_text("", &["ALA", "CYS"]).as_bytes(),
    );
    write(
        &srv.data("predictions").join("u1.hom.gz"),
        &gzip(b"0.5,0.5,0.5"),
    );

    let (status, body) = srv.get_json("/api/upload/seq/u1").await;
    assert_eq!(status, StatusCode::CONFLICT);
    let err: ErrorResponse = serde_json::from_value(body).unwrap();
    assert_eq!(err.error.code, "DATA_MISMATCH");
}

#[tokio::test]
async fn unparsable_structure_is_unprocessable() {
    let srv = TestServer::new();
    write(&srv.data("uploads").join("bad"), b"definitely not a structure\n");

    let (status, body) = srv.get_json("/api/upload/seq/bad").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "PARSE_FAILURE");

    let (status, body) = srv.get_json("/api/upload/mmcif/bad").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "PARSE_FAILURE");
}

#[tokio::test]
async fn raw_structure_is_streamed_decompressed() {
    let srv = TestServer::new();
    let mut text = pdb_text("1ABC", &["ALA", "GLY"]);
    // larger than one streaming chunk
    while text.len() < 200 * 1024 {
        text.push_str("REMARK 999 PADDING LINE FOR STREAMING TESTS\n");
    }
    write(
        &srv.data("pdb").join("pdb1abc.ent.gz"),
        &gzip(text.as_bytes()),
    );

    let (status, headers, body) = srv.get("/api/id/pdb/1abc").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
    assert_eq!(body, text.as_bytes());
}

#[tokio::test]
async fn raw_upload_is_passed_through() {
    let srv = TestServer::new();
    let text = pdb_text("", &["SER"]);
    write(&srv.data("uploads").join("plain-upload"), text.as_bytes());

    let (status, _, body) = srv.get("/api/upload/pdb/plain-upload").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, text.as_bytes());
}

#[tokio::test]
async fn missing_structure_is_not_found() {
    let srv = TestServer::new();

    for uri in [
        "/api/id/pdb/9zzz",
        "/api/id/seq/9zzz",
        "/api/id/mmcif/9zzz",
        "/api/id/csv/9zzz",
    ] {
        let (status, body) = srv.get_json(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"]["code"], "NOT_FOUND", "{uri}");
    }
}

#[tokio::test]
async fn legacy_mmcif_conversion() {
    let srv = TestServer::new();
    write(
        &srv.data("pdb").join("pdb2src.ent.gz"),
        &gzip(pdb_text("2SRC", &["MET", "LYS"]).as_bytes()),
    );

    let (status, _, body) = srv.get("/api/id/mmcif/2src").await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body).unwrap();
    assert!(text.starts_with("data_2SRC\n#\nloop_\n"));
    assert!(text.contains("_atom_site.Cartn_x"));
    assert!(text.contains(" LYS A 2 "));
}

#[tokio::test]
async fn pocket_table_for_upload() {
    let srv = TestServer::new();
    write(
        &srv.data("predictions").join("u42_predictions.csv"),
        b"name,score\np1,0.9\np2,0.4\n",
    );

    let (status, body) = srv.get_json("/api/upload/csv/u42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"name": "p1", "score": 0.9},
            {"name": "p2", "score": 0.4}
        ])
    );
}

#[tokio::test]
async fn pocket_table_for_accession() {
    let srv = TestServer::new();
    write(
        &srv.data("csv").join("pdb1abc.ent.gz_predictions.csv"),
        b"name  , rank, probability, residue_ids\npocket1,    1,       0.812, A_10 A_11\n",
    );

    let (status, body) = srv.get_json("/api/id/csv/1abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"name": "pocket1", "rank": 1.0, "probability": 0.812, "residue_ids": "A_10 A_11"}
        ])
    );
}

#[tokio::test]
async fn malformed_pocket_table_returns_no_partial_list() {
    let srv = TestServer::new();
    write(
        &srv.data("predictions").join("u9_predictions.csv"),
        b"name,score\np1,0.9\np2,n/a\n",
    );

    let (status, body) = srv.get_json("/api/upload/csv/u9").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body.get("error").is_some());
}

#[tokio::test]
async fn unknown_mode_and_routes() {
    let srv = TestServer::new();

    let (status, body) = srv.get_json("/api/pdbid/seq/1abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "UNKNOWN_MODE");

    let (status, body) = srv.get_json("/api/id/fasta/1abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn dot_dot_identifier_is_rejected() {
    let srv = TestServer::new();
    let (status, body) = srv.get_json("/api/upload/pdb/..").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_IDENTIFIER");
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let srv = TestServer::new();

    let response = srv
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");

    let (_, headers, _) = srv.get("/health").await;
    let generated = headers["x-request-id"].to_str().unwrap();
    assert_eq!(generated.len(), 36);
}

#[tokio::test]
async fn readiness_reflects_directories() {
    let srv = TestServer::new();
    let (status, body) = srv.get_json("/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");

    std::fs::remove_dir_all(srv.data("uploads")).unwrap();
    let (status, body) = srv.get_json("/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["components"]["uploads_dir"], "missing");
    assert_eq!(body["components"]["pdb_data_path"], "ready");
}

#[tokio::test]
async fn root_lists_endpoints() {
    let srv = TestServer::new();
    let (status, body) = srv.get_json("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["endpoints"]
        .as_array()
        .unwrap()
        .contains(&json!("/api/{mode}/seq/{id}")));
}
