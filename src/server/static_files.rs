//! Files under `/public`: scripts, styles, sounds and background media.
//! Browsers seek inside videos with `Range` requests, so single byte ranges
//! are honoured; multi-range or non-byte requests get the whole file. Bodies
//! are streamed from disk, only the requested window is ever read.

use std::io::SeekFrom;
use std::path::{Component, Path, PathBuf};

use axum::body::Body;
use axum::extract::{Path as UrlPath, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::server::AppState;

pub async fn serve_public(
    State(state): State<AppState>,
    UrlPath(requested): UrlPath<String>,
    headers: HeaderMap,
) -> Response {
    let Some(path) = resolve(&state.public_dir, &requested) else {
        return not_found();
    };

    let (mut file, total) = match open_file(&path).await {
        Ok(opened) => opened,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "static file not served");
            return not_found();
        }
    };

    let content_type = HeaderValue::from_static(content_type_for(&path));

    let range = headers
        .get(header::RANGE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| value.trim_start().starts_with("bytes=") && !value.contains(','))
        .map(|value| parse_range(value, total));

    match range {
        Some(Some((start, end))) => {
            if let Err(err) = file.seek(SeekFrom::Start(start)).await {
                tracing::warn!(path = %path.display(), error = %err, "seek failed");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            let len = end - start + 1;
            let body = Body::from_stream(ReaderStream::new(file.take(len)));
            (
                StatusCode::PARTIAL_CONTENT,
                [
                    (header::CONTENT_TYPE, content_type),
                    (header::ACCEPT_RANGES, HeaderValue::from_static("bytes")),
                    (header::CONTENT_LENGTH, HeaderValue::from(len)),
                ],
                [(header::CONTENT_RANGE, format!("bytes {start}-{end}/{total}"))],
                body,
            )
                .into_response()
        }
        Some(None) => (
            StatusCode::RANGE_NOT_SATISFIABLE,
            [(header::CONTENT_RANGE, format!("bytes */{total}"))],
        )
            .into_response(),
        None => (
            [
                (header::CONTENT_TYPE, content_type),
                (header::ACCEPT_RANGES, HeaderValue::from_static("bytes")),
                (header::CONTENT_LENGTH, HeaderValue::from(total)),
            ],
            Body::from_stream(ReaderStream::new(file)),
        )
            .into_response(),
    }
}

/// Open a regular file and report its length. Directories count as missing.
async fn open_file(path: &Path) -> std::io::Result<(File, u64)> {
    let file = File::open(path).await?;
    let metadata = file.metadata().await?;
    if !metadata.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "not a regular file",
        ));
    }
    Ok((file, metadata.len()))
}

/// Join a request path onto `root`, refusing anything that could climb out of
/// it (`..`, absolute paths, drive prefixes).
fn resolve(root: &Path, requested: &str) -> Option<PathBuf> {
    let relative = Path::new(requested);
    let mut resolved = root.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}

/// Parse a single `bytes=` range into inclusive offsets. Returns `None` when
/// the range cannot be satisfied for a file of `total` bytes.
fn parse_range(value: &str, total: u64) -> Option<(u64, u64)> {
    let spec = value.trim().strip_prefix("bytes=")?;
    if spec.contains(',') || total == 0 {
        return None;
    }
    let (start, end) = spec.split_once('-')?;
    let (start, end) = match (start.trim(), end.trim()) {
        ("", suffix) => {
            let len: u64 = suffix.parse().ok()?;
            if len == 0 {
                return None;
            }
            (total.saturating_sub(len), total - 1)
        }
        (start, "") => (start.parse().ok()?, total - 1),
        (start, end) => {
            let end: u64 = end.parse().ok()?;
            (start.parse().ok()?, end.min(total - 1))
        }
    };
    (start <= end && start < total).then_some((start, end))
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "svg" => "image/svg+xml",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "flv" => "video/x-flv",
        "mp3" => "audio/mpeg",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        _ => "application/octet-stream",
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_rejects_escapes() {
        let root = Path::new("/srv/public");

        assert_eq!(
            resolve(root, "bkgs/River_Fire.mov"),
            Some(PathBuf::from("/srv/public/bkgs/River_Fire.mov"))
        );
        assert_eq!(resolve(root, "../settings.db"), None);
        assert_eq!(resolve(root, "bkgs/../../etc/passwd"), None);
        assert_eq!(resolve(root, "/etc/passwd"), None);
    }

    #[test]
    fn parse_range_forms() {
        assert_eq!(parse_range("bytes=0-9", 100), Some((0, 9)));
        assert_eq!(parse_range("bytes=90-", 100), Some((90, 99)));
        assert_eq!(parse_range("bytes=-10", 100), Some((90, 99)));
        assert_eq!(parse_range("bytes=50-500", 100), Some((50, 99)));
        assert_eq!(parse_range("bytes=100-", 100), None);
        assert_eq!(parse_range("bytes=5-2", 100), None);
        assert_eq!(parse_range("bytes=0-1,4-5", 100), None);
        assert_eq!(parse_range("items=0-1", 100), None);
    }

    #[tokio::test]
    async fn directories_are_not_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("bkgs")).unwrap();
        std::fs::write(dir.path().join("style.css"), "body {}").unwrap();

        let err = open_file(&dir.path().join("bkgs")).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);

        let (_, len) = open_file(&dir.path().join("style.css")).await.unwrap();
        assert_eq!(len, 7);
    }

    #[test]
    fn content_types_cover_media_tables() {
        assert_eq!(content_type_for(Path::new("a.MOV")), "video/quicktime");
        assert_eq!(content_type_for(Path::new("a.webp")), "image/webp");
        assert_eq!(content_type_for(Path::new("fire.mp3")), "audio/mpeg");
        assert_eq!(content_type_for(Path::new("noext")), "application/octet-stream");
    }
}
