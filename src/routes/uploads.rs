//! Content-addressed media uploads. Bytes are hashed while the multipart
//! stream is read, so a re-upload of an existing asset is detected by key
//! and answered without writing anything.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt as _;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

use super::{ensure_admin, AppState};
use crate::auth::Auth;
use crate::error::ApiError;
use crate::storage::{self, FileStoreError};

pub struct FolderPolicy {
    pub name: &'static str,
    pub max_bytes: usize,
    pub mimes: &'static [&'static str],
}

const MIB: usize = 1024 * 1024;

pub const FOLDERS: &[FolderPolicy] = &[
    FolderPolicy {
        name: "images",
        max_bytes: 10 * MIB,
        mimes: &["image/png", "image/jpeg", "image/webp", "image/gif"],
    },
    FolderPolicy {
        name: "documents",
        max_bytes: 50 * MIB,
        mimes: &["application/pdf"],
    },
    FolderPolicy {
        name: "videos",
        max_bytes: 100 * MIB,
        mimes: &["video/mp4", "video/webm"],
    },
];

pub fn folder_policy(name: &str) -> Option<&'static FolderPolicy> {
    FOLDERS.iter().find(|f| f.name == name)
}

fn hex_digest(hasher: Sha256) -> String {
    hasher.finalize().iter().map(|b| format!("{:02x}", b)).collect()
}

#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub folder: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadOut {
    pub key: String,
    pub url: String,
    pub mime: String,
    pub size: usize,
    /// True when these exact bytes were already stored under this key.
    pub duplicate: bool,
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/uploads",
    params(
        ("folder" = Option<String>, Query, description = "Target folder: images (default), documents or videos")
    ),
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Stored", body = UploadOut),
        (status = 200, description = "Identical bytes already stored", body = UploadOut),
        (status = 413, description = "Folder size cap exceeded"),
        (status = 415, description = "Type not allowed in this folder")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_file(
    auth: Auth,
    data: web::Data<AppState>,
    query: web::Query<UploadQuery>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    ensure_admin!(auth);

    let folder = query.folder.as_deref().unwrap_or("images");
    let policy = folder_policy(folder)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown upload folder '{folder}'")))?;

    let mut bytes: Option<Vec<u8>> = None;
    let mut hasher = Sha256::new();
    while let Some(mut field) = payload.try_next().await? {
        if field.name() != "file" {
            // Drain unknown fields so the stream stays well-formed
            while field.try_next().await?.is_some() {}
            continue;
        }
        let mut buf = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            if buf.len() + chunk.len() > policy.max_bytes {
                return Err(ApiError::PayloadTooLarge);
            }
            hasher.update(&chunk);
            buf.extend_from_slice(&chunk);
        }
        bytes = Some(buf);
        break;
    }
    let bytes = bytes.ok_or_else(|| ApiError::BadRequest("missing 'file' field".into()))?;
    if bytes.is_empty() {
        return Err(ApiError::BadRequest("empty upload".into()));
    }

    // Sniff the real type; the client-declared content type is ignored
    let kind = infer::get(&bytes).ok_or(ApiError::UnsupportedMediaType)?;
    if !policy.mimes.contains(&kind.mime_type()) {
        return Err(ApiError::UnsupportedMediaType);
    }

    let hash = hex_digest(hasher);
    let key = storage::object_key(folder, &hash, kind.extension());
    let out = |duplicate| UploadOut {
        key: key.clone(),
        url: data.file_store.public_url(&key),
        mime: kind.mime_type().to_string(),
        size: bytes.len(),
        duplicate,
    };
    match data.file_store.save(&key, &bytes).await {
        Ok(()) => {
            metrics::increment_counter!("uploads_stored_total");
            Ok(HttpResponse::Created().json(out(false)))
        }
        Err(FileStoreError::Duplicate) => Ok(HttpResponse::Ok().json(out(true))),
        Err(e) => Err(e.into()),
    }
}

pub async fn get_file(data: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let key = path.into_inner();
    let (bytes, mime) = data.file_store.load(&key).await?;
    Ok(HttpResponse::Ok()
        .content_type(mime)
        .insert_header(("Cache-Control", "public, max-age=31536000, immutable"))
        .body(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_policies_cover_the_three_folders() {
        assert!(folder_policy("images").is_some());
        assert!(folder_policy("documents").is_some());
        assert!(folder_policy("videos").is_some());
        assert!(folder_policy("misc").is_none());
    }

    #[test]
    fn caps_grow_with_media_weight() {
        let img = folder_policy("images").unwrap();
        let doc = folder_policy("documents").unwrap();
        let vid = folder_policy("videos").unwrap();
        assert!(img.max_bytes < doc.max_bytes);
        assert!(doc.max_bytes < vid.max_bytes);
    }

    #[test]
    fn pdf_only_in_documents() {
        assert!(folder_policy("documents").unwrap().mimes.contains(&"application/pdf"));
        assert!(!folder_policy("images").unwrap().mimes.contains(&"application/pdf"));
    }
}
