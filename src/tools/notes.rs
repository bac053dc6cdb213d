//! Active-file, vault-file, and directory tools.

use super::args::{ContentArgs, DirectoryArgs, PatchArgs, PathArgs, PathContentArgs, PathPatchArgs, VaultArgs};
use super::router::{ToolRouter, require_non_empty};
use super::{ToolResponse, encode_component};
use crate::dispatch::{DispatchPayload, DispatchRequest};
use crate::endpoint::ports::EndpointStoreRepository;
use mockable::Clock;
use serde_json::{Value, json};

const ACTIVE_PATH: &str = "/active/";
const PLAIN_TEXT: &str = "text/plain";

fn vault_path(path: &str) -> String {
    format!("/vault/{}", encode_component(path))
}

fn directory_path(path: &str) -> String {
    if path.is_empty() {
        "/vault/".to_owned()
    } else {
        format!("/vault/{}/", encode_component(path))
    }
}

/// Extracts the entry list from a directory listing.
///
/// The remote answers `{"files": [...]}`; a bare array is accepted as well.
fn listing_entries(payload: DispatchPayload) -> (Value, usize) {
    let value = payload.into_value();
    let entries = match value {
        Value::Object(mut fields) => fields
            .remove("files")
            .unwrap_or_else(|| Value::Object(fields)),
        other => other,
    };
    let count = entries.as_array().map_or(0, Vec::len);
    (entries, count)
}

fn text_request(request: DispatchRequest, content: String, vault: Option<String>) -> DispatchRequest {
    request
        .with_text(content)
        .with_header("Content-Type", PLAIN_TEXT)
        .on_endpoint(vault)
}

impl<R, C> ToolRouter<R, C>
where
    R: EndpointStoreRepository,
    C: Clock + Send + Sync,
{
    pub(super) async fn get_active_file(&self, args: VaultArgs) -> ToolResponse {
        let request = DispatchRequest::get(ACTIVE_PATH).on_endpoint(args.vault);
        match self.send(request, "Error retrieving active file").await {
            Ok(payload) => ToolResponse::success(payload.to_display_string()),
            Err(response) => response,
        }
    }

    pub(super) async fn append_to_active_file(&self, args: ContentArgs) -> ToolResponse {
        let request = text_request(DispatchRequest::post(ACTIVE_PATH), args.content, args.vault);
        match self.send(request, "Error appending to active file").await {
            Ok(_) => ToolResponse::success("Content successfully appended to active file"),
            Err(response) => response,
        }
    }

    pub(super) async fn replace_active_file(&self, args: ContentArgs) -> ToolResponse {
        let request = text_request(DispatchRequest::put(ACTIVE_PATH), args.content, args.vault);
        match self.send(request, "Error replacing active file").await {
            Ok(_) => ToolResponse::success("Active file content successfully replaced"),
            Err(response) => response,
        }
    }

    pub(super) async fn patch_active_file(&self, args: PatchArgs) -> ToolResponse {
        const ACTION: &str = "Error patching active file";
        let fetch = DispatchRequest::get(ACTIVE_PATH).on_endpoint(args.vault.clone());
        let current = match self.send(fetch, ACTION).await {
            Ok(payload) => payload.to_display_string(),
            Err(response) => return response,
        };

        let patched = args.patch.apply(&current);
        let store = text_request(DispatchRequest::put(ACTIVE_PATH), patched, args.vault);
        match self.send(store, ACTION).await {
            Ok(_) => ToolResponse::success("Active file successfully patched"),
            Err(response) => response,
        }
    }

    pub(super) async fn delete_active_file(&self, args: VaultArgs) -> ToolResponse {
        let request = DispatchRequest::delete(ACTIVE_PATH).on_endpoint(args.vault);
        match self.send(request, "Error deleting active file").await {
            Ok(_) => ToolResponse::success("Active file successfully deleted"),
            Err(response) => response,
        }
    }

    pub(super) async fn get_file(&self, args: PathArgs) -> ToolResponse {
        if let Err(response) = require_non_empty("get_file", "path", &args.path) {
            return response;
        }
        let request = DispatchRequest::get(vault_path(&args.path)).on_endpoint(args.vault);
        match self.send(request, "Error getting file").await {
            Ok(payload) => ToolResponse::success(payload.to_display_string()),
            Err(response) => response,
        }
    }

    pub(super) async fn create_file(&self, args: PathContentArgs) -> ToolResponse {
        if let Err(response) = require_non_empty("create_file", "path", &args.path) {
            return response;
        }
        let request = text_request(
            DispatchRequest::put(vault_path(&args.path)),
            args.content,
            args.vault,
        );
        match self.send(request, "Error creating file").await {
            Ok(_) => ToolResponse::success(format!("Successfully created file: {}", args.path)),
            Err(response) => response,
        }
    }

    pub(super) async fn append_to_file(&self, args: PathContentArgs) -> ToolResponse {
        let checked = require_non_empty("append_to_file", "path", &args.path)
            .and_then(|()| require_non_empty("append_to_file", "content", &args.content));
        if let Err(response) = checked {
            return response;
        }
        let request = text_request(
            DispatchRequest::post(vault_path(&args.path)),
            args.content,
            args.vault,
        );
        match self.send(request, "Error appending to file").await {
            Ok(_) => ToolResponse::success(format!(
                "Successfully appended content to file: {}",
                args.path
            )),
            Err(response) => response,
        }
    }

    pub(super) async fn replace_file(&self, args: PathContentArgs) -> ToolResponse {
        if let Err(response) = require_non_empty("replace_file", "path", &args.path) {
            return response;
        }
        let request = text_request(
            DispatchRequest::put(vault_path(&args.path)),
            args.content,
            args.vault,
        );
        match self.send(request, "Error replacing file content").await {
            Ok(_) => ToolResponse::success(format!(
                "Successfully replaced content in file: {}",
                args.path
            )),
            Err(response) => response,
        }
    }

    pub(super) async fn patch_file(&self, args: PathPatchArgs) -> ToolResponse {
        const ACTION: &str = "Error patching file";
        if let Err(response) = require_non_empty("patch_file", "path", &args.path) {
            return response;
        }
        let target = vault_path(&args.path);
        let fetch = DispatchRequest::get(target.clone()).on_endpoint(args.vault.clone());
        let current = match self.send(fetch, ACTION).await {
            Ok(payload) => payload.to_display_string(),
            Err(response) => return response,
        };

        let patched = args.patch.apply(&current);
        let store = text_request(DispatchRequest::put(target), patched, args.vault);
        match self.send(store, ACTION).await {
            Ok(_) => ToolResponse::success(format!("Successfully patched file: {}", args.path)),
            Err(response) => response,
        }
    }

    pub(super) async fn delete_file(&self, args: PathArgs) -> ToolResponse {
        if let Err(response) = require_non_empty("delete_file", "path", &args.path) {
            return response;
        }
        let request = DispatchRequest::delete(vault_path(&args.path)).on_endpoint(args.vault);
        match self.send(request, "Error deleting file").await {
            Ok(_) => ToolResponse::success(format!("Successfully deleted file: {}", args.path)),
            Err(response) => response,
        }
    }

    pub(super) async fn list_vault_files(&self, args: DirectoryArgs) -> ToolResponse {
        let request = DispatchRequest::get(directory_path(&args.path)).on_endpoint(args.vault);
        match self.send(request, "Error listing vault files").await {
            Ok(payload) => {
                let (files, count) = listing_entries(payload);
                ToolResponse::json(&json!({
                    "path": display_directory(&args.path),
                    "files": files,
                    "count": count,
                }))
            }
            Err(response) => response,
        }
    }

    pub(super) async fn list_directory(&self, args: DirectoryArgs) -> ToolResponse {
        let request = DispatchRequest::get(directory_path(&args.path)).on_endpoint(args.vault);
        match self.send(request, "Error listing directory").await {
            Ok(payload) => {
                let (contents, count) = listing_entries(payload);
                ToolResponse::json(&json!({
                    "directory": display_directory(&args.path),
                    "contents": contents,
                    "count": count,
                }))
            }
            Err(response) => response,
        }
    }
}

const fn display_directory(path: &str) -> &str {
    if path.is_empty() { "/" } else { path }
}
