//! Command, navigation, and server tools.

use super::args::{ExecuteCommandArgs, OpenFileArgs, VaultArgs};
use super::router::{ToolRouter, require_non_empty};
use super::{ToolResponse, encode_component};
use crate::dispatch::DispatchRequest;
use crate::endpoint::ports::EndpointStoreRepository;
use chrono::SecondsFormat;
use mockable::Clock;
use serde_json::json;

fn open_path(path: &str, new_leaf: Option<bool>) -> String {
    let base = format!("/open/{}", encode_component(path));
    match new_leaf {
        Some(flag) => format!("{base}?newLeaf={flag}"),
        None => base,
    }
}

impl<R, C> ToolRouter<R, C>
where
    R: EndpointStoreRepository,
    C: Clock + Send + Sync,
{
    fn timestamp(&self) -> String {
        self.clock.utc().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub(super) async fn list_commands(&self, args: VaultArgs) -> ToolResponse {
        let request = DispatchRequest::get("/commands/").on_endpoint(args.vault);
        match self.send(request, "Error retrieving commands").await {
            Ok(payload) => ToolResponse::json(&payload.into_value()),
            Err(response) => response,
        }
    }

    pub(super) async fn execute_command(&self, args: ExecuteCommandArgs) -> ToolResponse {
        let ExecuteCommandArgs { command_id, vault } = args;
        let action = format!("Error executing command '{command_id}'");
        if let Err(response) = require_non_empty("execute_command", "commandId", &command_id) {
            return response;
        }

        let request = DispatchRequest::post(format!("/commands/{}/", encode_component(&command_id)))
            .on_endpoint(vault);
        match self.send(request, &action).await {
            Ok(payload) if payload.is_blank() => {
                ToolResponse::success(format!("Command '{command_id}' executed successfully"))
            }
            Ok(payload) => ToolResponse::success(format!(
                "Command '{command_id}' executed successfully: {}",
                payload.into_value()
            )),
            Err(response) => response,
        }
    }

    pub(super) async fn open_file(&self, args: OpenFileArgs) -> ToolResponse {
        let OpenFileArgs {
            path,
            new_leaf,
            vault,
        } = args;
        if let Err(response) = require_non_empty("open_file", "path", &path) {
            return response;
        }

        let request = DispatchRequest::post(open_path(&path, new_leaf)).on_endpoint(vault);
        match self.send(request, "Error opening file").await {
            Ok(_) => {
                let leaf = if new_leaf == Some(true) { " in new leaf" } else { "" };
                ToolResponse::success(format!("Successfully opened file: {path}{leaf}"))
            }
            Err(response) => response,
        }
    }

    pub(super) async fn get_server_info(&self, args: VaultArgs) -> ToolResponse {
        let VaultArgs { vault } = args;
        let request = DispatchRequest::get("/").on_endpoint(vault.clone());
        match self.send(request, "Error getting server info").await {
            Ok(payload) => ToolResponse::json(&json!({
                "serverInfo": payload.into_value(),
                "vault": vault,
                "timestamp": self.timestamp(),
            })),
            Err(response) => response,
        }
    }

    pub(super) async fn get_api_certificate(&self, args: VaultArgs) -> ToolResponse {
        let VaultArgs { vault } = args;
        let request =
            DispatchRequest::get("/obsidian-local-rest-api.crt").on_endpoint(vault.clone());
        match self.send(request, "Error getting API certificate").await {
            Ok(payload) => ToolResponse::json(&json!({
                "certificate": payload.into_value(),
                "vault": vault,
                "timestamp": self.timestamp(),
            })),
            Err(response) => response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::open_path;
    use rstest::rstest;

    #[rstest]
    #[case::unspecified(None, "/open/Inbox%2Ftodo.md")]
    #[case::new_leaf(Some(true), "/open/Inbox%2Ftodo.md?newLeaf=true")]
    #[case::same_leaf(Some(false), "/open/Inbox%2Ftodo.md?newLeaf=false")]
    fn new_leaf_is_only_sent_when_given(#[case] new_leaf: Option<bool>, #[case] expected: &str) {
        assert_eq!(open_path("Inbox/todo.md", new_leaf), expected);
    }
}
