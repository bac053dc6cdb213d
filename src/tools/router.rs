//! Tool name routing.

use super::ToolResponse;
use crate::dispatch::{DispatchError, DispatchPayload, DispatchRequest, Dispatcher, DispatcherSettings};
use crate::endpoint::ports::EndpointStoreRepository;
use crate::endpoint::services::EndpointRegistry;
use mockable::Clock;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;

/// Executes tools by name against a registry and its dispatcher.
pub struct ToolRouter<R, C>
where
    R: EndpointStoreRepository,
    C: Clock + Send + Sync,
{
    pub(super) registry: Arc<EndpointRegistry<R, C>>,
    pub(super) dispatcher: Dispatcher<EndpointRegistry<R, C>>,
    pub(super) clock: Arc<C>,
}

impl<R, C> ToolRouter<R, C>
where
    R: EndpointStoreRepository,
    C: Clock + Send + Sync,
{
    /// Creates a router whose dispatcher resolves endpoints via `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] when the HTTP client cannot be built.
    pub fn new(
        registry: Arc<EndpointRegistry<R, C>>,
        clock: Arc<C>,
        settings: &DispatcherSettings,
    ) -> reqwest::Result<Self> {
        let dispatcher = Dispatcher::new(Arc::clone(&registry), settings)?;
        Ok(Self {
            registry,
            dispatcher,
            clock,
        })
    }

    /// Returns the registry this router manages.
    #[must_use]
    pub const fn registry(&self) -> &Arc<EndpointRegistry<R, C>> {
        &self.registry
    }

    /// Returns the dispatcher used for remote calls.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher<EndpointRegistry<R, C>> {
        &self.dispatcher
    }

    /// Runs the tool `name` with JSON `arguments`.
    ///
    /// `null` arguments are treated as an empty object. Unknown tools,
    /// undecodable arguments, and every downstream failure come back as an
    /// error response.
    pub async fn call(&self, name: &str, arguments: Value) -> ToolResponse {
        let args = if arguments.is_null() {
            Value::Object(Map::new())
        } else {
            arguments
        };
        tracing::debug!(tool = name, "calling tool");

        match name {
            "list_vaults" => self.list_vaults().await,
            "get_vault_info" => run(name, args, |a| self.get_vault_info(a)).await,
            "set_active_vault" => run(name, args, |a| self.set_active_vault(a)).await,
            "add_vault" => run(name, args, |a| self.add_vault(a)).await,
            "remove_vault" => run(name, args, |a| self.remove_vault(a)).await,
            "get_active_vault" => self.get_active_vault().await,

            "get_active_file" => run(name, args, |a| self.get_active_file(a)).await,
            "append_to_active_file" => run(name, args, |a| self.append_to_active_file(a)).await,
            "replace_active_file" => run(name, args, |a| self.replace_active_file(a)).await,
            "patch_active_file" => run(name, args, |a| self.patch_active_file(a)).await,
            "delete_active_file" => run(name, args, |a| self.delete_active_file(a)).await,

            "get_file" => run(name, args, |a| self.get_file(a)).await,
            "create_file" => run(name, args, |a| self.create_file(a)).await,
            "append_to_file" => run(name, args, |a| self.append_to_file(a)).await,
            "replace_file" => run(name, args, |a| self.replace_file(a)).await,
            "patch_file" => run(name, args, |a| self.patch_file(a)).await,
            "delete_file" => run(name, args, |a| self.delete_file(a)).await,
            "list_vault_files" => run(name, args, |a| self.list_vault_files(a)).await,
            "list_directory" => run(name, args, |a| self.list_directory(a)).await,

            "search_vault" => run(name, args, |a| self.search_vault(a)).await,
            "simple_search" => run(name, args, |a| self.simple_search(a)).await,

            "get_periodic_note" => run(name, args, |a| self.get_periodic_note(a)).await,
            "append_to_periodic_note" => {
                run(name, args, |a| self.append_to_periodic_note(a)).await
            }
            "replace_periodic_note" => run(name, args, |a| self.replace_periodic_note(a)).await,
            "patch_periodic_note" => run(name, args, |a| self.patch_periodic_note(a)).await,
            "delete_periodic_note" => run(name, args, |a| self.delete_periodic_note(a)).await,

            "list_commands" => run(name, args, |a| self.list_commands(a)).await,
            "execute_command" => run(name, args, |a| self.execute_command(a)).await,
            "open_file" => run(name, args, |a| self.open_file(a)).await,
            "get_server_info" => run(name, args, |a| self.get_server_info(a)).await,
            "get_api_certificate" => run(name, args, |a| self.get_api_certificate(a)).await,

            unknown => ToolResponse::failure(format!("Unknown tool: {unknown}")),
        }
    }

    /// Dispatches `request` and renders failures as `"<action>: <error>"`.
    pub(super) async fn send(
        &self,
        request: DispatchRequest,
        action: &str,
    ) -> Result<DispatchPayload, ToolResponse> {
        self.dispatcher
            .dispatch(request)
            .await
            .map_err(|err| failure(action, &err))
    }
}

/// Builds an error response of the form `"<action>: <error>"`.
pub(super) fn failure(action: &str, err: &DispatchError) -> ToolResponse {
    tracing::debug!(error = %err, "{action}");
    ToolResponse::failure(format!("{action}: {err}"))
}

/// Rejects a blank required string argument.
pub(super) fn require_non_empty(tool: &str, field: &str, value: &str) -> Result<(), ToolResponse> {
    if value.is_empty() {
        return Err(ToolResponse::failure(format!(
            "Invalid arguments for {tool}: {field} must not be empty"
        )));
    }
    Ok(())
}

async fn run<A, F, Fut>(tool: &str, args: Value, handler: F) -> ToolResponse
where
    A: DeserializeOwned,
    F: FnOnce(A) -> Fut,
    Fut: Future<Output = ToolResponse>,
{
    let parsed = match serde_json::from_value::<A>(args) {
        Ok(parsed) => parsed,
        Err(err) => {
            return ToolResponse::failure(format!("Invalid arguments for {tool}: {err}"));
        }
    };
    handler(parsed).await
}
