//! Endpoint management tools.

use super::ToolResponse;
use super::args::{AddVaultArgs, NamedVaultArgs};
use super::router::ToolRouter;
use crate::dispatch::{DispatchPayload, DispatchRequest};
use crate::endpoint::domain::{EndpointConfig, EndpointName, EndpointSummary};
use crate::endpoint::ports::EndpointStoreRepository;
use crate::endpoint::services::{AddEndpointRequest, EndpointRegistryError};
use futures::future::join_all;
use mockable::Clock;
use serde_json::{Value, json};

const fn status_label(connected: bool) -> &'static str {
    if connected { "connected" } else { "disconnected" }
}

fn not_found(name: &str) -> ToolResponse {
    ToolResponse::success(format!(
        "Vault '{name}' not found. Use list_vaults to see available vaults."
    ))
}

fn summary_with_status(endpoint: &EndpointConfig, connected: bool) -> Value {
    let mut value = serde_json::to_value(EndpointSummary::from(endpoint)).unwrap_or(Value::Null);
    if let Some(fields) = value.as_object_mut() {
        fields.insert("status".to_owned(), json!(status_label(connected)));
    }
    value
}

impl<R, C> ToolRouter<R, C>
where
    R: EndpointStoreRepository,
    C: Clock + Send + Sync,
{
    async fn probe(&self, name: &str) -> bool {
        self.dispatcher.test_connection(Some(name)).await
    }

    pub(super) async fn list_vaults(&self) -> ToolResponse {
        let store = match self.registry.snapshot().await {
            Ok(store) => store,
            Err(err) => return ToolResponse::failure(format!("Error listing vaults: {err}")),
        };

        let statuses = join_all(
            store
                .endpoints()
                .iter()
                .map(|endpoint| self.probe(endpoint.name().as_str())),
        )
        .await;
        let vaults: Vec<Value> = store
            .endpoints()
            .iter()
            .zip(statuses)
            .map(|(endpoint, connected)| summary_with_status(endpoint, connected))
            .collect();
        let total = vaults.len();

        ToolResponse::json(&json!({
            "vaults": vaults,
            "activeVault": store.active_name().map(EndpointName::as_str),
            "defaultVault": store.default_name().map(EndpointName::as_str),
            "totalVaults": total,
        }))
    }

    pub(super) async fn get_vault_info(&self, args: NamedVaultArgs) -> ToolResponse {
        let NamedVaultArgs { vault } = args;
        let endpoint = match self.registry.get(&vault).await {
            Ok(endpoint) => endpoint,
            Err(EndpointRegistryError::NotFound(name)) => return not_found(&name),
            Err(err) => return ToolResponse::failure(format!("Error getting vault info: {err}")),
        };

        let connected = self.probe(&vault).await;
        let server_info = if connected {
            self.dispatcher
                .dispatch(DispatchRequest::get("/").on_endpoint(Some(vault)))
                .await
                .map_or(Value::Null, DispatchPayload::into_value)
        } else {
            Value::Null
        };

        let mut info = summary_with_status(&endpoint, connected);
        if let Some(fields) = info.as_object_mut() {
            fields.insert("serverInfo".to_owned(), server_info);
        }
        ToolResponse::json(&info)
    }

    pub(super) async fn set_active_vault(&self, args: NamedVaultArgs) -> ToolResponse {
        let NamedVaultArgs { vault } = args;
        match self.registry.set_active(&vault).await {
            Ok(endpoint) => {
                let connected = self.probe(endpoint.name().as_str()).await;
                ToolResponse::success(format!(
                    "Successfully switched to vault '{}'. Connection status: {}",
                    endpoint.name(),
                    status_label(connected)
                ))
            }
            Err(EndpointRegistryError::NotFound(name)) => not_found(&name),
            Err(err) => ToolResponse::failure(format!("Error setting active vault: {err}")),
        }
    }

    pub(super) async fn add_vault(&self, args: AddVaultArgs) -> ToolResponse {
        let AddVaultArgs {
            name,
            api_key,
            base_url,
            display_name,
            set_as_active,
        } = args;

        let mut request = AddEndpointRequest::new(name, api_key).make_active(set_as_active);
        if let Some(url) = base_url {
            request = request.with_base_url(url);
        }
        if let Some(label) = display_name {
            request = request.with_display_name(label);
        }

        match self.registry.add(request).await {
            Ok(endpoint) => {
                let connected = self.probe(endpoint.name().as_str()).await;
                let activation = if set_as_active {
                    " and set as active vault"
                } else {
                    ""
                };
                ToolResponse::success(format!(
                    "Successfully added vault '{}'{activation}. Connection status: {}",
                    endpoint.name(),
                    status_label(connected)
                ))
            }
            Err(EndpointRegistryError::AlreadyExists(existing)) => ToolResponse::success(format!(
                "Vault '{existing}' already exists. Use remove_vault first if you want to replace it."
            )),
            Err(err) => ToolResponse::failure(format!("Error adding vault: {err}")),
        }
    }

    pub(super) async fn remove_vault(&self, args: NamedVaultArgs) -> ToolResponse {
        let NamedVaultArgs { vault } = args;
        match self.registry.remove(&vault).await {
            Ok(removal) => {
                let mut message = format!("Successfully removed vault '{}'", removal.removed.name());
                if removal.was_active {
                    match &removal.active_name {
                        Some(next) => message.push_str(&format!(". Active vault switched to '{next}'")),
                        None => message.push_str(". No active vault remaining"),
                    }
                }
                ToolResponse::success(message)
            }
            Err(EndpointRegistryError::NotFound(name)) => not_found(&name),
            Err(err) => ToolResponse::failure(format!("Error removing vault: {err}")),
        }
    }

    pub(super) async fn get_active_vault(&self) -> ToolResponse {
        let endpoint = match self.registry.get_active().await {
            Ok(Some(endpoint)) => endpoint,
            Ok(None) => {
                return ToolResponse::success(
                    "No active vault configured. Use set_active_vault or add_vault with setAsActive=true.",
                );
            }
            Err(err) => return ToolResponse::failure(format!("Error getting active vault: {err}")),
        };

        let connected = self.probe(endpoint.name().as_str()).await;
        ToolResponse::json(&json!({
            "name": endpoint.name().as_str(),
            "displayName": endpoint.display_name(),
            "baseUrl": endpoint.base_url().as_str(),
            "status": status_label(connected),
            "lastUsed": endpoint.last_used_at(),
        }))
    }
}
