//! Search tools.

use super::args::{QueryType, SearchArgs, SimpleSearchArgs};
use super::encode_component;
use super::router::ToolRouter;
use super::ToolResponse;
use crate::dispatch::DispatchRequest;
use crate::endpoint::ports::EndpointStoreRepository;
use mockable::Clock;
use serde_json::{Value, json};

const DATAVIEW_CONTENT_TYPE: &str = "application/vnd.olrapi.dataview.dql+txt";
const JSONLOGIC_CONTENT_TYPE: &str = "application/vnd.olrapi.jsonlogic+json";

fn result_count(results: &Value) -> Value {
    results
        .as_array()
        .map_or_else(|| json!("unknown"), |items| json!(items.len()))
}

fn simple_search_path(query: &str, context_length: Option<u32>) -> String {
    let mut path = format!("/search/simple/?query={}", encode_component(query));
    if let Some(length) = context_length {
        path.push_str(&format!("&contextLength={length}"));
    }
    path
}

impl<R, C> ToolRouter<R, C>
where
    R: EndpointStoreRepository,
    C: Clock + Send + Sync,
{
    pub(super) async fn search_vault(&self, args: SearchArgs) -> ToolResponse {
        const ACTION: &str = "Error executing search";
        let SearchArgs {
            query,
            query_type,
            vault,
        } = args;

        let request = match query_type {
            QueryType::Dataview => DispatchRequest::post("/search/")
                .with_text(query)
                .with_header("Content-Type", DATAVIEW_CONTENT_TYPE),
            QueryType::JsonLogic => match serde_json::from_str::<Value>(&query) {
                Ok(logic) => DispatchRequest::post("/search/")
                    .with_json(logic)
                    .with_header("Content-Type", JSONLOGIC_CONTENT_TYPE),
                Err(err) => {
                    return ToolResponse::failure(format!(
                        "{ACTION}: Invalid JSON in JsonLogic query: {err}"
                    ));
                }
            },
        };

        match self.send(request.on_endpoint(vault.clone()), ACTION).await {
            Ok(payload) => {
                let results = payload.into_value();
                let count = result_count(&results);
                ToolResponse::json(&json!({
                    "results": results,
                    "queryType": query_type.as_str(),
                    "vault": vault,
                    "resultCount": count,
                }))
            }
            Err(response) => response,
        }
    }

    pub(super) async fn simple_search(&self, args: SimpleSearchArgs) -> ToolResponse {
        let SimpleSearchArgs {
            query,
            context_length,
            vault,
        } = args;
        let request = DispatchRequest::post(simple_search_path(&query, context_length))
            .with_text(String::new())
            .with_header("Content-Type", "text/plain")
            .on_endpoint(vault.clone());

        match self.send(request, "Error executing simple search").await {
            Ok(payload) => {
                let results = payload.into_value();
                let count = result_count(&results);
                ToolResponse::json(&json!({
                    "results": results,
                    "query": query,
                    "contextLength": context_length,
                    "vault": vault,
                    "resultCount": count,
                }))
            }
            Err(response) => response,
        }
    }
}
