//! API documentation endpoints.
//!
//! The handlers in [`super::todos`] carry `utoipa` annotations. [`TodoApiDoc`]
//! collects them into an OpenAPI 3 document, and [`ResourceListing`] flattens
//! that document into the Swagger 1.2 resource listing served at `/_spec.json`:
//! one entry per resource path, each with its operations, parameters and
//! response messages.

use crate::{
    error::{ApiError, ApiResult, ErrorResponse},
    routes::{health, todos},
    state::AppState,
};
use axum::{
    extract::{Host, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::OpenApi;

/// Swagger version of the resource listing format
pub const SWAGGER_VERSION: &str = "1.2";

/// HTTP methods in the order operations are listed
const METHOD_ORDER: &[&str] = &["get", "post", "put", "patch", "delete", "head", "options"];

/// OpenAPI description of the todo resources
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Restful Todo API",
        description = "A minimal TODO list REST API",
        license(name = "MIT"),
    ),
    paths(
        todos::list_todos,
        todos::create_todo,
        todos::get_todo,
        todos::update_todo,
        todos::delete_todo,
    ),
    components(schemas(
        todos::TodoModel,
        todos::TodoListItem,
        todos::CreateTodoRequest,
        todos::UpdateTodoRequest,
        ErrorResponse,
    )),
    tags(
        (name = "todo_list", description = "Todo list: show all todos and add new tasks"),
        (name = "todo", description = "Single todo: show, update and delete an item"),
    )
)]
pub struct TodoApiDoc;

/// OpenAPI description of the operational endpoints
#[derive(OpenApi)]
#[openapi(
    paths(health::health),
    components(schemas(health::HealthResponse)),
    tags((name = "health", description = "Health check endpoints"))
)]
pub struct HealthApiDoc;

/// OpenAPI document of the todo resources only
pub fn todo_openapi(api_version: &str) -> utoipa::openapi::OpenApi {
    let mut doc = TodoApiDoc::openapi();
    doc.info.version = api_version.to_string();
    doc
}

/// Complete OpenAPI document for the service
pub fn openapi(api_version: &str) -> utoipa::openapi::OpenApi {
    let mut doc = todo_openapi(api_version);
    doc.merge(HealthApiDoc::openapi());
    doc
}

/// Swagger 1.2 resource listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceListing {
    /// Version of the documented API
    pub api_version: String,

    /// Version of the listing format
    pub swagger_version: String,

    /// Root URL the paths are relative to
    pub base_path: String,

    /// Path of the listed resource group
    pub resource_path: String,

    /// Media types the API produces
    pub produces: Vec<String>,

    /// One entry per resource path
    pub apis: Vec<ApiDeclaration>,

    /// Schemas referenced by the operations
    pub models: Map<String, Value>,
}

/// A resource path and its operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDeclaration {
    /// Route template, e.g. `/todos/{todo_id}`
    pub path: String,

    /// Resource description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Operations in method order
    pub operations: Vec<OperationDoc>,
}

/// A single HTTP operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDoc {
    /// Lower-case HTTP method
    pub method: String,

    /// Operation id
    pub nickname: String,

    /// One-line summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Longer implementation notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Model returned on success
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub response_type: Option<String>,

    /// Accepted parameters
    pub parameters: Vec<ParameterDoc>,

    /// Documented status codes
    pub response_messages: Vec<ResponseMessage>,
}

/// An operation parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDoc {
    /// Parameter name, `body` for request bodies
    pub name: String,

    /// `path`, `query`, `header` or `body`
    pub param_type: String,

    /// Primitive type or model name
    pub data_type: String,

    /// Whether the parameter must be supplied
    pub required: bool,

    /// Whether the parameter may repeat
    pub allow_multiple: bool,

    /// Parameter description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A documented response status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// HTTP status code
    pub code: u16,

    /// Description of the outcome
    pub message: String,
}

impl ResourceListing {
    /// Flatten an OpenAPI document into a resource listing
    ///
    /// The listing's `apiVersion` is the document's `info.version`.
    pub fn from_openapi(
        doc: &utoipa::openapi::OpenApi,
        base_path: &str,
    ) -> Result<Self, serde_json::Error> {
        let api_version = doc.info.version.clone();
        let doc = serde_json::to_value(doc)?;

        let tag_descriptions: Map<String, Value> = doc["tags"]
            .as_array()
            .map(|tags| {
                tags.iter()
                    .filter_map(|t| {
                        Some((t["name"].as_str()?.to_string(), t["description"].clone()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let apis: Vec<ApiDeclaration> = doc["paths"]
            .as_object()
            .map(|paths| {
                paths
                    .iter()
                    .map(|(path, item)| api_declaration(path, item, &tag_descriptions))
                    .collect()
            })
            .unwrap_or_default();

        let models = doc["components"]["schemas"]
            .as_object()
            .cloned()
            .unwrap_or_default();

        Ok(Self {
            api_version,
            swagger_version: SWAGGER_VERSION.to_string(),
            base_path: base_path.to_string(),
            resource_path: "/".to_string(),
            produces: vec!["application/json".to_string()],
            apis,
            models,
        })
    }
}

fn api_declaration(
    path: &str,
    item: &Value,
    tag_descriptions: &Map<String, Value>,
) -> ApiDeclaration {
    let operations: Vec<OperationDoc> = METHOD_ORDER
        .iter()
        .filter_map(|method| Some(operation_doc(method, item.get(*method)?)))
        .collect();

    let description = METHOD_ORDER
        .iter()
        .filter_map(|method| item.get(*method)?["tags"].get(0)?.as_str())
        .find_map(|tag| tag_descriptions.get(tag)?.as_str())
        .map(str::to_string);

    ApiDeclaration {
        path: path.to_string(),
        description,
        operations,
    }
}

fn operation_doc(method: &str, op: &Value) -> OperationDoc {
    let mut parameters: Vec<ParameterDoc> = op["parameters"]
        .as_array()
        .map(|params| {
            params
                .iter()
                .map(|p| ParameterDoc {
                    name: p["name"].as_str().unwrap_or_default().to_string(),
                    param_type: p["in"].as_str().unwrap_or("query").to_string(),
                    data_type: data_type(&p["schema"]),
                    required: p["required"].as_bool().unwrap_or(false),
                    allow_multiple: false,
                    description: p["description"].as_str().map(str::to_string),
                })
                .collect()
        })
        .unwrap_or_default();

    if let Some(body) = op.get("requestBody") {
        parameters.push(ParameterDoc {
            name: "body".to_string(),
            param_type: "body".to_string(),
            data_type: data_type(&body["content"]["application/json"]["schema"]),
            required: body["required"].as_bool().unwrap_or(false),
            allow_multiple: false,
            description: body["description"].as_str().map(str::to_string),
        });
    }

    let mut response_messages: Vec<ResponseMessage> = Vec::new();
    let mut response_type = None;
    if let Some(responses) = op["responses"].as_object() {
        for (code, response) in responses {
            let Ok(code) = code.parse::<u16>() else {
                continue;
            };
            let schema = &response["content"]["application/json"]["schema"];
            if (200..300).contains(&code) && response_type.is_none() && !schema.is_null() {
                response_type = Some(data_type(schema));
            }
            response_messages.push(ResponseMessage {
                code,
                message: response["description"].as_str().unwrap_or_default().to_string(),
            });
        }
    }
    response_messages.sort_by_key(|m| m.code);

    OperationDoc {
        method: method.to_string(),
        nickname: op["operationId"].as_str().unwrap_or(method).to_string(),
        summary: op["summary"].as_str().map(str::to_string),
        notes: op["description"].as_str().map(str::to_string),
        response_type,
        parameters,
        response_messages,
    }
}

/// Model name for `$ref` schemas, primitive type name otherwise
fn data_type(schema: &Value) -> String {
    if let Some(reference) = schema["$ref"].as_str() {
        return reference.rsplit('/').next().unwrap_or(reference).to_string();
    }
    schema["type"].as_str().unwrap_or("object").to_string()
}

/// Documentation routes
pub fn routes(enable_openapi: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/_spec.json", get(resource_listing))
        .route("/_spec", get(resource_listing));

    if enable_openapi {
        router.route("/api-docs/openapi.json", get(openapi_document))
    } else {
        router
    }
}

/// Swagger 1.2 resource listing of the todo resources
async fn resource_listing(
    State(state): State<AppState>,
    host: Option<Host>,
) -> ApiResult<Json<ResourceListing>> {
    let base_path = match host {
        Some(Host(host)) => format!("http://{}", host),
        None => format!("http://{}", state.config.server_address()),
    };

    let doc = todo_openapi(&state.config.api_version);

    ResourceListing::from_openapi(&doc, &base_path)
        .map(Json)
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// OpenAPI 3 document for the whole service
async fn openapi_document(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(openapi(&state.config.api_version))
}
