#![allow(dead_code)]

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put, MethodRouter},
    Json, Router,
};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use catalog_admin::api::ApiClient;
use catalog_admin::storefront::{storefront_router, AppState};

pub type Shared = Arc<Mutex<Backend>>;
type Reply = (StatusCode, Json<Value>);

#[derive(Clone, Debug)]
pub struct Upload {
    pub directory: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// In-memory stand-in for the catalog API. Hits are counted per route
/// template, e.g. `/api/update-brand/:id`.
#[derive(Debug, Default)]
pub struct Backend {
    collections: HashMap<&'static str, Vec<Value>>,
    hits: HashMap<&'static str, usize>,
    bodies: Vec<(&'static str, Value)>,
    queries: Vec<(&'static str, HashMap<String, String>)>,
    pub files: HashMap<String, Vec<String>>,
    pub uploads: Vec<Upload>,
    reject: Option<(StatusCode, Value)>,
    fail_lists: bool,
    next_id: i64,
}

impl Backend {
    pub fn new() -> Self {
        Self {
            next_id: 100,
            ..Default::default()
        }
    }

    pub fn with(mut self, collection: &'static str, items: Vec<Value>) -> Self {
        self.collections.insert(collection, items);
        self
    }

    pub fn with_files(mut self, directory: &str, files: &[&str]) -> Self {
        self.files.insert(
            directory.to_string(),
            files.iter().map(|file| file.to_string()).collect(),
        );
        self
    }

    /// Every listing request answers 500 from now on.
    pub fn fail_lists(&mut self) {
        self.fail_lists = true;
    }

    /// The next mutation answers with `body` instead of succeeding.
    pub fn reject_next(&mut self, status: StatusCode, body: Value) {
        self.reject = Some((status, body));
    }

    pub fn items(&self, collection: &str) -> Vec<Value> {
        self.collections.get(collection).cloned().unwrap_or_default()
    }

    pub fn hits(&self, route: &str) -> usize {
        self.hits.get(route).copied().unwrap_or(0)
    }

    pub fn last_body(&self, route: &str) -> Option<Value> {
        self.bodies
            .iter()
            .rev()
            .find(|(name, _)| *name == route)
            .map(|(_, body)| body.clone())
    }

    pub fn last_query(&self, route: &str) -> Option<HashMap<String, String>> {
        self.queries
            .iter()
            .rev()
            .find(|(name, _)| *name == route)
            .map(|(_, query)| query.clone())
    }

    fn hit(&mut self, route: &'static str) {
        *self.hits.entry(route).or_insert(0) += 1;
    }

    fn position(&self, collection: &str, id: i64) -> Option<usize> {
        self.collections
            .get(collection)?
            .iter()
            .position(|item| item["id"].as_i64() == Some(id))
    }
}

fn envelope(key: Option<&str>, value: Value, message: Option<String>) -> Value {
    let mut body = Map::new();
    body.insert("res".into(), json!("success"));
    if let Some(message) = message {
        body.insert("message".into(), json!(message));
    }
    if let Some(key) = key {
        body.insert(key.into(), value);
    }
    Value::Object(body)
}

fn not_found(label: &str) -> Reply {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "res": "error", "message": format!("No {label} with that id") })),
    )
}

fn list(
    backend: &Shared,
    route: &'static str,
    collection: &'static str,
    key: &'static str,
    query: HashMap<String, String>,
) -> Reply {
    let mut backend = backend.lock().unwrap();
    backend.hit(route);
    backend.queries.push((route, query.clone()));
    if backend.fail_lists {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "res": "error", "message": "Database unavailable" })),
        );
    }

    let number = |name: &str, default: i64| {
        query
            .get(name)
            .and_then(|value| value.parse::<i64>().ok())
            .unwrap_or(default)
            .max(1)
    };
    let page = number("page", 1);
    let per_page = number("per_page", 10);

    let matches = |item: &Value| {
        let filters = ["category_id", "brand_id"].iter().all(|field| {
            query
                .get(*field)
                .map_or(true, |value| item[*field].to_string() == *value)
        });
        let search = query.get("search").map_or(true, |term| {
            item["name"]
                .as_str()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&term.to_lowercase())
        });
        filters && search
    };

    let filtered: Vec<Value> = backend
        .items(collection)
        .into_iter()
        .filter(|item| matches(item))
        .collect();
    let total = filtered.len();
    let data: Vec<Value> = filtered
        .into_iter()
        .skip(((page - 1) * per_page) as usize)
        .take(per_page as usize)
        .collect();

    (
        StatusCode::OK,
        Json(envelope(
            Some(key),
            json!({ "data": data, "current_page": page, "per_page": per_page, "total": total }),
            None,
        )),
    )
}

fn show(
    backend: &Shared,
    route: &'static str,
    collection: &'static str,
    key: &'static str,
    label: &'static str,
    id: i64,
) -> Reply {
    let mut backend = backend.lock().unwrap();
    backend.hit(route);
    match backend.position(collection, id) {
        Some(index) => {
            let item = backend.collections[collection][index].clone();
            (StatusCode::OK, Json(envelope(Some(key), item, None)))
        }
        None => not_found(label),
    }
}

fn create(
    backend: &Shared,
    route: &'static str,
    collection: &'static str,
    key: &'static str,
    label: &'static str,
    body: Value,
) -> Reply {
    let mut backend = backend.lock().unwrap();
    backend.hit(route);
    backend.bodies.push((route, body.clone()));
    if let Some((status, body)) = backend.reject.take() {
        return (status, Json(body));
    }

    let mut item = body;
    item["id"] = json!(backend.next_id);
    backend.next_id += 1;
    backend
        .collections
        .entry(collection)
        .or_default()
        .push(item.clone());
    (
        StatusCode::CREATED,
        Json(envelope(
            Some(key),
            item,
            Some(format!("{label} created successfully")),
        )),
    )
}

fn update(
    backend: &Shared,
    route: &'static str,
    collection: &'static str,
    key: &'static str,
    label: &'static str,
    id: i64,
    body: Value,
) -> Reply {
    let mut backend = backend.lock().unwrap();
    backend.hit(route);
    backend.bodies.push((route, body.clone()));
    if let Some((status, body)) = backend.reject.take() {
        return (status, Json(body));
    }

    let Some(index) = backend.position(collection, id) else {
        return not_found(label);
    };
    let mut item = body;
    item["id"] = json!(id);
    if let Some(items) = backend.collections.get_mut(collection) {
        items[index] = item.clone();
    }
    (
        StatusCode::OK,
        Json(envelope(
            Some(key),
            item,
            Some(format!("{label} updated successfully")),
        )),
    )
}

fn remove(
    backend: &Shared,
    route: &'static str,
    collection: &'static str,
    label: &'static str,
    id: i64,
) -> Reply {
    let mut backend = backend.lock().unwrap();
    backend.hit(route);
    if let Some((status, body)) = backend.reject.take() {
        return (status, Json(body));
    }

    match backend.position(collection, id) {
        Some(index) => {
            if let Some(items) = backend.collections.get_mut(collection) {
                items.remove(index);
            }
            (StatusCode::OK, Json(envelope(None, Value::Null, None)))
        }
        None => not_found(label),
    }
}

fn list_route(route: &'static str, collection: &'static str, key: &'static str) -> MethodRouter<Shared> {
    get(
        move |State(backend): State<Shared>, Query(query): Query<HashMap<String, String>>| async move {
            list(&backend, route, collection, key, query)
        },
    )
}

fn show_route(
    route: &'static str,
    collection: &'static str,
    key: &'static str,
    label: &'static str,
) -> MethodRouter<Shared> {
    get(
        move |State(backend): State<Shared>, Path(id): Path<i64>| async move {
            show(&backend, route, collection, key, label, id)
        },
    )
}

fn create_route(
    route: &'static str,
    collection: &'static str,
    key: &'static str,
    label: &'static str,
) -> MethodRouter<Shared> {
    post(
        move |State(backend): State<Shared>, Json(body): Json<Value>| async move {
            create(&backend, route, collection, key, label, body)
        },
    )
}

fn update_route(
    route: &'static str,
    collection: &'static str,
    key: &'static str,
    label: &'static str,
) -> MethodRouter<Shared> {
    put(
        move |State(backend): State<Shared>, Path(id): Path<i64>, Json(body): Json<Value>| async move {
            update(&backend, route, collection, key, label, id, body)
        },
    )
}

fn delete_route(route: &'static str, collection: &'static str, label: &'static str) -> MethodRouter<Shared> {
    delete(
        move |State(backend): State<Shared>, Path(id): Path<i64>| async move {
            remove(&backend, route, collection, label, id)
        },
    )
}

async fn delete_variant(State(backend): State<Shared>, Path(id): Path<i64>) -> Reply {
    let mut backend = backend.lock().unwrap();
    backend.hit("/api/delete-variant/:id");
    if let Some((status, body)) = backend.reject.take() {
        return (status, Json(body));
    }

    let products = backend.collections.entry("products").or_default();
    for product in products.iter_mut() {
        if let Some(variants) = product["variants"].as_array_mut() {
            if let Some(index) = variants.iter().position(|v| v["id"].as_i64() == Some(id)) {
                variants.remove(index);
                return (StatusCode::OK, Json(envelope(None, Value::Null, None)));
            }
        }
    }
    not_found("Variant")
}

async fn toggle_user(State(backend): State<Shared>, Path(id): Path<i64>) -> Reply {
    let mut backend = backend.lock().unwrap();
    backend.hit("/api/admin/users/:id/toggle-status");
    if let Some((status, body)) = backend.reject.take() {
        return (status, Json(body));
    }

    let Some(index) = backend.position("users", id) else {
        return not_found("User");
    };
    let Some(users) = backend.collections.get_mut("users") else {
        return not_found("User");
    };
    let user = &mut users[index];
    let blocked = match &user["is_blocked"] {
        Value::Bool(value) => *value,
        Value::Number(value) => value.as_i64() != Some(0),
        _ => false,
    };
    user["is_blocked"] = json!(!blocked);
    let user = user.clone();
    (StatusCode::OK, Json(envelope(Some("user"), user, None)))
}

async fn list_files(State(backend): State<Shared>, Path(directory): Path<String>) -> Reply {
    let mut backend = backend.lock().unwrap();
    backend.hit("/api/images/get-files/:directory");
    let files = backend.files.get(&directory).cloned().unwrap_or_default();
    (StatusCode::OK, Json(envelope(Some("files"), json!(files), None)))
}

async fn upload(State(backend): State<Shared>, mut multipart: Multipart) -> Reply {
    let mut directory = String::new();
    let mut file = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "directory" => directory = field.text().await.unwrap_or_default(),
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
                file = Some((file_name, content_type, bytes));
            }
            _ => {}
        }
    }

    let mut backend = backend.lock().unwrap();
    backend.hit("/api/images/upload");
    let Some((file_name, content_type, bytes)) = file else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "res": "error", "message": "No file uploaded" })),
        );
    };
    backend
        .files
        .entry(directory.clone())
        .or_default()
        .push(file_name.clone());
    let path = format!("{directory}/{file_name}");
    backend.uploads.push(Upload {
        directory,
        file_name,
        content_type,
        bytes,
    });
    (
        StatusCode::OK,
        Json(envelope(Some("path"), json!(path), Some("Uploaded".into()))),
    )
}

async fn delete_file(State(backend): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut backend = backend.lock().unwrap();
    backend.hit("/api/images");
    backend.bodies.push(("/api/images", body.clone()));

    let directory = body["directory"].as_str().unwrap_or_default().to_string();
    let filename = body["filename"].as_str().unwrap_or_default();
    let files = backend.files.entry(directory).or_default();
    match files.iter().position(|file| file == filename) {
        Some(index) => {
            files.remove(index);
            (StatusCode::OK, Json(envelope(None, Value::Null, Some("File deleted".into()))))
        }
        None => not_found("File"),
    }
}

pub fn router(backend: Shared) -> Router {
    Router::new()
        .route("/api/brands", list_route("/api/brands", "brands", "brands"))
        .route("/api/brands/:id", show_route("/api/brands/:id", "brands", "brand", "Brand"))
        .route("/api/create-brand", create_route("/api/create-brand", "brands", "brand", "Brand"))
        .route(
            "/api/update-brand/:id",
            update_route("/api/update-brand/:id", "brands", "brand", "Brand"),
        )
        .route("/api/delete-brand/:id", delete_route("/api/delete-brand/:id", "brands", "Brand"))
        .route("/api/categories", list_route("/api/categories", "categories", "categories"))
        .route(
            "/api/categories/:id",
            show_route("/api/categories/:id", "categories", "category", "Category"),
        )
        .route(
            "/api/create-categories",
            create_route("/api/create-categories", "categories", "category", "Category"),
        )
        .route(
            "/api/update-category/:id",
            update_route("/api/update-category/:id", "categories", "category", "Category"),
        )
        .route(
            "/api/delete-category/:id",
            delete_route("/api/delete-category/:id", "categories", "Category"),
        )
        .route("/api/products", list_route("/api/products", "products", "products"))
        .route("/api/admin-products", list_route("/api/admin-products", "products", "products"))
        .route(
            "/api/get-product/:id",
            show_route("/api/get-product/:id", "products", "product", "Product"),
        )
        .route(
            "/api/admin-product-details/:id",
            show_route("/api/admin-product-details/:id", "products", "product", "Product"),
        )
        .route(
            "/api/create-product",
            create_route("/api/create-product", "products", "product", "Product"),
        )
        .route(
            "/api/update-product/:id",
            update_route("/api/update-product/:id", "products", "product", "Product"),
        )
        .route(
            "/api/delete-product/:id",
            delete_route("/api/delete-product/:id", "products", "Product"),
        )
        .route("/api/delete-variant/:id", delete(delete_variant))
        .route("/api/admin/users", list_route("/api/admin/users", "users", "users"))
        .route(
            "/api/admin/users/:id",
            show_route("/api/admin/users/:id", "users", "user", "User"),
        )
        .route("/api/admin/users/:id/toggle-status", post(toggle_user))
        .route("/api/images/get-files/:directory", get(list_files))
        .route("/api/images/upload", post(upload))
        .route("/api/images", delete(delete_file))
        .with_state(backend)
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server stopped");
    });
    format!("http://{addr}")
}

/// Starts the mock API and returns a client pointed at it.
pub async fn spawn(backend: Backend) -> (ApiClient, Shared) {
    let shared = Arc::new(Mutex::new(backend));
    let base = serve(router(shared.clone())).await;
    let client = ApiClient::new(base.clone(), format!("{base}/uploads"));
    (client, shared)
}

/// Starts the storefront in front of `client`; returns its base URL.
pub async fn spawn_storefront(client: ApiClient, page_size: u32) -> String {
    serve(storefront_router(AppState::new(client, page_size))).await
}
