//! WordPress REST API client.
//!
//! [`WordPressApi`] speaks the `wp/v2/posts` contract through a
//! [`RestTransport`] seam: [`HttpTransport`] sends real requests with Basic
//! application-password auth, while [`MockWordPress`] simulates the server's
//! post lifecycle (draft default, trash transitions, `rest_already_trashed`,
//! force deletion) for offline suites.
//!
//! Methods return the raw [`ApiResponse`] so callers can assert on status
//! codes and headers themselves; only a 404 on create/get is promoted to
//! [`SuiteError::EndpointNotFound`] since it means the route itself is wrong.

use crate::result::{SuiteError, SuiteResult};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

const POSTS_ROUTE: &str = "/wp-json/wp/v2/posts";

/// Post lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Publish,
    Future,
    Draft,
    Pending,
    Private,
    Trash,
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Publish => "publish",
            Self::Future => "future",
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Private => "private",
            Self::Trash => "trash",
        };
        f.write_str(s)
    }
}

/// Payload for creating or updating a post. Unset fields fall back to the
/// server defaults used on create: draft status, empty excerpt, no terms.
#[derive(Debug, Clone, Default)]
pub struct PostData {
    pub title: Option<String>,
    pub content: Option<String>,
    pub status: Option<PostStatus>,
    pub excerpt: Option<String>,
    pub date: Option<String>,
    pub categories: Option<Vec<u64>>,
    pub tags: Option<Vec<u64>>,
}

impl PostData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub const fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Publication date in the site's timezone, `YYYY-MM-DDTHH:MM:SS`
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    fn to_create_body(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "title": self.title.clone().unwrap_or_default(),
            "content": self.content.clone().unwrap_or_default(),
            "status": self.status.unwrap_or(PostStatus::Draft).to_string(),
            "excerpt": self.excerpt.clone().unwrap_or_default(),
            "categories": self.categories.clone().unwrap_or_default(),
            "tags": self.tags.clone().unwrap_or_default(),
        });
        if let Some(v) = &self.date {
            body["date"] = serde_json::Value::String(v.clone());
        }
        body
    }

    fn to_update_body(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        if let Some(v) = &self.title {
            body.insert("title".into(), serde_json::Value::String(v.clone()));
        }
        if let Some(v) = &self.content {
            body.insert("content".into(), serde_json::Value::String(v.clone()));
        }
        if let Some(v) = self.status {
            body.insert("status".into(), serde_json::Value::String(v.to_string()));
        }
        if let Some(v) = &self.excerpt {
            body.insert("excerpt".into(), serde_json::Value::String(v.clone()));
        }
        if let Some(v) = &self.date {
            body.insert("date".into(), serde_json::Value::String(v.clone()));
        }
        serde_json::Value::Object(body)
    }
}

/// Filters for listing posts
#[derive(Debug, Clone, Default)]
pub struct PostListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub status: Option<PostStatus>,
    pub search: Option<String>,
}

impl PostListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub const fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(v) = self.per_page {
            params.push(("per_page".to_string(), v.to_string()));
        }
        if let Some(v) = self.page {
            params.push(("page".to_string(), v.to_string()));
        }
        if let Some(v) = self.status {
            params.push(("status".to_string(), v.to_string()));
        }
        if let Some(v) = &self.search {
            params.push(("search".to_string(), v.clone()));
        }
        params
    }
}

/// HTTP verb subset used by the posts contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// One request handed to the transport
#[derive(Debug, Clone)]
pub struct RestRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

/// Raw response: status, lowercase-keyed headers, and the body text
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    pub const fn ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Parse the body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> SuiteResult<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Transport seam between the client and a WordPress server
#[async_trait]
pub trait RestTransport: Send + Sync {
    async fn execute(&self, request: RestRequest) -> SuiteResult<ApiResponse>;
}

/// Real transport over reqwest with Basic application-password auth
pub struct HttpTransport {
    client: reqwest::Client,
    auth_header: String,
}

impl HttpTransport {
    pub fn new(username: &str, app_password: &str) -> Self {
        let token = BASE64.encode(format!("{username}:{app_password}"));
        Self {
            client: reqwest::Client::new(),
            auth_header: format!("Basic {token}"),
        }
    }
}

#[async_trait]
impl RestTransport for HttpTransport {
    async fn execute(&self, request: RestRequest) -> SuiteResult<ApiResponse> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self
            .client
            .request(method, &request.url)
            .header(reqwest::header::AUTHORIZATION, &self.auth_header)
            .query(&request.query);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|v| (k.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;
        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

/// Client for the `wp/v2/posts` endpoints
pub struct WordPressApi {
    transport: Arc<dyn RestTransport>,
    base_url: String,
}

impl WordPressApi {
    pub fn new(transport: Arc<dyn RestTransport>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    fn posts_url(&self) -> String {
        format!("{}{POSTS_ROUTE}", self.base_url)
    }

    fn post_url(&self, id: u64) -> String {
        format!("{}{POSTS_ROUTE}/{id}", self.base_url)
    }

    /// Create a post. Unset fields default server-side to a draft with an
    /// empty excerpt and no terms.
    pub async fn create_post(&self, data: &PostData) -> SuiteResult<ApiResponse> {
        let url = self.posts_url();
        info!("WP CREATE: {url}");
        let response = self
            .transport
            .execute(RestRequest {
                method: Method::Post,
                url: url.clone(),
                query: Vec::new(),
                body: Some(data.to_create_body()),
            })
            .await?;
        if response.status == 404 {
            return Err(SuiteError::EndpointNotFound { url });
        }
        Ok(response)
    }

    pub async fn get_post(&self, id: u64) -> SuiteResult<ApiResponse> {
        let url = self.post_url(id);
        debug!("WP GET: {url}");
        let response = self
            .transport
            .execute(RestRequest {
                method: Method::Get,
                url: url.clone(),
                query: Vec::new(),
                body: None,
            })
            .await?;
        if response.status == 404 {
            return Err(SuiteError::EndpointNotFound { url });
        }
        Ok(response)
    }

    /// List posts. Pagination totals ride on the `X-WP-Total` and
    /// `X-WP-TotalPages` response headers.
    pub async fn get_all_posts(&self, query: &PostListQuery) -> SuiteResult<ApiResponse> {
        debug!("WP LIST: {}", self.posts_url());
        self.transport
            .execute(RestRequest {
                method: Method::Get,
                url: self.posts_url(),
                query: query.to_params(),
                body: None,
            })
            .await
    }

    /// Partially update a post. WordPress treats `POST /posts/{id}` as an
    /// update and leaves unmentioned fields alone.
    pub async fn update_post(&self, id: u64, data: &PostData) -> SuiteResult<ApiResponse> {
        info!("WP UPDATE: {}", self.post_url(id));
        self.transport
            .execute(RestRequest {
                method: Method::Post,
                url: self.post_url(id),
                query: Vec::new(),
                body: Some(data.to_update_body()),
            })
            .await
    }

    pub async fn change_post_status(&self, id: u64, status: PostStatus) -> SuiteResult<ApiResponse> {
        self.update_post(id, &PostData::new().with_status(status)).await
    }

    /// Delete a post. Without `force` the post moves to trash; with `force`
    /// it is removed outright.
    pub async fn delete_post(&self, id: u64, force: bool) -> SuiteResult<ApiResponse> {
        info!("WP DELETE: {} force={force}", self.post_url(id));
        self.transport
            .execute(RestRequest {
                method: Method::Delete,
                url: self.post_url(id),
                query: vec![("force".to_string(), force.to_string())],
                body: None,
            })
            .await
    }

    /// Trash-then-force-delete so the post ends up gone regardless of its
    /// current status. A post that is already absent counts as success, which
    /// makes this safe to call from teardown paths.
    pub async fn permanently_delete_post(&self, id: u64) -> SuiteResult<ApiResponse> {
        match self.get_post(id).await {
            Ok(response) => {
                #[derive(Deserialize)]
                struct StatusOnly {
                    status: String,
                }
                let current: StatusOnly = response.json()?;
                if current.status != "trash" {
                    self.delete_post(id, false).await?;
                }
            }
            Err(SuiteError::EndpointNotFound { .. }) => {
                // Already gone or never existed; the force delete below
                // reports the terminal state either way.
            }
            Err(e) => return Err(e),
        }
        self.delete_post(id, true).await
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredPost {
    id: u64,
    status: String,
    title: String,
    content: String,
    excerpt: String,
    date: Option<String>,
}

impl StoredPost {
    fn render(&self) -> serde_json::Value {
        let mut rendered = serde_json::json!({
            "id": self.id,
            "status": self.status,
            "title": { "raw": self.title, "rendered": self.title },
            "content": { "rendered": self.content },
            "excerpt": { "rendered": self.excerpt },
        });
        if let Some(v) = &self.date {
            rendered["date"] = serde_json::Value::String(v.clone());
        }
        rendered
    }
}

#[derive(Debug, Default)]
struct WpState {
    posts: Vec<StoredPost>,
    next_id: u64,
}

/// In-memory simulation of the `wp/v2/posts` endpoints
#[derive(Debug)]
pub struct MockWordPress {
    state: Mutex<WpState>,
}

impl Default for MockWordPress {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWordPress {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(WpState {
                posts: Vec::new(),
                next_id: 1,
            }),
        }
    }

    pub fn post_count(&self) -> usize {
        self.state.lock().unwrap().posts.len()
    }

    fn json_response(status: u16, body: &serde_json::Value) -> ApiResponse {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        ApiResponse {
            status,
            headers,
            body: body.to_string(),
        }
    }

    fn error(status: u16, code: &str, message: &str) -> ApiResponse {
        Self::json_response(
            status,
            &serde_json::json!({
                "code": code,
                "message": message,
                "data": { "status": status },
            }),
        )
    }

    fn no_route() -> ApiResponse {
        Self::error(
            404,
            "rest_no_route",
            "No route was found matching the URL and request method.",
        )
    }

    fn invalid_id() -> ApiResponse {
        Self::error(404, "rest_post_invalid_id", "Invalid post ID.")
    }

    fn str_field(body: Option<&serde_json::Value>, key: &str) -> Option<String> {
        body?.get(key)?.as_str().map(String::from)
    }

    fn handle_collection(&self, request: &RestRequest) -> ApiResponse {
        match request.method {
            Method::Post => {
                let mut state = self.state.lock().unwrap();
                let id = state.next_id;
                state.next_id += 1;
                let post = StoredPost {
                    id,
                    status: Self::str_field(request.body.as_ref(), "status")
                        .unwrap_or_else(|| "draft".to_string()),
                    title: Self::str_field(request.body.as_ref(), "title").unwrap_or_default(),
                    content: Self::str_field(request.body.as_ref(), "content").unwrap_or_default(),
                    excerpt: Self::str_field(request.body.as_ref(), "excerpt").unwrap_or_default(),
                    date: Self::str_field(request.body.as_ref(), "date"),
                };
                let rendered = post.render();
                state.posts.push(post);
                Self::json_response(201, &rendered)
            }
            Method::Get => {
                let state = self.state.lock().unwrap();
                let status_filter = request
                    .query
                    .iter()
                    .find(|(k, _)| k == "status")
                    .map_or("publish", |(_, v)| v.as_str());
                let search = request
                    .query
                    .iter()
                    .find(|(k, _)| k == "search")
                    .map(|(_, v)| v.clone());
                let matching: Vec<&StoredPost> = state
                    .posts
                    .iter()
                    .filter(|p| p.status == status_filter)
                    .filter(|p| {
                        search.as_ref().map_or(true, |s| {
                            p.title.contains(s.as_str()) || p.content.contains(s.as_str())
                        })
                    })
                    .collect();
                let total = matching.len();
                let per_page = request
                    .query
                    .iter()
                    .find(|(k, _)| k == "per_page")
                    .and_then(|(_, v)| v.parse::<usize>().ok())
                    .unwrap_or(10);
                let page = request
                    .query
                    .iter()
                    .find(|(k, _)| k == "page")
                    .and_then(|(_, v)| v.parse::<usize>().ok())
                    .unwrap_or(1);
                let items: Vec<serde_json::Value> = matching
                    .iter()
                    .skip(per_page * page.saturating_sub(1))
                    .take(per_page)
                    .map(|p| p.render())
                    .collect();
                let mut response =
                    Self::json_response(200, &serde_json::Value::Array(items));
                response
                    .headers
                    .insert("x-wp-total".to_string(), total.to_string());
                response.headers.insert(
                    "x-wp-totalpages".to_string(),
                    total.div_ceil(per_page.max(1)).to_string(),
                );
                response
            }
            _ => Self::no_route(),
        }
    }

    fn handle_item(&self, id: u64, request: &RestRequest) -> ApiResponse {
        let mut state = self.state.lock().unwrap();
        let Some(index) = state.posts.iter().position(|p| p.id == id) else {
            return Self::invalid_id();
        };
        match request.method {
            Method::Get => Self::json_response(200, &state.posts[index].render()),
            Method::Post | Method::Put => {
                let post = &mut state.posts[index];
                if let Some(v) = Self::str_field(request.body.as_ref(), "title") {
                    post.title = v;
                }
                if let Some(v) = Self::str_field(request.body.as_ref(), "content") {
                    post.content = v;
                }
                if let Some(v) = Self::str_field(request.body.as_ref(), "status") {
                    post.status = v;
                }
                if let Some(v) = Self::str_field(request.body.as_ref(), "excerpt") {
                    post.excerpt = v;
                }
                if let Some(v) = Self::str_field(request.body.as_ref(), "date") {
                    post.date = Some(v);
                }
                Self::json_response(200, &post.render())
            }
            Method::Delete => {
                let force = request
                    .query
                    .iter()
                    .any(|(k, v)| k == "force" && v == "true");
                if force {
                    let removed = state.posts.remove(index);
                    Self::json_response(
                        200,
                        &serde_json::json!({
                            "deleted": true,
                            "previous": removed.render(),
                        }),
                    )
                } else if state.posts[index].status == "trash" {
                    Self::error(
                        410,
                        "rest_already_trashed",
                        "The post has already been deleted.",
                    )
                } else {
                    let post = &mut state.posts[index];
                    post.status = "trash".to_string();
                    Self::json_response(200, &post.render())
                }
            }
        }
    }
}

#[async_trait]
impl RestTransport for MockWordPress {
    async fn execute(&self, request: RestRequest) -> SuiteResult<ApiResponse> {
        let Some(route) = request.url.find(POSTS_ROUTE).map(|i| &request.url[i + POSTS_ROUTE.len()..])
        else {
            return Ok(Self::no_route());
        };
        if route.is_empty() {
            return Ok(self.handle_collection(&request));
        }
        let Some(id) = route
            .strip_prefix('/')
            .and_then(|rest| rest.parse::<u64>().ok())
        else {
            return Ok(Self::no_route());
        };
        Ok(self.handle_item(id, &request))
    }
}
