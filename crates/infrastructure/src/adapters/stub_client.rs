//! In-memory stand-in for the JSONPlaceholder service.
//!
//! Serves a fixed, deterministic dataset with the same status conventions
//! as the real service. Writes are answered as if they succeeded but are
//! never applied, so every scenario sees the same data.

use async_trait::async_trait;
use parking_lot::Mutex;
use restprobe_application::ports::{HttpClient, HttpClientError};
use restprobe_domain::{HttpMethod, RequestBody, RequestSpec, ResponseSpec, SubResource};
use serde_json::{Map, Value, json};

const USER_COUNT: u64 = 10;
const POSTS_PER_USER: u64 = 10;
const TODOS_PER_USER: u64 = 20;
const ALBUMS_PER_USER: u64 = 10;
const COMMENTS_PER_POST: u64 = 5;

/// Title of post 1, used by the health check.
pub const FIRST_POST_TITLE: &str =
    "sunt aut facere repellat provident occaecati excepturi optio reprehenderit";

const PEOPLE: [(&str, &str, &str); USER_COUNT as usize] = [
    ("Leanne Graham", "Bret", "Sincere@april.biz"),
    ("Ervin Howell", "Antonette", "Shanna@melissa.tv"),
    ("Clementine Bauch", "Samantha", "Nathan@yesenia.net"),
    ("Patricia Lebsack", "Karianne", "Julianne.OConner@kory.org"),
    ("Chelsey Dietrich", "Kamren", "Lucio_Hettinger@annie.ca"),
    ("Mrs. Dennis Schulist", "Leopoldo_Corkery", "Karley_Dach@jasper.info"),
    ("Kurtis Weissnat", "Elwyn.Skiles", "Telly.Hoeger@billy.biz"),
    ("Nicholas Runolfsdottir V", "Maxime_Nienow", "Sherwood@rosamond.me"),
    ("Glenna Reichert", "Delphine", "Chaim_McDermott@dana.io"),
    ("Clementina DuBuque", "Moriah.Stanton", "Rey.Padberg@karina.biz"),
];

/// Deterministic JSONPlaceholder double.
///
/// Routes on the URL path only, so any base URL host works. Every request
/// received is recorded and can be inspected with [`StubHttpClient::requests`].
pub struct StubHttpClient {
    users: Vec<Value>,
    posts: Vec<Value>,
    comments: Vec<Value>,
    todos: Vec<Value>,
    albums: Vec<Value>,
    requests: Mutex<Vec<RequestSpec>>,
}

impl Default for StubHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl StubHttpClient {
    /// Creates a stub holding the standard dataset.
    #[must_use]
    pub fn new() -> Self {
        let users = PEOPLE
            .iter()
            .zip(1_u64..)
            .map(|(&(name, username, email), id)| {
                json!({
                    "id": id,
                    "name": name,
                    "username": username,
                    "email": email,
                    "phone": format!("1-770-736-80{id:02}"),
                    "website": format!("{}.example.org", username.to_lowercase()),
                })
            })
            .collect();

        let posts: Vec<Value> = (1..=USER_COUNT * POSTS_PER_USER)
            .map(|id| {
                let title = if id == 1 {
                    FIRST_POST_TITLE.to_string()
                } else {
                    format!("post {id}")
                };
                json!({
                    "userId": (id - 1) / POSTS_PER_USER + 1,
                    "id": id,
                    "title": title,
                    "body": format!("body of post {id}"),
                })
            })
            .collect();

        let comments = (1..=USER_COUNT * POSTS_PER_USER * COMMENTS_PER_POST)
            .map(|id| {
                json!({
                    "postId": (id - 1) / COMMENTS_PER_POST + 1,
                    "id": id,
                    "name": format!("comment {id}"),
                    "email": format!("commenter{id}@example.com"),
                    "body": format!("body of comment {id}"),
                })
            })
            .collect();

        let todos = (1..=USER_COUNT * TODOS_PER_USER)
            .map(|id| {
                json!({
                    "userId": (id - 1) / TODOS_PER_USER + 1,
                    "id": id,
                    "title": format!("todo {id}"),
                    "completed": id % 3 == 0,
                })
            })
            .collect();

        let albums = (1..=USER_COUNT * ALBUMS_PER_USER)
            .map(|id| {
                json!({
                    "userId": (id - 1) / ALBUMS_PER_USER + 1,
                    "id": id,
                    "title": format!("album {id}"),
                })
            })
            .collect();

        Self {
            users,
            posts,
            comments,
            todos,
            albums,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RequestSpec> {
        self.requests.lock().clone()
    }

    fn find<'a>(collection: &'a [Value], id: &str) -> Option<&'a Value> {
        let id: u64 = id.parse().ok()?;
        collection.iter().find(|v| v["id"] == id)
    }

    /// Items whose `key` field equals `id`. A non-numeric id matches nothing.
    fn filtered_by(collection: &[Value], key: &str, id: &str) -> Value {
        let Ok(id) = id.parse::<u64>() else {
            return json!([]);
        };
        Value::Array(
            collection
                .iter()
                .filter(|v| v.get(key) == Some(&json!(id)))
                .cloned()
                .collect(),
        )
    }

    fn sub_collection(&self, sub: SubResource) -> &[Value] {
        match sub {
            SubResource::Posts => &self.posts,
            SubResource::Comments => &self.comments,
            SubResource::Todos => &self.todos,
            SubResource::Albums => &self.albums,
        }
    }

    fn route(&self, method: HttpMethod, segments: &[&str], body: &RequestBody) -> ResponseSpec {
        let not_found = || ResponseSpec::json_document(404, &json!({}));

        match (method, segments) {
            (HttpMethod::Get, ["users"]) => {
                ResponseSpec::json_document(200, &Value::Array(self.users.clone()))
            }
            (HttpMethod::Get, ["users", id]) => Self::find(&self.users, id)
                .map_or_else(not_found, |user| ResponseSpec::json_document(200, user)),
            (HttpMethod::Post, ["users"]) => match json_object(body) {
                Some(mut fields) => {
                    fields.insert("id".to_string(), json!(self.users.len() + 1));
                    ResponseSpec::json_document(201, &Value::Object(fields))
                }
                None => ResponseSpec::json_document(400, &json!({})),
            },
            (HttpMethod::Put, ["users", id]) => {
                match (Self::find(&self.users, id), json_object(body)) {
                    (Some(existing), Some(mut fields)) => {
                        fields.insert("id".to_string(), existing["id"].clone());
                        ResponseSpec::json_document(200, &Value::Object(fields))
                    }
                    (None, _) => not_found(),
                    (_, None) => ResponseSpec::json_document(400, &json!({})),
                }
            }
            (HttpMethod::Patch, ["users", id]) => {
                match (Self::find(&self.users, id), json_object(body)) {
                    (Some(existing), Some(fields)) => {
                        let mut merged = existing.clone();
                        if let Some(target) = merged.as_object_mut() {
                            target.extend(fields);
                        }
                        ResponseSpec::json_document(200, &merged)
                    }
                    (None, _) => not_found(),
                    (_, None) => ResponseSpec::json_document(400, &json!({})),
                }
            }
            (HttpMethod::Delete, ["users", id]) => Self::find(&self.users, id)
                .map_or_else(not_found, |_| ResponseSpec::json_document(200, &json!({}))),
            (HttpMethod::Get, ["users", id, segment]) => SubResource::from_segment(segment)
                .map_or_else(not_found, |sub| {
                    let owned = Self::filtered_by(self.sub_collection(sub), "userId", id);
                    ResponseSpec::json_document(200, &owned)
                }),
            (HttpMethod::Get, ["posts"]) => {
                ResponseSpec::json_document(200, &Value::Array(self.posts.clone()))
            }
            (HttpMethod::Get, ["posts", id]) => Self::find(&self.posts, id)
                .map_or_else(not_found, |post| ResponseSpec::json_document(200, post)),
            (HttpMethod::Get, ["posts", id, "comments"]) => {
                let comments = Self::filtered_by(&self.comments, "postId", id);
                ResponseSpec::json_document(200, &comments)
            }
            _ => not_found(),
        }
    }
}

/// Returns the body as a JSON object, or `None` if it is missing or not an
/// object.
fn json_object(body: &RequestBody) -> Option<Map<String, Value>> {
    match body {
        RequestBody::Json(Value::Object(fields)) => Some(fields.clone()),
        RequestBody::Raw { content, .. } => match serde_json::from_str(content) {
            Ok(Value::Object(fields)) => Some(fields),
            _ => None,
        },
        _ => None,
    }
}

#[async_trait]
impl HttpClient for StubHttpClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let url = request
            .full_url()
            .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;
        self.requests.lock().push(request.clone());

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|segment| !segment.is_empty()).collect())
            .unwrap_or_default();

        let response = self.route(request.method, &segments, &request.body);
        tracing::trace!(
            method = %request.method,
            path = url.path(),
            status = response.status,
            "stub answered"
        );
        Ok(response)
    }
}
