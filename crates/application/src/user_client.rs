//! Client for the `/users` resource and its nested collections.

use std::sync::Arc;

use restprobe_domain::{RequestOptions, ResponseSpec, SubResource, User, UserPatch};

use crate::{ApiClient, ApplicationResult, ports::HttpClient};

const USERS: &str = "/users";

/// Returns `/users/{id}`.
#[must_use]
pub fn user_path(id: u64) -> String {
    format!("{USERS}/{id}")
}

/// Returns `/users/{id}/{sub}`.
#[must_use]
pub fn user_resource_path(id: u64, sub: SubResource) -> String {
    format!("{USERS}/{id}/{sub}")
}

/// Domain-named operations on users.
///
/// Each method builds the endpoint and delegates to one [`ApiClient`] verb.
/// The response is returned as-is; callers check the status.
pub struct UserClient<C: HttpClient + ?Sized> {
    api: ApiClient<C>,
    options: RequestOptions,
}

impl<C: HttpClient + ?Sized> UserClient<C> {
    /// Creates a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>, client: Arc<C>) -> Self {
        Self {
            api: ApiClient::new(base_url, client),
            options: RequestOptions::new(),
        }
    }

    /// Sets options sent with every call (builder pattern).
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the underlying generic client.
    #[must_use]
    pub const fn api(&self) -> &ApiClient<C> {
        &self.api
    }

    /// `GET /users/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    pub async fn get_user(&self, id: u64) -> ApplicationResult<ResponseSpec> {
        self.api.get(&user_path(id), &self.options).await
    }

    /// `GET /users`
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    pub async fn get_all_users(&self) -> ApplicationResult<ResponseSpec> {
        self.api.get(USERS, &self.options).await
    }

    /// `POST /users`. The service answers 201 with the assigned `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    pub async fn create_user(&self, user: &User) -> ApplicationResult<ResponseSpec> {
        self.api.post(USERS, user, &self.options).await
    }

    /// `PUT /users/{id}` with a full replacement body.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    pub async fn update_user(&self, id: u64, user: &User) -> ApplicationResult<ResponseSpec> {
        self.api.put(&user_path(id), user, &self.options).await
    }

    /// `PATCH /users/{id}` with only the fields set in `patch`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    pub async fn patch_user(&self, id: u64, patch: &UserPatch) -> ApplicationResult<ResponseSpec> {
        self.api.patch(&user_path(id), patch, &self.options).await
    }

    /// `DELETE /users/{id}`
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    pub async fn delete_user(&self, id: u64) -> ApplicationResult<ResponseSpec> {
        self.api.delete(&user_path(id), &self.options).await
    }

    /// `GET /users/{id}/posts`
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    pub async fn get_user_posts(&self, id: u64) -> ApplicationResult<ResponseSpec> {
        self.get_user_resource(id, SubResource::Posts).await
    }

    /// `GET /users/{id}/comments`
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    pub async fn get_user_comments(&self, id: u64) -> ApplicationResult<ResponseSpec> {
        self.get_user_resource(id, SubResource::Comments).await
    }

    /// `GET /users/{id}/todos`
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    pub async fn get_user_todos(&self, id: u64) -> ApplicationResult<ResponseSpec> {
        self.get_user_resource(id, SubResource::Todos).await
    }

    /// `GET /users/{id}/albums`
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    pub async fn get_user_albums(&self, id: u64) -> ApplicationResult<ResponseSpec> {
        self.get_user_resource(id, SubResource::Albums).await
    }

    /// `GET /users/{id}/{sub}`
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    pub async fn get_user_resource(
        &self,
        id: u64,
        sub: SubResource,
    ) -> ApplicationResult<ResponseSpec> {
        self.api.get(&user_resource_path(id, sub), &self.options).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::RecordingClient;
    use pretty_assertions::assert_eq;
    use restprobe_domain::{HttpMethod, RequestBody};
    use serde_json::json;

    const BASE: &str = "https://jsonplaceholder.typicode.com";

    fn client() -> (Arc<RecordingClient>, UserClient<RecordingClient>) {
        let transport = Arc::new(RecordingClient::ok());
        let users = UserClient::new(BASE, Arc::clone(&transport));
        (transport, users)
    }

    #[test]
    fn test_paths() {
        assert_eq!(user_path(7), "/users/7");
        assert_eq!(user_resource_path(7, SubResource::Albums), "/users/7/albums");
    }

    #[tokio::test]
    async fn test_read_operations_build_expected_urls() {
        let (transport, users) = client();

        users.get_user(1).await.unwrap();
        users.get_all_users().await.unwrap();
        users.get_user_posts(1).await.unwrap();
        users.get_user_comments(2).await.unwrap();
        users.get_user_todos(3).await.unwrap();
        users.get_user_albums(4).await.unwrap();

        let sent: Vec<_> = transport
            .requests()
            .into_iter()
            .map(|r| (r.method, r.url))
            .collect();
        assert_eq!(
            sent,
            vec![
                (HttpMethod::Get, format!("{BASE}/users/1")),
                (HttpMethod::Get, format!("{BASE}/users")),
                (HttpMethod::Get, format!("{BASE}/users/1/posts")),
                (HttpMethod::Get, format!("{BASE}/users/2/comments")),
                (HttpMethod::Get, format!("{BASE}/users/3/todos")),
                (HttpMethod::Get, format!("{BASE}/users/4/albums")),
            ]
        );
    }

    #[tokio::test]
    async fn test_create_sends_full_body() {
        let (transport, users) = client();
        let user = User::new("Test User", "test@example.com").with_username("testuser");

        users.create_user(&user).await.unwrap();

        let sent = transport.last().unwrap();
        assert_eq!(sent.method, HttpMethod::Post);
        assert_eq!(sent.url, format!("{BASE}/users"));
        assert_eq!(
            sent.body,
            RequestBody::Json(json!({
                "name": "Test User",
                "email": "test@example.com",
                "username": "testuser"
            }))
        );
    }

    #[tokio::test]
    async fn test_update_patch_delete() {
        let (transport, users) = client();
        let user = User::new("Updated User Name", "updated@example.com");

        users.update_user(1, &user).await.unwrap();
        users
            .patch_user(1, &UserPatch::new().email("newemail@example.com"))
            .await
            .unwrap();
        users.delete_user(1).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert_eq!(requests[1].method, HttpMethod::Patch);
        assert_eq!(
            requests[1].body,
            RequestBody::Json(json!({"email": "newemail@example.com"}))
        );
        assert_eq!(requests[2].method, HttpMethod::Delete);
        assert!(requests[2].body.is_empty());
        assert!(requests.iter().all(|r| r.url == format!("{BASE}/users/1")));
    }

    #[tokio::test]
    async fn test_default_options_applied_to_every_call() {
        let transport = Arc::new(RecordingClient::ok());
        let users = UserClient::new(BASE, Arc::clone(&transport))
            .with_options(RequestOptions::new().with_header("Accept", "application/json"));

        users.get_user(1).await.unwrap();
        users.delete_user(1).await.unwrap();

        assert!(
            transport
                .requests()
                .iter()
                .all(|r| r.headers.get("accept") == Some("application/json"))
        );
    }
}
