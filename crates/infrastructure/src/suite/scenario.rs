//! The scenario catalogue.
//!
//! Every scenario builds its own [`UserClient`] on the shared transport,
//! performs its calls in order and checks each response with the
//! [`TestRunner`].

use std::fmt;
use std::sync::Arc;

use restprobe_application::{ApplicationResult, HttpClient, UserClient};
use restprobe_domain::{
    Assertion, JsonKind, RequestOptions, ResponseSpec, StatusExpectation, TestResults, TestSuite,
    User, UserPatch,
};
use serde_json::json;

use crate::adapters::FIRST_POST_TITLE;
use crate::testing::TestRunner;

/// User present in the dataset.
const EXISTING_USER_ID: u64 = 1;

/// Id no user has.
const MISSING_USER_ID: u64 = 9999;

/// Status expected from `DELETE /users/{id}`.
const DELETE_STATUS: StatusExpectation = StatusExpectation::Exact(200);

/// An independent test case against the users API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// `GET /users/1` returns that user.
    GetSingleUser,
    /// `GET /users` returns a non-empty list.
    GetAllUsers,
    /// `POST /users` echoes the new user with an id.
    CreateUser,
    /// `PUT /users/1` reflects the replacement body.
    UpdateUser,
    /// `PATCH /users/1` changes only the sent field.
    PatchUser,
    /// `DELETE /users/1` succeeds.
    DeleteUser,
    /// Posts of user 1 all belong to user 1.
    GetUserPosts,
    /// Comments of user 1 come back as an array.
    GetUserComments,
    /// Todos of user 1 are non-empty.
    GetUserTodos,
    /// Albums of user 1 are non-empty.
    GetUserAlbums,
    /// An unknown id yields 404.
    UserNotFound,
    /// A user carries typed required fields.
    UserHasRequiredFields,
    /// Two fresh clients see the same user.
    GetIsIdempotent,
    /// `GET /posts/1` answers with the known title.
    ServiceHealth,
}

impl Scenario {
    /// Returns every scenario in catalogue order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::GetSingleUser,
            Self::GetAllUsers,
            Self::CreateUser,
            Self::UpdateUser,
            Self::PatchUser,
            Self::DeleteUser,
            Self::GetUserPosts,
            Self::GetUserComments,
            Self::GetUserTodos,
            Self::GetUserAlbums,
            Self::UserNotFound,
            Self::UserHasRequiredFields,
            Self::GetIsIdempotent,
            Self::ServiceHealth,
        ]
    }

    /// Returns the snake_case name used for filtering and reporting.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetSingleUser => "get_single_user",
            Self::GetAllUsers => "get_all_users",
            Self::CreateUser => "create_user",
            Self::UpdateUser => "update_user",
            Self::PatchUser => "patch_user",
            Self::DeleteUser => "delete_user",
            Self::GetUserPosts => "get_user_posts",
            Self::GetUserComments => "get_user_comments",
            Self::GetUserTodos => "get_user_todos",
            Self::GetUserAlbums => "get_user_albums",
            Self::UserNotFound => "user_not_found",
            Self::UserHasRequiredFields => "user_has_required_fields",
            Self::GetIsIdempotent => "get_is_idempotent",
            Self::ServiceHealth => "service_health",
        }
    }

    /// Returns a one-line summary.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::GetSingleUser => "GET /users/1 returns user 1",
            Self::GetAllUsers => "GET /users returns a non-empty list",
            Self::CreateUser => "POST /users answers 201 and echoes the body",
            Self::UpdateUser => "PUT /users/1 reflects the replacement",
            Self::PatchUser => "PATCH /users/1 changes only the email",
            Self::DeleteUser => "DELETE /users/1 succeeds",
            Self::GetUserPosts => "GET /users/1/posts belong to user 1",
            Self::GetUserComments => "GET /users/1/comments returns an array",
            Self::GetUserTodos => "GET /users/1/todos is non-empty",
            Self::GetUserAlbums => "GET /users/1/albums is non-empty",
            Self::UserNotFound => "GET /users/9999 answers 404",
            Self::UserHasRequiredFields => "user 1 has typed id, name, email and username",
            Self::GetIsIdempotent => "repeated GET /users/1 gives the same answer",
            Self::ServiceHealth => "GET /posts/1 answers with the known title",
        }
    }

    /// Runs the scenario against the service at `base_url`.
    ///
    /// Returns one [`TestResults`] per checked response.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails or a body needed to continue
    /// the scenario cannot be decoded.
    pub async fn run<C>(
        self,
        base_url: &str,
        client: Arc<C>,
    ) -> ApplicationResult<Vec<TestResults>>
    where
        C: HttpClient + ?Sized,
    {
        let users = UserClient::new(base_url, Arc::clone(&client));

        let results = match self {
            Self::GetSingleUser => {
                let response = users.get_user(EXISTING_USER_ID).await?;
                vec![check(
                    self.name(),
                    &response,
                    vec![
                        Assertion::status(200),
                        Assertion::ContentType {
                            expected: "application/json".to_string(),
                        },
                        Assertion::equals("$.id", EXISTING_USER_ID),
                        Assertion::exists("$.name"),
                        Assertion::exists("$.email"),
                    ],
                )]
            }
            Self::GetAllUsers => {
                let response = users.get_all_users().await?;
                vec![check(
                    self.name(),
                    &response,
                    vec![
                        Assertion::status(200),
                        Assertion::is_kind("$", JsonKind::Array),
                        Assertion::non_empty("$"),
                    ],
                )]
            }
            Self::CreateUser => {
                let user = User::new("Test User", "test@example.com").with_username("testuser");
                let response = users.create_user(&user).await?;
                vec![check(
                    self.name(),
                    &response,
                    vec![
                        Assertion::status(201),
                        Assertion::equals("$.name", user.name.as_str()),
                        Assertion::equals("$.email", user.email.as_str()),
                        Assertion::exists("$.id"),
                    ],
                )]
            }
            Self::UpdateUser => {
                let user = User::new("Updated User Name", "updated@example.com");
                let response = users.update_user(EXISTING_USER_ID, &user).await?;
                vec![check(
                    self.name(),
                    &response,
                    vec![
                        Assertion::status(200),
                        Assertion::equals("$.name", user.name.as_str()),
                        Assertion::equals("$.email", user.email.as_str()),
                    ],
                )]
            }
            Self::PatchUser => patch_user(self.name(), &users).await?,
            Self::DeleteUser => {
                let response = users.delete_user(EXISTING_USER_ID).await?;
                vec![check(
                    self.name(),
                    &response,
                    vec![Assertion::StatusCode {
                        expected: DELETE_STATUS,
                    }],
                )]
            }
            Self::GetUserPosts => {
                let response = users.get_user_posts(EXISTING_USER_ID).await?;
                vec![check(
                    self.name(),
                    &response,
                    vec![
                        Assertion::status(200),
                        Assertion::non_empty("$"),
                        Assertion::EachElement {
                            path: "$".to_string(),
                            field: "userId".to_string(),
                            expected: json!(EXISTING_USER_ID),
                        },
                    ],
                )]
            }
            Self::GetUserComments => {
                // The live service has no userId on comments and answers [].
                let response = users.get_user_comments(EXISTING_USER_ID).await?;
                vec![check(
                    self.name(),
                    &response,
                    vec![
                        Assertion::status(200),
                        Assertion::is_kind("$", JsonKind::Array),
                    ],
                )]
            }
            Self::GetUserTodos => {
                let response = users.get_user_todos(EXISTING_USER_ID).await?;
                vec![check(
                    self.name(),
                    &response,
                    vec![Assertion::status(200), Assertion::non_empty("$")],
                )]
            }
            Self::GetUserAlbums => {
                let response = users.get_user_albums(EXISTING_USER_ID).await?;
                vec![check(
                    self.name(),
                    &response,
                    vec![Assertion::status(200), Assertion::non_empty("$")],
                )]
            }
            Self::UserNotFound => {
                let response = users.get_user(MISSING_USER_ID).await?;
                vec![check(self.name(), &response, vec![Assertion::status(404)])]
            }
            Self::UserHasRequiredFields => {
                let response = users.get_user(EXISTING_USER_ID).await?;
                vec![check(
                    self.name(),
                    &response,
                    vec![
                        Assertion::status(200),
                        Assertion::is_kind("$.id", JsonKind::Number),
                        Assertion::is_kind("$.name", JsonKind::String),
                        Assertion::is_kind("$.email", JsonKind::String),
                        Assertion::exists("$.username"),
                        Assertion::BodyMatches {
                            pattern: r#""email":\s*"[^"@\s]+@[^"@\s]+""#.to_string(),
                        },
                    ],
                )]
            }
            Self::GetIsIdempotent => {
                let first = users.get_user(EXISTING_USER_ID).await?;
                let again = UserClient::new(base_url, client)
                    .get_user(EXISTING_USER_ID)
                    .await?;
                let expected = first.json_value()?;
                vec![check(
                    self.name(),
                    &again,
                    vec![
                        Assertion::status(first.status),
                        Assertion::JsonPath {
                            path: "$".to_string(),
                            expected: Some(expected),
                        },
                    ],
                )]
            }
            Self::ServiceHealth => {
                let response = users.api().get("/posts/1", &RequestOptions::new()).await?;
                vec![check(
                    self.name(),
                    &response,
                    vec![
                        Assertion::status(200),
                        Assertion::equals("$.title", FIRST_POST_TITLE),
                    ],
                )]
            }
        };

        Ok(results)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reads the current user, patches the email and checks that the response
/// is that same user with only the email replaced.
async fn patch_user<C>(
    name: &str,
    users: &UserClient<C>,
) -> ApplicationResult<Vec<TestResults>>
where
    C: HttpClient + ?Sized,
{
    let before = users.get_user(EXISTING_USER_ID).await?;
    let baseline = check(
        &format!("{name} (baseline)"),
        &before,
        vec![Assertion::status(200), Assertion::exists("$.name")],
    );
    if !baseline.all_passed() {
        return Ok(vec![baseline]);
    }

    let email = "newemail@example.com";
    let mut expected = before.json_value()?;
    expected["email"] = json!(email);

    let response = users
        .patch_user(EXISTING_USER_ID, &UserPatch::new().email(email))
        .await?;
    let patched = check(
        name,
        &response,
        vec![
            Assertion::status(200),
            Assertion::JsonPath {
                path: "$".to_string(),
                expected: Some(expected),
            },
        ],
    );

    Ok(vec![baseline, patched])
}

fn check(name: &str, response: &ResponseSpec, assertions: Vec<Assertion>) -> TestResults {
    let suite = TestSuite {
        name: name.to_string(),
        assertions,
        stop_on_failure: false,
    };
    TestRunner::new().run(&suite, response)
}
