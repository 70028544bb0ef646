//! User record handlers.
//!
//! ```text
//! GET    /users?start=0&count=10
//! POST   /user            {"name":"Ada","email":"ada@x.io"}
//! GET    /user/{id}
//! PUT    /user/{id}       {"name":"Ada","email":"ada@x.io"}
//! DELETE /user/{id}
//! ```
//!
//! Each handler parses its input, calls exactly one [`UserAccess`] operation
//! and serialises the outcome. Malformed path ids are rejected before any
//! backend is touched.
//!
//! [`UserAccess`]: crate::domain::ports::UserAccess

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::UserInput;
use crate::domain::{Error, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ErrorBody, INVALID_USER_ID_MESSAGE};
use crate::inbound::http::state::HttpState;

/// Body accepted by create and update.
///
/// Any `id` member is ignored: creates take the allocated id and updates take
/// the path id. Missing fields decode as empty strings and then fail
/// validation.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserPayload {
    /// Display name.
    #[serde(default)]
    #[schema(example = "Ada")]
    pub name: String,
    /// Email address.
    #[serde(default)]
    #[schema(example = "ada@x.io")]
    pub email: String,
}

impl From<UserPayload> for UserInput {
    fn from(payload: UserPayload) -> Self {
        UserInput::new(payload.name, payload.email)
    }
}

/// Query string for `GET /users`.
///
/// Values that are absent or not integers read as zero and are then clamped,
/// so this extractor never rejects a request.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ListParams {
    /// Zero-based offset.
    pub start: Option<String>,
    /// Page size; anything outside 1..=10 means 10.
    pub count: Option<String>,
}

fn lenient_int(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse().ok()).unwrap_or(0)
}

fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse::<i64>()
        .map(UserId::new)
        .map_err(|_| Error::invalid_request(INVALID_USER_ID_MESSAGE))
}

/// Confirmation body for deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteResult {
    /// Always `"success"`.
    #[schema(example = "success")]
    pub result: String,
}

/// List a page of users straight from the store.
#[utoipa::path(
    get,
    path = "/users",
    params(ListParams),
    responses(
        (status = 200, description = "Users ordered by id", body = [User]),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    params: web::Query<ListParams>,
) -> ApiResult<web::Json<Vec<User>>> {
    let start = lenient_int(params.start.as_deref());
    let count = lenient_int(params.count.as_deref());
    let users = state.users.list_users(start, count).await?;
    Ok(web::Json(users))
}

/// Create a user. The store allocates the id.
#[utoipa::path(
    post,
    path = "/user",
    request_body = UserPayload,
    responses(
        (status = 201, description = "Created", body = User),
        (status = 400, description = "Malformed or invalid body", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users
        .create_user(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(user))
}

/// Fetch one user, cache first.
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Non-numeric id", body = ErrorBody),
        (status = 404, description = "No such user", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path)?;
    let user = state.users.get_user(id).await?;
    Ok(web::Json(user))
}

/// Replace name and email of a user.
#[utoipa::path(
    put,
    path = "/user/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 400, description = "Non-numeric id or invalid body", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/user/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path)?;
    let user = state
        .users
        .update_user(id, payload.into_inner().into())
        .await?;
    Ok(web::Json(user))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/user/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Deleted", body = DeleteResult),
        (status = 400, description = "Non-numeric id", body = ErrorBody),
        (status = 500, description = "Backend failure", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/user/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteResult>> {
    let id = parse_user_id(&path)?;
    state.users.delete_user(id).await?;
    Ok(web::Json(DeleteResult {
        result: "success".to_owned(),
    }))
}
