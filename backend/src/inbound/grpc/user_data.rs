//! gRPC adapter for the single-record read.
//!
//! `GetUser` runs the same cache-then-store path as `GET /user/{id}` through
//! [`UserAccess`]; the two front ends never share anything else.

use std::sync::Arc;

use tonic::metadata::MetadataValue;
use tonic::{Code, Request, Response, Status};
use tracing::debug;

use crate::domain::ports::UserAccess;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, TraceId, User, UserId};

use super::proto::get_user_data_server::{GetUserData, GetUserDataServer};
use super::proto::{UserDataRequest, UserDataResponse};

/// `user_data.GetUserData` implementation over [`UserAccess`].
#[derive(Clone)]
pub struct UserDataService {
    users: Arc<dyn UserAccess>,
}

impl UserDataService {
    /// Serve reads from `users`.
    pub fn new(users: Arc<dyn UserAccess>) -> Self {
        Self { users }
    }

    /// Wrap in the tonic server type ready for `add_service`.
    pub fn into_server(self) -> GetUserDataServer<Self> {
        GetUserDataServer::new(self)
    }
}

fn code_for(code: ErrorCode) -> Code {
    match code {
        ErrorCode::InvalidRequest => Code::InvalidArgument,
        ErrorCode::NotFound => Code::NotFound,
        ErrorCode::CacheFailure | ErrorCode::StoreFailure => Code::Unavailable,
        ErrorCode::InternalError => Code::Internal,
    }
}

/// Translate a domain error into a gRPC status carrying the trace id as
/// metadata.
pub fn status_from_error(error: &Error) -> Status {
    let message = match error.code() {
        ErrorCode::InternalError => "Internal server error",
        _ => error.message(),
    };
    let mut status = Status::new(code_for(error.code()), message);
    if let Some(value) = error
        .trace_id()
        .and_then(|trace_id| MetadataValue::try_from(trace_id).ok())
    {
        status.metadata_mut().insert(TRACE_ID_HEADER, value);
    }
    status
}

fn to_response(user: &User) -> Result<UserDataResponse, Error> {
    let id = i32::try_from(user.id().get()).map_err(|_| {
        Error::internal(format!("user id {} exceeds the RPC id range", user.id()))
    })?;
    Ok(UserDataResponse {
        id,
        email: user.email().to_owned(),
        name: user.name().to_owned(),
    })
}

#[tonic::async_trait]
impl GetUserData for UserDataService {
    async fn get_user(
        &self,
        request: Request<UserDataRequest>,
    ) -> Result<Response<UserDataResponse>, Status> {
        let id = UserId::new(i64::from(request.into_inner().id));
        let trace_id = TraceId::generate();
        debug!(%trace_id, user_id = %id, "rpc GetUser");

        TraceId::scope(trace_id, async move {
            let user = self
                .users
                .get_user(id)
                .await
                .map_err(|err| status_from_error(&err))?;
            to_response(&user)
                .map(Response::new)
                .map_err(|err| status_from_error(&err))
        })
        .await
    }
}
