//! gRPC inbound adapter (`user_data.GetUserData`).

pub mod proto;
mod user_data;

pub use user_data::{UserDataService, status_from_error};
