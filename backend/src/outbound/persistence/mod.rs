//! PostgreSQL persistence adapter using Diesel.
//!
//! Implements the [`UserRepository`](crate::domain::ports::UserRepository)
//! port with `diesel-async` over a `bb8` pool. Row structs (`models.rs`) and
//! table definitions (`schema.rs`) stay private to this module; only domain
//! types cross the boundary.
//!
//! # Example
//!
//! ```no_run
//! use users_service::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), users_service::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let repository = DieselUserRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_user_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
