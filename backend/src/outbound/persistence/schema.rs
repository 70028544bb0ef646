//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match the deployed table exactly; `diesel print-schema` against a
//! live database regenerates it.

diesel::table! {
    /// User records. `id` defaults from the `users_id_seq` sequence.
    users (id) {
        /// Primary key drawn from `users_id_seq`.
        id -> Int8,
        /// Display name.
        name -> Varchar,
        /// Contact email address.
        email -> Varchar,
    }
}
