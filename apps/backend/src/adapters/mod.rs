//! SeaORM adapters - the only layer that touches entities directly.
//!
//! Adapter functions return `sea_orm::DbErr`; the repos layer maps those to
//! `DomainError` via `infra::db_errors::map_db_err`.

pub mod players_sea;
pub mod rooms_sea;
pub mod rounds_sea;
pub mod scores_sea;
