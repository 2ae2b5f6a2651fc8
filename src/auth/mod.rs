use axum::Router;

use crate::state::AppState;

mod dto;
pub mod error;
pub mod handlers;
pub mod history;
pub mod middleware;
pub mod password;
mod repo;
pub mod repo_types;
pub mod services;
pub mod session;

pub fn router(state: &AppState) -> Router<AppState> {
    handlers::public_routes().merge(handlers::gated_routes(state))
}
