use axum::Router;

use crate::state::AppState;

mod dto;
pub mod handlers;
mod repo;
pub mod repo_types;

pub fn router(state: &AppState) -> Router<AppState> {
    handlers::read_routes().merge(handlers::write_routes(state))
}
