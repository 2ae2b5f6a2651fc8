use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Form, Router};
use tracing::{error, instrument};

use super::dto::CountryForm;
use super::repo;
use crate::auth::middleware::ensure_login;
use crate::pages;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/un/countries", get(list_countries))
        .route("/un/countries/:code", get(country_detail))
}

/// Mutating routes sit behind the login gate.
pub fn write_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/un/addCountry", get(add_country_form).post(add_country))
        .route("/un/editCountry/:code", get(edit_country_form))
        .route("/un/editCountry", axum::routing::post(edit_country))
        .route("/un/deleteCountry/:code", get(delete_country))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            ensure_login,
        ))
}

/// Renders the downstream failure as the generic 500 page with the
/// stringified error, the only shape clients ever see.
fn render_error(err: anyhow::Error) -> Response {
    error!(error = %err, "country operation failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(pages::server_error(&err.to_string())),
    )
        .into_response()
}

#[instrument(skip(state))]
async fn list_countries(State(state): State<AppState>) -> Response {
    match repo::list_all(&state.db).await {
        Ok(countries) => Html(pages::countries(&countries)).into_response(),
        Err(e) => render_error(e),
    }
}

#[instrument(skip(state))]
async fn country_detail(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    match repo::find_by_code(&state.db, &code).await {
        Ok(Some(country)) => Html(pages::country_detail(&country)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, Html(pages::not_found())).into_response(),
        Err(e) => render_error(e),
    }
}

async fn add_country_form() -> Html<String> {
    Html(pages::add_country())
}

#[instrument(skip(state, form))]
async fn add_country(State(state): State<AppState>, Form(form): Form<CountryForm>) -> Response {
    match repo::insert(&state.db, &form.into_country()).await {
        Ok(()) => Redirect::to("/un/countries").into_response(),
        Err(e) => render_error(e),
    }
}

#[instrument(skip(state))]
async fn edit_country_form(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    match repo::find_by_code(&state.db, &code).await {
        Ok(Some(country)) => Html(pages::edit_country(&country)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, Html(pages::not_found())).into_response(),
        Err(e) => render_error(e),
    }
}

#[instrument(skip(state, form))]
async fn edit_country(State(state): State<AppState>, Form(form): Form<CountryForm>) -> Response {
    match repo::update(&state.db, &form.into_country()).await {
        Ok(()) => Redirect::to("/un/countries").into_response(),
        Err(e) => render_error(e),
    }
}

#[instrument(skip(state))]
async fn delete_country(State(state): State<AppState>, Path(code): Path<String>) -> Response {
    match repo::delete(&state.db, &code).await {
        Ok(()) => Redirect::to("/un/countries").into_response(),
        Err(e) => render_error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::build_app;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn add_country_is_gated() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::post("/un/addCountry")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(
                        "a2code=CA&commonName=Canada&officialName=Canada",
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()["location"], "/login");
    }

    #[tokio::test]
    async fn delete_country_is_gated() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(
                Request::get("/un/deleteCountry/CA")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()["location"], "/login");
    }
}
