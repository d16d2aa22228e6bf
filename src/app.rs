use crate::config::Config;
use crate::error::ApiError;
use crate::resolve;
use crate::store::DataStore;
use anyhow::{Context, Result};
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DataStore>,
}

impl AppState {
    pub fn new(store: DataStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub async fn run_server(config: Config) -> Result<()> {
    let store = DataStore::load(&config.movies_file, &config.pages_file)
        .context("Failed to load movie data")?;
    let app = build_router(AppState::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server is running at http://localhost:{}", config.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/:page", get(get_page))
        .route("/search", get(search_movies))
        .route("/movie/:id", get(get_movie))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn get_page(
    State(state): State<AppState>,
    page: Result<Path<String>, PathRejection>,
) -> Response {
    let Path(page) = match page {
        Ok(p) => p,
        Err(e) => return ApiError::InvalidPage(e.body_text()).into_response(),
    };
    match resolve::resolve_page(&state.store, &page) {
        Ok(body) => Json(body).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn search_movies(
    State(state): State<AppState>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(p) => p,
        Err(e) => return ApiError::InvalidQuery(e.body_text()).into_response(),
    };
    let query = search_term(&params);
    Json(resolve::search(&state.store, query)).into_response()
}

// A repeated `query` key uses its first value; a missing one searches for "".
fn search_term(params: &[(String, String)]) -> &str {
    params
        .iter()
        .find(|(key, _)| key == "query")
        .map(|(_, value)| value.as_str())
        .unwrap_or("")
}

async fn get_movie(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(p) => p,
        Err(e) => return ApiError::InvalidMovieId(e.body_text()).into_response(),
    };
    match resolve::find_movie(&state.store, &id) {
        Ok(movie) => Json(movie).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut term = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        term.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn search_term_takes_first_query_value() {
        assert_eq!(search_term(&pairs(&[("query", "a"), ("query", "b")])), "a");
        assert_eq!(search_term(&pairs(&[("lang", "en"), ("query", "heat")])), "heat");
    }

    #[test]
    fn search_term_defaults_to_empty() {
        assert_eq!(search_term(&pairs(&[])), "");
        assert_eq!(search_term(&pairs(&[("page", "2")])), "");
    }
}
