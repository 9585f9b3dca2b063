use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::Html,
    routing::get,
    Json, Router,
};
use dataset::Dataset;
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{CountryCharts, DashboardView},
};
use tracing::{error, info};

mod config;
mod frontend;

use config::load_settings;

struct AppState {
    data: Dataset,
    view: DashboardView,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let data = Dataset::load(&settings.data_path).map_err(|error| {
        error!(
            path = %settings.data_path.display(),
            %error,
            "failed to load dataset; refusing to start"
        );
        error
    })?;
    let view = charts::dashboard_view(&data, &settings.default_country);

    let app = build_router(Arc::new(AppState { data, view }));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "dashboard listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/country/:country", get(get_country_charts))
        .fallback(not_found)
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(frontend::INDEX_HTML)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    Json(state.view.clone())
}

/// The dropdown-change channel: the page polls this on every selection. A
/// name that is not in the dataset still answers 200 with empty charts.
async fn get_country_charts(
    State(state): State<Arc<AppState>>,
    Path(country): Path<String>,
) -> Json<CountryCharts> {
    Json(charts::country_charts(&state.data, &country))
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(
            ErrorCode::NotFound,
            format!("no route for {uri}"),
        )),
    )
}
