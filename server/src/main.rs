mod config;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    // Missing upstream configuration aborts before binding; the proxy never
    // starts in a state where every forwarded request would fail.
    let config = config::UpstreamConfig::from_env().expect("upstream API configuration required");
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let upstream = services::upstream::Upstream::new(config);
    let state = state::AppState::new(upstream);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "roster proxy listening");
    axum::serve(listener, app).await.expect("server failed");
}
