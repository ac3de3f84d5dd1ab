use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use pr_manager::config::{AppConfig, ServiceIdentity};
use pr_manager::error::AppError;
use pr_manager::review::{
    review_router, CreatePullRequestInput, CreateTeamInput, InMemoryStore, MergePullRequestInput,
    MetricsSink, ReassignReviewerInput, ReviewService, TeamMemberDto, ThreadRngPicker,
};
use pr_manager::telemetry;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
    identity: ServiceIdentity,
}

#[derive(Parser, Debug)]
#[command(
    name = "pr-manager",
    about = "Assign and reassign pull request reviewers across engineering teams",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run an offline reviewer-assignment walkthrough against an in-process store
    Demo,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Demo => run_demo(),
    }
}

fn build_service(
    store: &InMemoryStore,
) -> ReviewService<InMemoryStore, InMemoryStore, InMemoryStore, ThreadRngPicker, MetricsSink> {
    ReviewService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        ThreadRngPicker,
        Arc::new(MetricsSink),
    )
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
        identity: config.identity.clone(),
    };

    let store = InMemoryStore::new();
    let service = Arc::new(build_service(&store));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/stats", get(stats_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(review_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "pr manager ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_demo() -> Result<(), AppError> {
    let store = InMemoryStore::new();
    let service = build_service(&store);

    let member = |id: &str, name: &str, active: bool| TeamMemberDto {
        user_id: id.to_string(),
        username: name.to_string(),
        is_active: active,
    };

    let team = service.create_team(CreateTeamInput {
        team_name: "payments".to_string(),
        members: vec![
            member("u1", "ann", true),
            member("u2", "bob", true),
            member("u3", "cody", true),
            member("u4", "dana", false),
        ],
    })?;
    println!(
        "Created team {} with {} members",
        team.team_name,
        team.members.len()
    );

    let pr = service.create_pull_request(CreatePullRequestInput {
        pull_request_id: "pr-1".to_string(),
        pull_request_name: "Fix rounding in invoice totals".to_string(),
        author_id: "u1".to_string(),
    })?;
    println!(
        "Opened {} by {}; reviewers: {:?}",
        pr.pull_request_id, pr.author_id, pr.assigned_reviewers
    );

    let outgoing = pr.assigned_reviewers[0].clone();
    match service.reassign_reviewer(ReassignReviewerInput {
        pull_request_id: "pr-1".to_string(),
        old_user_id: outgoing.clone(),
    }) {
        Ok(result) => println!(
            "Swapped {} for {}; reviewers now {:?}",
            outgoing, result.replaced_by, result.pr.assigned_reviewers
        ),
        Err(err) => println!("Could not swap {outgoing}: {err}"),
    }

    let merged = service.merge_pull_request(MergePullRequestInput {
        pull_request_id: "pr-1".to_string(),
    })?;
    println!(
        "Merged {}; final status {}",
        merged.pull_request_id, merged.status
    );

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn stats_endpoint(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "service": state.identity.name,
        "version": state.identity.version,
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
