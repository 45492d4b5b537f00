use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use bienestar_who5::config::AppConfig;
use bienestar_who5::error::AppError;
use bienestar_who5::telemetry;
use bienestar_who5::who5::{
    survey_router, Answer, AnswerSet, MemorySurveyStore, SurveyService, Who5Engine,
};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Bienestar WHO-5",
    about = "Run the WHO-5 wellbeing survey service or score an answer set from the command line",
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
    /// Score five WHO-5 answers offline and print the classification
    Score(ScoreArgs),
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

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Five answer values 0-5 in question order, comma separated (e.g. 5,4,3,2,1)
    #[arg(long, value_parser = parse_answers)]
    answers: AnswerValues,
}

#[derive(Debug, Clone)]
struct AnswerValues(Vec<Answer>);

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
        Command::Score(args) => run_score(args),
    }
}

fn parse_answers(raw: &str) -> Result<AnswerValues, String> {
    raw.split(',')
        .enumerate()
        .map(|(index, part)| {
            let value = part
                .trim()
                .parse::<u8>()
                .map_err(|err| format!("failed to parse '{part}' as an answer value ({err})"))?;
            Ok(Answer {
                question_number: index as u8 + 1,
                value,
            })
        })
        .collect::<Result<Vec<Answer>, String>>()
        .map(AnswerValues)
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
    };

    // Demo store: a deployment swaps this for the real record store.
    let store = Arc::new(MemorySurveyStore::default());
    let service = Arc::new(SurveyService::new(store, config.scoring));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(survey_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "wellbeing survey service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = Who5Engine::new(config.scoring);

    let answers = AnswerSet::new(args.answers.0)?;
    let outcome = engine.evaluate(&answers);
    let tier = engine.classify(outcome.final_score);

    println!("WHO-5 score report");
    println!(
        "Raw score: {}/25, final score: {}/100",
        outcome.raw_score.value(),
        outcome.final_score.value()
    );
    println!("Tier: {} ({})", tier.nivel, tier.categoria.label());
    println!("Guidance: {}", tier.mensaje);

    match outcome.priority {
        Some(priority) if outcome.is_alert => {
            println!(
                "Alert: follow-up required, priority {}",
                priority.label()
            );
        }
        _ => println!("Alert: none"),
    }

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

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
