//! Servidor web Axum: segmentação, idioma e tags via JSON, com WebSocket para
//! acompanhar o pipeline passo a passo.
//!
//! Variáveis de ambiente:
//! - `NL_CONFIG`: caminho de um arquivo TOML com a [`EngineConfig`].
//! - `NL_BIND`: endereço de escuta (sobrepõe `server.bind`).
//! - `RUST_LOG`: filtro de logs (padrão `info`).

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use nl_core::{
    corpus::demo_texts, Analysis, EngineConfig, Language, LanguageHints, NlError, NlPipeline,
    PipelineEvent, TagScheme, TokenOptions, Unit,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Estado compartilhado da aplicação
struct AppState {
    pipeline: NlPipeline,
}

#[derive(Deserialize)]
struct TokenizeRequest {
    text: String,
    #[serde(default)]
    unit: Unit,
    #[serde(default)]
    options: Option<TokenOptions>,
}

#[derive(Deserialize)]
struct IdentifyRequest {
    text: String,
    /// Peso por código de idioma, ex: `{"fr": 0.2}`.
    #[serde(default)]
    hints: BTreeMap<String, f64>,
    #[serde(default)]
    constraints: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct HypothesesRequest {
    text: String,
    #[serde(default)]
    max: Option<usize>,
    #[serde(default)]
    hints: BTreeMap<String, f64>,
    #[serde(default)]
    constraints: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct TagRequest {
    text: String,
    #[serde(default)]
    unit: Unit,
    scheme: TagScheme,
    #[serde(default)]
    options: Option<TokenOptions>,
}

/// Mensagem recebida pelo WebSocket e pelo `/analyze`
#[derive(Deserialize)]
struct AnalyzeRequest {
    text: String,
    #[serde(default)]
    options: Option<TokenOptions>,
}

#[derive(Serialize)]
struct IdentifyResponse {
    language: Option<Language>,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    #[serde(flatten)]
    analysis: Analysis,
    processing_ms: u64,
}

/// Erro de requisição: vira `400 {"error": "..."}`.
struct ApiError(NlError);

impl From<NlError> for ApiError {
    fn from(e: NlError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(error = %self.0, "requisição rejeitada");
        (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = serve().await {
        error!(error = %e, "servidor encerrado com erro");
        std::process::exit(1);
    }
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match std::env::var("NL_CONFIG") {
        Ok(path) => EngineConfig::from_file(Path::new(&path))?,
        Err(_) => EngineConfig::default(),
    };
    if let Ok(bind) = std::env::var("NL_BIND") {
        config.server.bind = bind;
    }
    let bind = config.server.bind.clone();

    let pipeline = NlPipeline::from_config(config)?;
    let state = Arc::new(AppState { pipeline });

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("Servidor iniciado em http://{bind}");
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/tokenize", post(tokenize_handler))
        .route("/identify", post(identify_handler))
        .route("/hypotheses", post(hypotheses_handler))
        .route("/tag", post(tag_handler))
        .route("/analyze", post(analyze_handler))
        .route("/ws", get(ws_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .layer(cors)
        .with_state(state)
}

/// Dicas e restrições chegam como códigos; código desconhecido é erro do cliente.
fn parse_languages(
    hints: &BTreeMap<String, f64>,
    constraints: Option<&[String]>,
) -> Result<(LanguageHints, Option<Vec<Language>>), NlError> {
    let mut parsed_hints = LanguageHints::new();
    for (code, &weight) in hints {
        parsed_hints.insert(Language::from_code(code)?, weight);
    }
    let parsed_constraints = constraints
        .map(|codes| codes.iter().map(|c| Language::from_code(c)).collect::<Result<Vec<_>, _>>())
        .transpose()?;
    Ok((parsed_hints, parsed_constraints))
}

async fn tokenize_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TokenizeRequest>,
) -> Json<Vec<nl_core::Token>> {
    let options = req.options.unwrap_or(state.pipeline.config().default_options);
    Json(nl_core::segment(&req.text, req.unit, options))
}

async fn identify_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<IdentifyRequest>,
) -> ApiResult<IdentifyResponse> {
    let (hints, constraints) = parse_languages(&req.hints, req.constraints.as_deref())?;
    let language = state
        .pipeline
        .recognizer()
        .identify_with(&req.text, &hints, constraints.as_deref());
    Ok(Json(IdentifyResponse { language }))
}

async fn hypotheses_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<HypothesesRequest>,
) -> ApiResult<nl_core::LanguageHypotheses> {
    let (hints, constraints) = parse_languages(&req.hints, req.constraints.as_deref())?;
    let max = req.max.unwrap_or(state.pipeline.config().default_hypotheses);
    Ok(Json(state.pipeline.recognizer().hypotheses_with(
        &req.text,
        max,
        &hints,
        constraints.as_deref(),
    )))
}

async fn tag_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TagRequest>,
) -> ApiResult<Vec<nl_core::TaggedRange>> {
    let options = req.options.unwrap_or(state.pipeline.config().default_options);
    let tags = state
        .pipeline
        .tagger()
        .tags(&req.text, req.unit, req.scheme, options)?;
    Ok(Json(tags))
}

/// Pipeline completo via HTTP POST (sem streaming)
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> ApiResult<AnalyzeResponse> {
    let start = Instant::now();
    let options = req.options.unwrap_or(state.pipeline.config().default_options);
    let analysis = state.pipeline.analyze_with_options(&req.text, options)?;
    Ok(Json(AnalyzeResponse {
        analysis,
        processing_ms: start.elapsed().as_millis() as u64,
    }))
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    let texts: Vec<serde_json::Value> = demo_texts()
        .iter()
        .map(|(name, text)| serde_json::json!({ "name": name, "text": text }))
        .collect();
    Json(texts)
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Recebe um texto (JSON `{text, options}` ou texto puro), executa o pipeline
/// e devolve cada [`PipelineEvent`] como uma mensagem JSON.
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(raw) => {
                let (text, options) = match serde_json::from_str::<AnalyzeRequest>(&raw) {
                    Ok(req) => (req.text, req.options),
                    Err(_) => (raw.to_string(), None),
                };
                let options = options.unwrap_or(state.pipeline.config().default_options);
                info!(bytes = text.len(), "analisando via WebSocket");

                // O pipeline é síncrono: roda fora do runtime
                let (tx, rx) = std::sync::mpsc::channel::<PipelineEvent>();
                let worker = Arc::clone(&state);
                let handle = tokio::task::spawn_blocking(move || {
                    worker.pipeline.analyze_streaming(&text, options, tx);
                });
                if let Err(e) = handle.await {
                    error!(error = %e, "pipeline interrompido");
                    return;
                }

                let events: Vec<PipelineEvent> = rx.try_iter().collect();
                for event in &events {
                    match serde_json::to_string(event) {
                        Ok(json) => {
                            if socket.send(Message::Text(json.into())).await.is_err() {
                                return; // cliente desconectou
                            }
                        }
                        Err(e) => warn!(error = %e, "evento não serializável descartado"),
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}
