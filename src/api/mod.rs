use axum::{
    Router,
    extract::{
        Json, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use clap::{Args, ValueEnum};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::assets::AssetStore;
use crate::content::{
    Catalog, HomeScreen, LinkCard, NewsSource, NumberedTip, Section, SectionEntry, Story, menu,
};
use crate::core::{
    ANNUAL_INFLATION, MAX_HORIZON_MONTHS, MIN_HORIZON_MONTHS, MonthPoint, SimulationResult,
    SimulatorState, Strategy, format_currency, run_simulation,
};
use crate::error::{FinketError, Result};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliStrategy {
    FixedIncome,
    VariableIncome,
}

impl From<CliStrategy> for Strategy {
    fn from(value: CliStrategy) -> Self {
        match value {
            CliStrategy::FixedIncome => Strategy::FixedIncome,
            CliStrategy::VariableIncome => Strategy::VariableIncome,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
enum ApiStrategy {
    #[serde(alias = "fixedIncome", alias = "fixed_income", alias = "cetes")]
    FixedIncome,
    #[serde(
        alias = "variableIncome",
        alias = "variable_income",
        alias = "index-fund",
        alias = "indexFund"
    )]
    VariableIncome,
}

impl From<ApiStrategy> for CliStrategy {
    fn from(value: ApiStrategy) -> Self {
        match value {
            ApiStrategy::FixedIncome => CliStrategy::FixedIncome,
            ApiStrategy::VariableIncome => CliStrategy::VariableIncome,
        }
    }
}

impl From<Strategy> for ApiStrategy {
    fn from(value: Strategy) -> Self {
        match value {
            Strategy::FixedIncome => ApiStrategy::FixedIncome,
            Strategy::VariableIncome => ApiStrategy::VariableIncome,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SimulatePayload {
    goal_amount: Option<f64>,
    horizon_months: Option<u32>,
    initial_balance: Option<f64>,
    monthly_contribution: Option<f64>,
    strategy: Option<ApiStrategy>,
}

/// Simulator inputs as accepted on the command line. The HTTP payload is
/// applied on top of `SimulateArgs::default()`.
#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[arg(long = "goal", default_value_t = 0.0, help = "Savings goal in $")]
    pub goal_amount: f64,
    #[arg(
        long = "horizon",
        default_value_t = MIN_HORIZON_MONTHS,
        help = "Months to reach the goal (1-60)"
    )]
    pub horizon_months: u32,
    #[arg(long = "initial", default_value_t = 0.0, help = "Current savings in $")]
    pub initial_balance: f64,
    #[arg(
        long = "monthly",
        default_value_t = 0.0,
        help = "Contribution added at the start of every month in $"
    )]
    pub monthly_contribution: f64,
    #[arg(long, value_enum, default_value_t = CliStrategy::FixedIncome)]
    pub strategy: CliStrategy,
}

impl Default for SimulateArgs {
    fn default() -> Self {
        SimulateArgs {
            goal_amount: 0.0,
            horizon_months: MIN_HORIZON_MONTHS,
            initial_balance: 0.0,
            monthly_contribution: 0.0,
            strategy: CliStrategy::FixedIncome,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub assets_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
}

#[derive(Clone)]
struct AppState {
    catalog: Arc<Catalog>,
    assets: Arc<AssetStore>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulateResponse {
    strategy: ApiStrategy,
    strategy_label: &'static str,
    annual_rate: f64,
    inflation_rate: f64,
    horizon_months: u32,
    goal_amount: f64,
    balances: Vec<MonthPoint>,
    final_balance: f64,
    real_value: f64,
    final_balance_formatted: String,
    real_value_formatted: String,
    goal_reached: bool,
    message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StrategyOption {
    id: ApiStrategy,
    label: &'static str,
    annual_rate: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SimulatorBounds {
    min_horizon_months: u32,
    max_horizon_months: u32,
    inflation_rate: f64,
    strategies: Vec<StrategyOption>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentResponse<'a> {
    home: &'a HomeScreen,
    links: &'a [LinkCard],
    tips: Vec<NumberedTip<'a>>,
    news: &'a [NewsSource],
    story: &'a Story,
    simulator: SimulatorBounds,
    assets: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct SectionsResponse {
    sections: Vec<SectionEntry>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn build_state(args: SimulateArgs) -> Result<SimulatorState> {
    for (field, value) in [
        ("goalAmount", args.goal_amount),
        ("initialBalance", args.initial_balance),
        ("monthlyContribution", args.monthly_contribution),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(FinketError::invalid_input(field, "must be >= 0"));
        }
    }

    if !(MIN_HORIZON_MONTHS..=MAX_HORIZON_MONTHS).contains(&args.horizon_months) {
        return Err(FinketError::invalid_input(
            "horizonMonths",
            format!("must be between {MIN_HORIZON_MONTHS} and {MAX_HORIZON_MONTHS}"),
        ));
    }

    Ok(SimulatorState {
        goal_amount: args.goal_amount,
        horizon_months: args.horizon_months,
        initial_balance: args.initial_balance,
        monthly_contribution: args.monthly_contribution,
        strategy: args.strategy.into(),
    })
}

pub async fn run_http_server(config: ServerConfig) -> Result<()> {
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::load()?,
    };
    info!(
        "content catalog ready: {} links, {} tips, {} news sources",
        catalog.links.len(),
        catalog.tips.len(),
        catalog.news.len()
    );
    let assets = AssetStore::load(&config.assets_dir);

    let state = AppState {
        catalog: Arc::new(catalog),
        assets: Arc::new(assets),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    info!("Finket dashboard listening on http://{addr}");
    info!("Local access: http://127.0.0.1:{}/", config.port);

    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/assets/:name", get(asset_handler))
        .route("/api/sections", get(sections_handler))
        .route("/api/sections/:slug", get(section_handler))
        .route("/api/content", get(content_handler))
        .route(
            "/api/simulate",
            get(simulate_get_handler).post(simulate_post_handler),
        )
        .fallback(not_found_handler)
        .with_state(state)
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn asset_handler(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.assets.get(&name) {
        Some(bytes) => with_cache_control((
            [(header::CONTENT_TYPE, "image/png")],
            bytes.to_vec(),
        )),
        None => error_response(StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn sections_handler() -> Response {
    json_response(StatusCode::OK, SectionsResponse { sections: menu() })
}

async fn section_handler(Path(slug): Path<String>) -> Response {
    match Section::from_slug(&slug) {
        Some(section) => json_response(StatusCode::OK, SectionEntry::from(section)),
        None => error_response(StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn content_handler(State(state): State<AppState>) -> Response {
    json_response(
        StatusCode::OK,
        build_content_response(&state.catalog, state.assets.available()),
    )
}

async fn simulate_get_handler(
    payload: std::result::Result<Query<SimulatePayload>, QueryRejection>,
) -> Response {
    match payload {
        Ok(Query(payload)) => simulate_handler_impl(payload),
        Err(rejection) => error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    }
}

async fn simulate_post_handler(
    payload: std::result::Result<Json<SimulatePayload>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(payload)) => simulate_handler_impl(payload),
        Err(rejection) => error_response(StatusCode::BAD_REQUEST, &rejection.body_text()),
    }
}

fn simulate_handler_impl(payload: SimulatePayload) -> Response {
    let state = match simulator_state_from_payload(payload) {
        Ok(state) => state,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let result = run_simulation(&state);
    debug!(
        "simulated {} months with {:?}: final {:.2}, real {:.2}, goal reached {}",
        state.horizon_months,
        state.strategy,
        result.projection.final_balance,
        result.projection.real_value,
        result.goal_reached
    );
    json_response(StatusCode::OK, build_simulate_response(&result))
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn simulator_state_from_json(json: &str) -> Result<SimulatorState> {
    let payload = serde_json::from_str::<SimulatePayload>(json)?;
    simulator_state_from_payload(payload)
}

fn simulator_state_from_payload(payload: SimulatePayload) -> Result<SimulatorState> {
    let mut args = SimulateArgs::default();

    if let Some(v) = payload.goal_amount {
        args.goal_amount = v;
    }
    if let Some(v) = payload.horizon_months {
        args.horizon_months = v;
    }
    if let Some(v) = payload.initial_balance {
        args.initial_balance = v;
    }
    if let Some(v) = payload.monthly_contribution {
        args.monthly_contribution = v;
    }
    if let Some(v) = payload.strategy {
        args.strategy = v.into();
    }

    build_state(args)
}

fn build_simulate_response(result: &SimulationResult) -> SimulateResponse {
    let projection = &result.projection;
    SimulateResponse {
        strategy: result.strategy.into(),
        strategy_label: result.strategy.label(),
        annual_rate: result.annual_rate,
        inflation_rate: ANNUAL_INFLATION,
        horizon_months: projection.balances.len() as u32,
        goal_amount: result.goal_amount,
        balances: result.month_points(),
        final_balance: projection.final_balance,
        real_value: projection.real_value,
        final_balance_formatted: format_currency(projection.final_balance),
        real_value_formatted: format_currency(projection.real_value),
        goal_reached: result.goal_reached,
        message: result.message(),
    }
}

fn build_content_response<'a>(
    catalog: &'a Catalog,
    assets: Vec<&'static str>,
) -> ContentResponse<'a> {
    ContentResponse {
        home: &catalog.home,
        links: &catalog.links,
        tips: catalog.numbered_tips(),
        news: &catalog.news,
        story: &catalog.story,
        simulator: SimulatorBounds {
            min_horizon_months: MIN_HORIZON_MONTHS,
            max_horizon_months: MAX_HORIZON_MONTHS,
            inflation_rate: ANNUAL_INFLATION,
            strategies: Strategy::ALL
                .into_iter()
                .map(|s| StrategyOption {
                    id: s.into(),
                    label: s.label(),
                    annual_rate: s.annual_rate(),
                })
                .collect(),
        },
        assets,
    }
}

/// Runs one projection for the `simulate` subcommand and renders it either as
/// the JSON body `/api/simulate` would return or as a month table.
pub fn simulate_report(args: SimulateArgs, as_json: bool) -> Result<String> {
    let state = build_state(args)?;
    let result = run_simulation(&state);

    if as_json {
        return Ok(serde_json::to_string_pretty(&build_simulate_response(
            &result,
        ))?);
    }
    Ok(render_table(&result))
}

fn render_table(result: &SimulationResult) -> String {
    let projection = &result.projection;
    let mut lines = vec![
        format!(
            "Estrategia: {} ({:.0}% anual, inflación {:.1}%)",
            result.strategy.label(),
            result.annual_rate * 100.0,
            ANNUAL_INFLATION * 100.0
        ),
        format!("{:>5} {:>18}", "Mes", "Monto acumulado"),
    ];
    lines.extend(
        result
            .month_points()
            .into_iter()
            .map(|point| format!("{:>5} {:>18}", point.month, format_currency(point.balance))),
    );
    lines.push(format!(
        "Ahorro Final Estimado: {}",
        format_currency(projection.final_balance)
    ));
    lines.push(format!(
        "Valor Ajustado por Inflación: {}",
        format_currency(projection.real_value)
    ));
    lines.push(format!("Meta: {}", format_currency(result.goal_amount)));
    lines.push(result.message().to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
