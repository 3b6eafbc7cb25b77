//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, DATA_FILE (snapshot path), ADMIN_USER, ADMIN_PASSWORD.

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{self, Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::RwLock;
use tournament_fixture_web::{
    apply_match_update, generate_fixtures, groups_csv, import_players_csv, match_results_csv,
    players_csv, storage, upload_custom_fixtures, CategoryFixture, FixtureError, GroupingError,
    MatchUpdate, StatusRequest, TournamentData, TournamentSettings,
};
use uuid::Uuid;

/// Server state: the single tournament aggregate plus where to snapshot it.
struct AppState {
    data: RwLock<TournamentData>,
    snapshot_path: PathBuf,
    admin_user: String,
    admin_password: String,
}

type State = Data<AppState>;

const ADMIN_SESSION_KEY: &str = "admin";

/// Actor label recorded in match audit history for dashboard edits.
const ADMIN_ACTOR: &str = "Admin";

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct PlayerBody {
    name: String,
    mobile: String,
    categories: Vec<String>,
    #[serde(default)]
    fee_paid: bool,
}

#[derive(Deserialize)]
struct GenerateFixturesBody {
    category: String,
    tournament_type: String,
}

/// One field per update, mirroring the admin score table (score1 | score2 | status).
#[derive(Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
enum MatchUpdateBody {
    Score1 { value: Option<i64> },
    Score2 { value: Option<i64> },
    Status { value: StatusRequest },
}

impl From<MatchUpdateBody> for MatchUpdate {
    fn from(body: MatchUpdateBody) -> Self {
        match body {
            MatchUpdateBody::Score1 { value } => MatchUpdate::Score1(value),
            MatchUpdateBody::Score2 { value } => MatchUpdate::Score2(value),
            MatchUpdateBody::Status { value } => MatchUpdate::Status(value),
        }
    }
}

/// Path segment: player id (e.g. /api/tournament/players/{player_id})
#[derive(Deserialize)]
struct PlayerPath {
    player_id: Uuid,
}

/// Path segment: match id (e.g. /api/tournament/matches/{match_id})
#[derive(Deserialize)]
struct MatchPath {
    match_id: Uuid,
}

/// Admin mutations require a logged-in session.
fn require_admin(session: &Session) -> Result<(), HttpResponse> {
    match session.get::<bool>(ADMIN_SESSION_KEY) {
        Ok(Some(true)) => Ok(()),
        _ => Err(HttpResponse::Unauthorized()
            .json(serde_json::json!({ "error": "Admin login required" }))),
    }
}

/// Write the aggregate snapshot; failures are logged, never fatal.
fn persist(state: &AppState, data: &TournamentData) {
    if let Err(e) = storage::save(&state.snapshot_path, data) {
        log::warn!(
            "Failed to persist snapshot {}: {}",
            state.snapshot_path.display(),
            e
        );
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-fixture-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Log in as admin; credentials come from ADMIN_USER / ADMIN_PASSWORD env.
#[post("/api/admin/login")]
async fn api_admin_login(state: State, session: Session, body: Json<LoginBody>) -> HttpResponse {
    if body.username != state.admin_user || body.password != state.admin_password {
        return HttpResponse::Unauthorized()
            .json(serde_json::json!({ "error": "Invalid username or password" }));
    }
    if session.insert(ADMIN_SESSION_KEY, true).is_err() {
        return HttpResponse::InternalServerError().body("session error");
    }
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}

#[post("/api/admin/logout")]
async fn api_admin_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}

/// Full aggregate for the admin dashboard.
#[get("/api/tournament")]
async fn api_get_tournament(state: State, session: Session) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let g = match state.data.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(&*g)
}

/// Spectator read path: the published snapshot, or 404 until publishing.
#[get("/api/tournament/published")]
async fn api_get_published(state: State) -> HttpResponse {
    let g = match state.data.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if !g.is_published {
        return HttpResponse::NotFound()
            .json(serde_json::json!({ "error": "Tournament not published yet" }));
    }
    HttpResponse::Ok().json(&*g)
}

/// Save tournament settings (name, types, categories, group size bounds).
#[put("/api/tournament/settings")]
async fn api_update_settings(
    state: State,
    session: Session,
    body: Json<TournamentSettings>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let mut g = match state.data.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.update_settings(body.into_inner()) {
        Ok(()) => {
            persist(&state, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Register a player (unique mobile number, 1-2 defined categories).
#[post("/api/tournament/players")]
async fn api_add_player(state: State, session: Session, body: Json<PlayerBody>) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let mut g = match state.data.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let body = body.into_inner();
    match g.add_player(body.name, body.mobile, body.categories, body.fee_paid) {
        Ok(_) => {
            persist(&state, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Edit a player's registration.
#[put("/api/tournament/players/{player_id}")]
async fn api_update_player(
    state: State,
    session: Session,
    path: Path<PlayerPath>,
    body: Json<PlayerBody>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let mut g = match state.data.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let body = body.into_inner();
    match g.update_player(
        path.player_id,
        body.name,
        body.mobile,
        body.categories,
        body.fee_paid,
    ) {
        Ok(()) => {
            persist(&state, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Delete a player; cascades into every fixture (groups, matches, empty fixtures).
#[delete("/api/tournament/players/{player_id}")]
async fn api_delete_player(state: State, session: Session, path: Path<PlayerPath>) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let mut g = match state.data.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.delete_player(path.player_id) {
        Ok(()) => {
            persist(&state, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Bulk import players from a CSV body (Name, MobileNumber, Categories, Paid(Y/N)).
/// Bad rows are skipped and reported; accepted rows are added.
#[post("/api/tournament/players/import")]
async fn api_import_players(state: State, session: Session, body: Bytes) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let csv_text = String::from_utf8_lossy(&body);
    let mut g = match state.data.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match import_players_csv(&mut g, &csv_text) {
        Ok(report) => {
            persist(&state, &g);
            HttpResponse::Ok().json(report)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Generate groups and round-robin matches for one (category, type) pair,
/// replacing any previous fixture under the same key.
#[post("/api/tournament/fixtures/generate")]
async fn api_generate_fixtures(
    state: State,
    session: Session,
    body: Json<GenerateFixturesBody>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let mut g = match state.data.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match generate_fixtures(
        &mut g,
        &body.category,
        &body.tournament_type,
        &mut rand::thread_rng(),
    ) {
        Ok(()) => {
            persist(&state, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(FixtureError::Grouping(e @ GroupingError::SizeInvariantViolation { .. })) => {
            log::error!("Fixture generation invariant violation: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": e.to_string() }))
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Upload custom fixtures (JSON array of fixtures), replacing by (category, type).
#[post("/api/tournament/fixtures/upload")]
async fn api_upload_fixtures(
    state: State,
    session: Session,
    body: Json<Vec<CategoryFixture>>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let mut g = match state.data.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match upload_custom_fixtures(&mut g, body.into_inner()) {
        Ok(()) => {
            persist(&state, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Update one field of a match (score1, score2, or status) with audit history.
#[put("/api/tournament/matches/{match_id}")]
async fn api_update_match(
    state: State,
    session: Session,
    path: Path<MatchPath>,
    body: Json<MatchUpdateBody>,
) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let mut g = match state.data.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let update = MatchUpdate::from(body.into_inner());
    let m = match g.get_match_mut(path.match_id) {
        Some(m) => m,
        None => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "Match not found" }))
        }
    };
    match apply_match_update(m, update, ADMIN_ACTOR) {
        Ok(changed) => {
            if changed {
                persist(&state, &g);
            }
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Make the tournament visible to spectators.
#[post("/api/tournament/publish")]
async fn api_publish(state: State, session: Session) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let mut g = match state.data.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.publish() {
        Ok(()) => {
            persist(&state, &g);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

fn csv_response(result: Result<String, csv::Error>, filename: &str) -> HttpResponse {
    match result {
        Ok(text) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", filename),
            ))
            .body(text),
        Err(e) => {
            log::error!("CSV export failed: {}", e);
            HttpResponse::InternalServerError()
                .json(serde_json::json!({ "error": "Export failed" }))
        }
    }
}

#[get("/api/export/players.csv")]
async fn api_export_players(state: State, session: Session) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let g = match state.data.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    csv_response(players_csv(&g), "players_data.csv")
}

#[get("/api/export/groups.csv")]
async fn api_export_groups(state: State, session: Session) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let g = match state.data.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    csv_response(groups_csv(&g), "fixtures_groups_data.csv")
}

#[get("/api/export/matches.csv")]
async fn api_export_matches(state: State, session: Session) -> HttpResponse {
    if let Err(resp) = require_admin(&session) {
        return resp;
    }
    let g = match state.data.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    csv_response(match_results_csv(&g), "match_results_data.csv")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);

    let snapshot_path = PathBuf::from(
        std::env::var("DATA_FILE").unwrap_or_else(|_| "tournament.json".to_string()),
    );
    let data = storage::load(&snapshot_path);
    log::info!(
        "Loaded tournament \"{}\" ({} players, {} fixtures) from {}",
        data.settings.name,
        data.players.len(),
        data.fixtures.len(),
        snapshot_path.display()
    );
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(AppState {
        data: RwLock::new(data),
        snapshot_path,
        admin_user: std::env::var("ADMIN_USER").unwrap_or_else(|_| "admin".to_string()),
        admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "password".to_string()),
    });

    // Fresh key per boot: admin sessions do not survive a restart.
    let session_key = Key::generate();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_admin_login)
            .service(api_admin_logout)
            .service(api_get_published)
            .service(api_get_tournament)
            .service(api_update_settings)
            .service(api_import_players)
            .service(api_add_player)
            .service(api_update_player)
            .service(api_delete_player)
            .service(api_generate_fixtures)
            .service(api_upload_fixtures)
            .service(api_update_match)
            .service(api_publish)
            .service(api_export_players)
            .service(api_export_groups)
            .service(api_export_matches)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
