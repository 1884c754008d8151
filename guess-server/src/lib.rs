use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::sync::Arc;
use warp::Filter;
use warp::hyper::body::Bytes;

use crate::auth::AuthService;
use crate::errors::ApiError;
use crate::service::GameService;
use guess_types::{ApiResponse, GuessRequest, Identity, PuzzlePayload};

pub mod auth;
pub mod config;
pub mod errors;
pub mod puzzle_source;
pub mod service;

const MAX_BODY_BYTES: u64 = 16 * 1024;

#[derive(Deserialize)]
struct SubredditQuery {
    #[serde(default)]
    q: String,
}

pub fn create_routes(
    service: Arc<GameService>,
    auth_service: Arc<AuthService>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let service_filter = warp::any().map({
        let service = service.clone();
        move || service.clone()
    });

    // Resolves the caller; failures are handed to the handler so they render as API errors
    let identity_filter = warp::header::optional::<String>("authorization").map({
        let auth_service = auth_service.clone();
        move |header: Option<String>| {
            auth_service
                .authenticate(header.as_deref())
                .map_err(ApiError::from)
        }
    });

    let json_body = warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::bytes());

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    let init = warp::path!("api" / "init")
        .and(warp::get())
        .and(identity_filter.clone())
        .and(service_filter.clone())
        .and_then(handle_init);

    let puzzle = warp::path!("api" / "puzzle")
        .and(warp::get())
        .and(identity_filter.clone())
        .and(service_filter.clone())
        .and_then(handle_puzzle);

    let guess = warp::path!("api" / "guess")
        .and(warp::post())
        .and(identity_filter.clone())
        .and(json_body.clone())
        .and(service_filter.clone())
        .and_then(handle_guess);

    let leaderboard = warp::path!("api" / "leaderboard")
        .and(warp::get())
        .and(identity_filter.clone())
        .and(service_filter.clone())
        .and_then(handle_leaderboard);

    let stats = warp::path!("api" / "stats")
        .and(warp::get())
        .and(identity_filter.clone())
        .and(service_filter.clone())
        .and_then(handle_stats);

    let subreddits = warp::path!("api" / "subreddits")
        .and(warp::get())
        .and(identity_filter.clone())
        .and(warp::query::<SubredditQuery>())
        .and(service_filter.clone())
        .and_then(handle_subreddits);

    let set_puzzle = warp::path!("api" / "admin" / "set-puzzle")
        .and(warp::post())
        .and(identity_filter.clone())
        .and(json_body.clone())
        .and(service_filter.clone())
        .and_then(handle_set_puzzle);

    let reset = warp::path!("api" / "reset")
        .and(warp::post())
        .and(identity_filter.clone())
        .and(service_filter.clone())
        .and_then(handle_reset);

    let refresh_puzzle = warp::path!("api" / "admin" / "refresh-puzzle")
        .and(warp::post())
        .and(identity_filter.clone())
        .and(service_filter.clone())
        .and_then(handle_refresh_puzzle);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type", "authorization"])
        .allow_methods(vec!["GET", "POST"]);

    health
        .or(init)
        .or(puzzle)
        .or(guess)
        .or(leaderboard)
        .or(stats)
        .or(subreddits)
        .or(set_puzzle)
        .or(reset)
        .or(refresh_puzzle)
        .recover(handle_rejection)
        .with(cors)
        .with(warp::log("subreddit_guess"))
}

type IdentityResult = Result<Identity, ApiError>;

fn into_reply(result: Result<ApiResponse, ApiError>) -> warp::reply::WithStatus<warp::reply::Json> {
    match result {
        Ok(response) => warp::reply::with_status(
            warp::reply::json(&response),
            warp::http::StatusCode::OK,
        ),
        Err(err) => {
            tracing::debug!("Request failed: {}", err);
            warp::reply::with_status(warp::reply::json(&err.to_response()), err.status())
        }
    }
}

/// Renders warp's own rejections (unknown route, wrong method, body limits) as API errors.
async fn handle_rejection(rejection: warp::Rejection) -> Result<impl warp::Reply, Infallible> {
    Ok(into_reply(Err(ApiError::from(rejection))))
}

fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))
}

async fn handle_init(
    identity: IdentityResult,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = async {
        let identity = identity?;
        service.init(&identity).await.map(ApiResponse::Init)
    }
    .await;
    Ok(into_reply(result))
}

async fn handle_puzzle(
    identity: IdentityResult,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = async {
        let identity = identity?;
        service.puzzle(&identity).await.map(ApiResponse::Puzzle)
    }
    .await;
    Ok(into_reply(result))
}

async fn handle_guess(
    identity: IdentityResult,
    body: Bytes,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = async {
        let identity = identity?;
        let request: GuessRequest = parse_body(&body)?;
        service
            .submit_guess(&identity, &request.guess)
            .await
            .map(ApiResponse::Guess)
    }
    .await;
    Ok(into_reply(result))
}

async fn handle_leaderboard(
    identity: IdentityResult,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = async {
        let identity = identity?;
        service
            .leaderboard(&identity)
            .await
            .map(ApiResponse::Leaderboard)
    }
    .await;
    Ok(into_reply(result))
}

async fn handle_stats(
    identity: IdentityResult,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = async {
        let identity = identity?;
        service.stats(&identity).await.map(ApiResponse::Stats)
    }
    .await;
    Ok(into_reply(result))
}

async fn handle_subreddits(
    identity: IdentityResult,
    query: SubredditQuery,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result =
        identity.map(|_| ApiResponse::Subreddits(service.suggestions(&query.q)));
    Ok(into_reply(result))
}

async fn handle_set_puzzle(
    identity: IdentityResult,
    body: Bytes,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = async {
        let identity = identity?;
        let payload: PuzzlePayload = parse_body(&body)?;
        service
            .set_puzzle(&identity, payload)
            .await
            .map(ApiResponse::PuzzleSet)
    }
    .await;
    Ok(into_reply(result))
}

async fn handle_reset(
    identity: IdentityResult,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = async {
        let identity = identity?;
        service.reset(&identity).await.map(ApiResponse::Reset)
    }
    .await;
    Ok(into_reply(result))
}

async fn handle_refresh_puzzle(
    identity: IdentityResult,
    service: Arc<GameService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let result = async {
        let identity = identity?;
        service
            .refresh_puzzle(&identity)
            .await
            .map(ApiResponse::PuzzleRefreshed)
    }
    .await;
    Ok(into_reply(result))
}
