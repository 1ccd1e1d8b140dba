use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    AuthFailureResponse, ErrorResponse, FavoriteActionResponse, FavoriteListResponse,
    FavoritePayload,
};
use crate::routes::tenders::AppState;
use crate::services::{bearer_token, AuthError};

/// Configure the favorites routes; every handler requires a bearer token
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/favorites", web::post().to(add_favorite))
        .route("/favorites", web::get().to(list_favorites))
        .route("/favorites/{tender_id}", web::delete().to(remove_favorite));
}

/// Resolve the request's bearer identity, or the 401 to return instead.
///
/// Verification failures never touch the store.
fn authorize(state: &AppState, req: &HttpRequest) -> Result<String, HttpResponse> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token);

    let token = match token {
        Some(token) => token,
        None => return Err(unauthorized("Invalid token")),
    };

    state.verifier.resolve(token).map_err(|e| match e {
        AuthError::ExpiredToken => unauthorized("Token expired"),
        AuthError::InvalidToken => unauthorized("Invalid token"),
    })
}

fn unauthorized(error: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(AuthFailureResponse {
        success: false,
        error: error.to_string(),
    })
}

/// Add a tender to the caller's favorites
///
/// POST /api/favorites
///
/// Returns `{"success": false}` when the id is already saved; the set never
/// holds an id twice.
async fn add_favorite(
    state: web::Data<AppState>,
    req: HttpRequest,
    payload: web::Json<FavoritePayload>,
) -> impl Responder {
    let identity = match authorize(&state, &req) {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    if let Err(errors) = payload.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let entry = payload.into_inner().into_entry();
    let tender_id = entry.id.clone();
    let success = state.favorites.add(&identity, entry).await;

    tracing::debug!("Add favorite {} for {}: {}", tender_id, identity, success);

    HttpResponse::Ok().json(FavoriteActionResponse { success })
}

/// Remove a tender from the caller's favorites
///
/// DELETE /api/favorites/{tender_id}
async fn remove_favorite(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> impl Responder {
    let identity = match authorize(&state, &req) {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    let tender_id = path.into_inner();
    let success = state.favorites.remove(&identity, &tender_id).await;

    tracing::debug!("Remove favorite {} for {}: {}", tender_id, identity, success);

    HttpResponse::Ok().json(FavoriteActionResponse { success })
}

/// List the caller's favorites in insertion order
///
/// GET /api/favorites
async fn list_favorites(state: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let identity = match authorize(&state, &req) {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    let favorites = state.favorites.list(&identity).await;

    HttpResponse::Ok().json(FavoriteListResponse {
        success: true,
        favorites,
    })
}
