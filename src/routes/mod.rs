use actix_files as fs;
use actix_web::{web, Error, HttpResponse, Responder};
use log::{info, warn};
use std::path::Path;

use crate::models::{AppState, RegisterRequest, RegisterResponse};
use crate::websocket::game_handlers::release_session;

/// Create a session and hand back the websocket URL to connect to.
pub async fn register(
    body: web::Json<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let username = body.username.trim();
    if username.is_empty() {
        warn!("Rejected registration with an empty username");
        return Ok(HttpResponse::BadRequest().body("username must not be empty"));
    }

    let session = app_state.register(username);
    Ok(HttpResponse::Ok().json(RegisterResponse {
        url: app_state.config.session_url(&session.id),
    }))
}

pub async fn unregister(path: web::Path<String>, app_state: web::Data<AppState>) -> HttpResponse {
    let session_id = path.into_inner();
    info!("Unregistering session {}", session_id);
    release_session(&app_state, &session_id);
    HttpResponse::Ok().finish()
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("All's good here!")
}

/// HTTP handler for the index page
pub async fn index(app_state: web::Data<AppState>) -> Result<fs::NamedFile, Error> {
    let path = Path::new(&app_state.config.static_dir).join("index.html");
    Ok(fs::NamedFile::open_async(path).await?)
}

/// Configure the HTTP routes
pub fn configure_routes(cfg: &mut web::ServiceConfig, static_dir: &str) {
    cfg.service(web::resource("/register").route(web::post().to(register)))
        .service(web::resource("/register/{session_id}").route(web::delete().to(unregister)))
        .service(web::resource("/ws/{session_id}").route(web::get().to(crate::websocket::ws_index)))
        .service(web::resource("/health").route(web::get().to(health)))
        .service(web::resource("/").route(web::get().to(index)))
        .service(fs::Files::new("/static", static_dir));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    use crate::config::Config;

    fn app_state() -> web::Data<AppState> {
        web::Data::new(AppState::new(Config::default()))
    }

    #[actix_web::test]
    async fn test_register_returns_session_url() {
        let state = app_state();
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(|cfg| configure_routes(cfg, "./static")),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(RegisterRequest {
                username: "ada".to_string(),
            })
            .to_request();
        let resp: RegisterResponse = test::call_and_read_body_json(&app, req).await;

        let session_id = resp.url.rsplit('/').next().unwrap();
        assert!(resp.url.starts_with("ws://127.0.0.1:8000/ws/"));
        assert_eq!(state.session(session_id).unwrap().identity, "ada");
    }

    #[actix_web::test]
    async fn test_register_rejects_blank_username() {
        let app = test::init_service(
            App::new()
                .app_data(app_state())
                .configure(|cfg| configure_routes(cfg, "./static")),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(RegisterRequest {
                username: "   ".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unregister_withdraws_waiting_session() {
        let state = app_state();
        let session = state.register("ada");
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(|cfg| configure_routes(cfg, "./static")),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri(&format!("/register/{}", session.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(state.session(&session.id).is_none());
        assert_eq!(state.matchmaker.lock().unwrap().waiting(), None);
    }

    #[actix_web::test]
    async fn test_ws_for_unknown_session_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(app_state())
                .configure(|cfg| configure_routes(cfg, "./static")),
        )
        .await;

        let req = test::TestRequest::get().uri("/ws/nobody").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(App::new().route("/health", web::get().to(health))).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "All's good here!");
    }
}
