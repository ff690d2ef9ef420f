use actix_cors::Cors;
use actix_web::{
    dev::Server, http::header, http::StatusCode, middleware, web, App,
    HttpRequest, HttpResponse, HttpServer,
};

use crate::{
    configuration::{AppState, State},
    error::Error,
    handler::dispatch,
    types::{ApiEvent, ApiResponse},
};

pub async fn server_task(app_state: &AppState<State>) -> Result<(), Error> {
    let app = app_state.clone();
    tokio::spawn(async move {
        let server = init_server(app)?;
        server.await?;
        Ok(())
    })
    .await?
}

fn init_server(app_state: AppState<State>) -> Result<Server, Error> {
    let host = app_state.config.server_host.to_owned();
    let port = app_state.config.port;

    let server = HttpServer::new(move || {
        let app = app_state.clone();
        let allowed_cors = String::from("*");
        let cors_access_all =
            app.config.allowed_origins.contains(&allowed_cors);
        let cors = Cors::default()
            .allowed_origin_fn(move |origin, _| {
                if cors_access_all {
                    return true;
                }
                let allowed = &app.config.allowed_origins;
                if let Ok(origin) = origin.to_str() {
                    return allowed.contains(&origin.to_owned());
                }
                false
            })
            .allow_any_method()
            .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT])
            .allowed_header(header::CONTENT_TYPE);

        App::new()
            .wrap(cors)
            .wrap(middleware::Compress::default())
            .app_data(web::Data::new(app_state.clone()))
            .configure(configure)
    })
    .bind((host, port))?
    .run();
    Ok(server)
}

/// Every request, whatever its method or path, goes through the router.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.default_service(web::to(index));
}

async fn index(
    request: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState<State>>,
) -> Result<HttpResponse, Error> {
    let event = ApiEvent {
        path: request.path().to_owned(),
        httpMethod: Some(request.method().to_string()),
        body: if body.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&body).into_owned())
        },
    };

    let response = dispatch(&state, &event).await;
    to_http_response(response)
}

fn to_http_response(response: ApiResponse) -> Result<HttpResponse, Error> {
    let status = StatusCode::from_u16(response.statusCode).map_err(|e| {
        Error::ServerError(format!(
            "Invalid status code {}: {}",
            response.statusCode, e
        ))
    })?;

    Ok(HttpResponse::build(status)
        .content_type("application/json")
        .body(response.body))
}
