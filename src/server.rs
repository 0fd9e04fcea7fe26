use crate::{
    config::Config,
    endpoint::{EndpointReply, ProcessingEndpoint, ReplyStatus},
    error::GenEditError,
    provider::{GeminiClient, GenerationModel},
    validation::MAX_IMAGE_BYTES,
};
use actix_web::{http::StatusCode, middleware::Logger, web, App, HttpResponse, HttpServer};
use std::sync::Arc;

/// Room for a maximum-size image after base64 expansion plus the JSON around it.
/// Bigger bodies are refused unread and answered with a 400 error body.
pub const MAX_BODY_BYTES: usize = (MAX_IMAGE_BYTES as usize) * 2;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .route("/", web::get().to(index))
        .route("/api/process", web::post().to(process));
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().body("genedit is running")
}

async fn process(
    endpoint: web::Data<ProcessingEndpoint>,
    body: Result<web::Bytes, actix_web::Error>,
) -> HttpResponse {
    let reply = match body {
        Ok(body) => endpoint.handle(&body).await,
        Err(e) => EndpointReply::from_error(&GenEditError::BadRequest(format!(
            "request body rejected: {}",
            e
        ))),
    };
    respond(reply)
}

fn respond(reply: EndpointReply) -> HttpResponse {
    let status = match reply.status {
        ReplyStatus::Ok => StatusCode::OK,
        ReplyStatus::BadRequest => StatusCode::BAD_REQUEST,
        ReplyStatus::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    };
    HttpResponse::build(status).json(reply.body)
}

pub async fn run(config: Config) -> std::io::Result<()> {
    let model: Arc<dyn GenerationModel> = Arc::new(GeminiClient::new(&config));
    let endpoint = web::Data::new(ProcessingEndpoint::new(model));

    log::info!("🔧 Serving model {} at POST /api/process", endpoint.model_id());

    HttpServer::new(move || {
        App::new()
            .app_data(endpoint.clone())
            .wrap(Logger::new("%r %s %Dms"))
            .configure(configure)
    })
    .bind(config.bind_addr())?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::tests::FakeModel;
    use crate::models::{GenerationResponse, MediaArtifact, ModelOutput};
    use actix_web::{http::header, test};
    use serde_json::{json, Value};

    fn endpoint_with(model: Arc<FakeModel>) -> web::Data<ProcessingEndpoint> {
        web::Data::new(ProcessingEndpoint::new(model))
    }

    #[actix_web::test]
    async fn process_returns_the_success_shape() {
        let model = FakeModel::answering(ModelOutput {
            text: Some("a circle".into()),
            artifacts: vec![MediaArtifact::new("image/png", "PNGDATA")],
        });
        let app = test::init_service(
            App::new()
                .app_data(endpoint_with(model))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/process")
            .set_json(json!({ "prompt": "a red circle" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "success": true,
                "outputImage": "PNGDATA",
                "outputPrompt": "a circle",
                "status": "success"
            })
        );
    }

    #[actix_web::test]
    async fn provider_failure_is_http_500() {
        let app = test::init_service(
            App::new()
                .app_data(endpoint_with(FakeModel::failing("model unavailable")))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/process")
            .set_json(json!({ "prompt": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: GenerationResponse = test::read_body_json(resp).await;
        assert_eq!(
            body,
            GenerationResponse::error("Provider error: model unavailable")
        );
    }

    #[actix_web::test]
    async fn missing_prompt_is_http_400() {
        let model = FakeModel::answering(ModelOutput::default());
        let app = test::init_service(
            App::new()
                .app_data(endpoint_with(model.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/process")
            .set_json(json!({ "imageData": null }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["status"], json!("error"));
        assert_eq!(model.call_count(), 0);
    }

    #[actix_web::test]
    async fn oversized_body_gets_an_error_body() {
        let model = FakeModel::answering(ModelOutput::default());
        let app = test::init_service(
            App::new()
                .app_data(endpoint_with(model.clone()))
                .configure(configure),
        )
        .await;

        let raw = format!(
            r#"{{"prompt":"x","imageData":{{"fileName":"a.png","fileSize":1,"fileType":"image/png","base64Data":"{}"}}}}"#,
            "A".repeat(MAX_BODY_BYTES)
        );
        let req = test::TestRequest::post()
            .uri("/api/process")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload(raw)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: GenerationResponse = test::read_body_json(resp).await;
        assert!(!body.is_success());
        assert_eq!(model.call_count(), 0);
    }

    #[actix_web::test]
    async fn null_image_data_is_http_400() {
        let model = FakeModel::answering(ModelOutput::default());
        let app = test::init_service(
            App::new()
                .app_data(endpoint_with(model.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/process")
            .set_json(json!({ "prompt": "a red circle", "imageData": null }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: GenerationResponse = test::read_body_json(resp).await;
        assert!(!body.is_success());
        assert_eq!(model.call_count(), 0);
    }
}
