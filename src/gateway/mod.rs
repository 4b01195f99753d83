pub mod image_client;
pub mod transport;
pub mod vision_client;

use crate::{config::GatewayConfig, error::Result};

pub use image_client::ImageClient;
pub use transport::{classify_failure, ChatTransport};
pub use vision_client::VisionClient;

/// Both gateway-backed providers sharing one HTTP connection pool.
#[derive(Clone)]
pub struct GatewayClient {
    vision_client: VisionClient,
    image_client: ImageClient,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let transport = ChatTransport::new(config)?;

        if !config.has_credentials() {
            log::warn!("AI_GATEWAY_API_KEY is not set; analysis requests will fail until it is configured");
        }

        Ok(Self {
            vision_client: VisionClient::new(transport.clone(), config.vision_model.clone()),
            image_client: ImageClient::new(transport, config.image_model.clone()),
        })
    }

    pub fn vision(&self) -> &VisionClient {
        &self.vision_client
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analyzer::{RoomAnalyzer, IMAGE_ADVISORY},
        error::RoomGenError,
        models::AnalyzeRoomRequest,
        providers::{ImageGenerationProvider, VisionCritiqueProvider},
    };
    use actix_web::{
        dev::ServerHandle,
        http::{header, StatusCode},
        web, App, HttpRequest, HttpResponse, HttpServer,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;

    const API_KEY: &str = "sk-test";
    const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

    /// Maps a decoded chat-completion request to the status and body to answer with.
    type Route = fn(&Value) -> (u16, Value);

    /// Serves `route` on an ephemeral local port, answering 401 to any call
    /// that lacks the expected bearer credential.
    fn start_gateway(route: Route) -> (String, ServerHandle) {
        let server = HttpServer::new(move || {
            App::new().route(
                "/v1/chat/completions",
                web::post().to(move |req: HttpRequest, body: web::Json<Value>| async move {
                    let bearer = req
                        .headers()
                        .get(header::AUTHORIZATION)
                        .and_then(|value| value.to_str().ok());
                    if bearer != Some("Bearer sk-test") {
                        return HttpResponse::Unauthorized().json(json!({ "error": "bad key" }));
                    }
                    let (status, reply) = route(&body);
                    HttpResponse::build(StatusCode::from_u16(status).unwrap()).json(reply)
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        (format!("http://{}/v1/chat/completions", addr), handle)
    }

    fn client_for(endpoint: &str) -> GatewayClient {
        GatewayClient::new(
            &GatewayConfig::new()
                .with_api_key(API_KEY)
                .with_endpoint(endpoint)
                .with_models("vision-test", "image-test")
                .with_timeout_secs(5),
        )
        .unwrap()
    }

    fn text_reply(content: &str) -> Value {
        json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
    }

    fn critique_reply() -> Value {
        text_reply(
            "Here is my analysis:\n```json\n{\"currentLayout\":\"Sofa against the long wall\",\
             \"suggestions\":[{\"title\":\"Float the sofa\",\"description\":\"Pull it toward the rug\",\"icon\":\"layout\"},\
             {\"title\":\"Warm bulbs\",\"description\":\"Swap to 2700K\",\"icon\":\"lightbulb\"}],\
             \"imagePrompt\":\"living room with floating sofa and warm light\"}\n```",
        )
    }

    fn image_reply() -> Value {
        json!({ "choices": [{ "message": {
            "content": "Here you go",
            "images": [{ "type": "image_url", "image_url": { "url": "data:image/png;base64,UkVESVNJR04=" } }]
        } }] })
    }

    fn vision_ok_image_ok(body: &Value) -> (u16, Value) {
        if body["model"] == "vision-test" {
            (200, critique_reply())
        } else {
            (200, image_reply())
        }
    }

    fn vision_ok_image_500(body: &Value) -> (u16, Value) {
        if body["model"] == "vision-test" {
            (200, critique_reply())
        } else {
            (500, json!({ "error": "renderer crashed" }))
        }
    }

    fn vision_ok_image_blank(body: &Value) -> (u16, Value) {
        if body["model"] == "vision-test" {
            (200, critique_reply())
        } else {
            (200, text_reply("I can only describe it in words."))
        }
    }

    fn rate_limited(_: &Value) -> (u16, Value) {
        (429, json!({ "error": "slow down" }))
    }

    fn out_of_credits(_: &Value) -> (u16, Value) {
        (402, json!({ "error": "payment required" }))
    }

    fn analyzer_for(client: &GatewayClient) -> RoomAnalyzer {
        RoomAnalyzer::new(
            Arc::new(client.vision().clone()),
            Arc::new(client.image().clone()),
        )
    }

    #[actix_web::test]
    async fn test_critique_decodes_fenced_reply() {
        let (endpoint, handle) = start_gateway(vision_ok_image_ok);
        let analysis = client_for(&endpoint)
            .vision()
            .critique(IMAGE)
            .await
            .unwrap();
        handle.stop(false).await;

        assert_eq!(analysis.current_layout, "Sofa against the long wall");
        assert_eq!(analysis.suggestions.len(), 2);
        assert_eq!(analysis.suggestions[0].title, "Float the sofa");
        assert_eq!(
            analysis.image_prompt,
            "living room with floating sofa and warm light"
        );
    }

    #[actix_web::test]
    async fn test_wrong_key_surfaces_upstream_status() {
        let (endpoint, handle) = start_gateway(vision_ok_image_ok);
        let client = GatewayClient::new(
            &GatewayConfig::new()
                .with_api_key("sk-other")
                .with_endpoint(endpoint.as_str()),
        )
        .unwrap();
        let err = client.vision().critique(IMAGE).await.unwrap_err();
        handle.stop(false).await;

        assert!(matches!(err, RoomGenError::UpstreamError { status: 401, .. }));
    }

    #[actix_web::test]
    async fn test_gateway_429_and_402_are_classified() {
        let (endpoint, handle) = start_gateway(rate_limited);
        let err = client_for(&endpoint)
            .vision()
            .critique(IMAGE)
            .await
            .unwrap_err();
        handle.stop(false).await;
        assert!(matches!(err, RoomGenError::RateLimited));

        let (endpoint, handle) = start_gateway(out_of_credits);
        let err = client_for(&endpoint)
            .vision()
            .critique(IMAGE)
            .await
            .unwrap_err();
        handle.stop(false).await;
        assert!(matches!(err, RoomGenError::QuotaExceeded));
    }

    #[actix_web::test]
    async fn test_generate_returns_first_image() {
        let (endpoint, handle) = start_gateway(vision_ok_image_ok);
        let image = client_for(&endpoint)
            .image()
            .generate("living room")
            .await
            .unwrap();
        handle.stop(false).await;

        assert_eq!(
            image.image_url.as_deref(),
            Some("data:image/png;base64,UkVESVNJR04=")
        );
        assert!(image.error.is_none());
    }

    #[actix_web::test]
    async fn test_generate_without_image_is_empty_not_error() {
        let (endpoint, handle) = start_gateway(vision_ok_image_blank);
        let image = client_for(&endpoint)
            .image()
            .generate("living room")
            .await
            .unwrap();
        handle.stop(false).await;

        assert!(image.image_url.is_none());
        assert!(image.error.is_none());
    }

    #[actix_web::test]
    async fn test_pipeline_degrades_when_image_call_fails() {
        let (endpoint, handle) = start_gateway(vision_ok_image_500);
        let client = client_for(&endpoint);
        let response = analyzer_for(&client)
            .analyze(&AnalyzeRoomRequest::new(IMAGE))
            .await
            .unwrap();
        handle.stop(false).await;

        assert_eq!(response.suggestions.len(), 2);
        assert!(response.generated_image.is_none());
        assert_eq!(response.image_error.as_deref(), Some(IMAGE_ADVISORY));
    }

    #[actix_web::test]
    async fn test_pipeline_rate_limited_on_analysis() {
        let (endpoint, handle) = start_gateway(rate_limited);
        let client = client_for(&endpoint);
        let err = analyzer_for(&client)
            .analyze(&AnalyzeRoomRequest::new(IMAGE))
            .await
            .unwrap_err();
        handle.stop(false).await;

        assert!(matches!(err, RoomGenError::RateLimited));
    }
}
