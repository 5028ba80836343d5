use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::meme::get_meme,
        crate::handlers::meme::health_check,
        crate::handlers::meme::get_metrics
    ),
    components(
        schemas(
            crate::models::meme::MemeReply,
            crate::models::meme::ErrorReply
        )
    ),
    tags(
        (name = "memes", description = "表情包转发API"),
        (name = "monitoring", description = "健康检查与指标")
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    let mut openapi = ApiDoc::openapi();
    openapi.info.title = env!("CARGO_PKG_NAME").to_string();
    openapi.info.version = env!("CARGO_PKG_VERSION").to_string();

    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi)
}
