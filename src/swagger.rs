use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::coupon::get_coupon),
    components(
        schemas(
            CouponIssuedResponse,
            CouponRejectedResponse,
            ErrorMessageResponse,
            ForbiddenResponse,
            Prize,
            DiscountType,
        )
    ),
    tags(
        (name = "coupon", description = "Prize wheel coupon API"),
    ),
    info(
        title = "Prize Wheel API",
        version = "0.1.0",
        description = "Weighted prize draw backed by WooCommerce coupons"
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
