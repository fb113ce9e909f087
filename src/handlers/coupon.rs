use crate::models::*;
use crate::services::PrizeWheelService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/getCoupon",
    tag = "coupon",
    params(
        ("Origin" = String, Header, description = "必须在白名单内")
    ),
    responses(
        (status = 200, description = "抽奖并创建优惠券成功", body = CouponIssuedResponse),
        (status = 400, description = "WooCommerce 拒绝创建，原样返回其错误", body = CouponRejectedResponse),
        (status = 403, description = "Origin 不在白名单", body = ForbiddenResponse),
        (status = 500, description = "调用 WooCommerce 失败", body = ErrorMessageResponse)
    )
)]
/// 转盘抽奖：按权重抽取奖品并在 WooCommerce 创建单次使用的优惠券
pub async fn get_coupon(service: web::Data<PrizeWheelService>) -> Result<HttpResponse> {
    match service.issue_coupon().await {
        Ok(data) => Ok(HttpResponse::Ok().json(data)),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置
pub fn coupon_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/getCoupon", web::get().to(get_coupon));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WooCommerceConfig;
    use crate::external::WooCommerceClient;
    use crate::middlewares::OriginGuard;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpRequest, HttpServer, test};
    use chrono::NaiveDate;
    use regex::Regex;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    const ALLOWED_ORIGIN: &str = "https://www.optimal-traders.com";

    /// (Authorization 头, 请求体)
    type Captured = Arc<Mutex<Vec<(Option<String>, Value)>>>;

    /// 启动一个本地假 WooCommerce，固定返回 status + reply
    fn spawn_upstream(status: StatusCode, reply: Value) -> (String, Captured) {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();

        let server = HttpServer::new(move || {
            let sink = sink.clone();
            let reply = reply.clone();
            App::new().route(
                "/wp-json/wc/v3/coupons",
                web::post().to(move |req: HttpRequest, body: web::Json<Value>| {
                    let auth = req
                        .headers()
                        .get("Authorization")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string);
                    sink.lock().unwrap().push((auth, body.into_inner()));
                    let reply = reply.clone();
                    async move { HttpResponse::build(status).json(reply) }
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        (format!("http://{addr}"), captured)
    }

    /// 返回非 JSON 响应体的假 WooCommerce（如网关错误页）
    fn spawn_plain_text_upstream(status: StatusCode, text: &'static str) -> String {
        let server = HttpServer::new(move || {
            App::new().route(
                "/wp-json/wc/v3/coupons",
                web::post().to(move || async move {
                    HttpResponse::build(status)
                        .content_type("text/plain")
                        .body(text)
                }),
            )
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        format!("http://{addr}")
    }

    fn algo_15() -> Prize {
        default_prizes()
            .into_iter()
            .find(|p| p.name == "15% off 1-Step Algo")
            .unwrap()
    }

    fn build_service(site_url: &str, prizes: Vec<Prize>) -> PrizeWheelService {
        let client = WooCommerceClient::new(WooCommerceConfig {
            site_url: site_url.to_string(),
            consumer_key: "ck_test".to_string(),
            consumer_secret: "cs_test".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        PrizeWheelService::new(
            PrizeTable::new(prizes).unwrap(),
            client,
            NaiveDate::from_ymd_opt(2024, 12, 3).unwrap(),
        )
    }

    async fn get_coupon_with(
        service: PrizeWheelService,
        origin: Option<&str>,
    ) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .wrap(OriginGuard::new(vec![ALLOWED_ORIGIN.to_string()]))
                .app_data(web::Data::new(service))
                .configure(coupon_config),
        )
        .await;

        let mut req = test::TestRequest::get().uri("/getCoupon");
        if let Some(origin) = origin {
            req = req.insert_header(("Origin", origin));
        }
        let resp = test::call_service(&app, req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn test_get_coupon_success() {
        let (url, captured) = spawn_upstream(StatusCode::OK, json!({ "id": 101, "code": "15_Algo_AB12C" }));
        let service = build_service(&url, vec![algo_15()]);

        let (status, body) = get_coupon_with(service, Some(ALLOWED_ORIGIN)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "success": true, "prize": "15% off 1-Step Algo", "coupon": "15_Algo_AB12C" })
        );

        let requests = captured.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (auth, payload) = &requests[0];
        assert_eq!(auth.as_deref(), Some("Basic Y2tfdGVzdDpjc190ZXN0"));

        let code = payload["code"].as_str().unwrap();
        assert!(Regex::new(r"^15_Algo_[A-Z0-9]{5}$").unwrap().is_match(code));
        assert_eq!(payload["discount_type"], "percent");
        assert_eq!(payload["amount"], "15");
        assert_eq!(payload["product_ids"], json!([853]));
        assert_eq!(payload["individual_use"], true);
        assert_eq!(payload["usage_limit"], 1);
        assert_eq!(payload["usage_limit_per_user"], 1);
        assert_eq!(payload["name"], "15% off 1-Step Algo");
        assert_eq!(payload["date_expires"], "2024-12-03");
    }

    #[actix_web::test]
    async fn test_get_coupon_upstream_rejection() {
        let (url, captured) = spawn_upstream(
            StatusCode::BAD_REQUEST,
            json!({ "message": "invalid product id" }),
        );
        let service = build_service(&url, default_prizes());

        let (status, body) = get_coupon_with(service, Some(ALLOWED_ORIGIN)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "success": false, "error": { "message": "invalid product id" } })
        );
        assert_eq!(captured.lock().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_get_coupon_malformed_success_body() {
        let (url, _captured) = spawn_upstream(StatusCode::OK, json!({ "id": 5 }));
        let service = build_service(&url, default_prizes());

        let (status, body) = get_coupon_with(service, Some(ALLOWED_ORIGIN)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
    }

    #[actix_web::test]
    async fn test_get_coupon_non_json_error_body() {
        let url = spawn_plain_text_upstream(StatusCode::BAD_GATEWAY, "Bad Gateway");
        let service = build_service(&url, default_prizes());

        let (status, body) = get_coupon_with(service, Some(ALLOWED_ORIGIN)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "success": false, "message": "Internal server error while creating coupon." })
        );
    }

    #[actix_web::test]
    async fn test_get_coupon_transport_failure() {
        // 端口 1 无服务监听，连接被拒绝
        let service = build_service("http://127.0.0.1:1", default_prizes());

        let (status, body) = get_coupon_with(service, Some(ALLOWED_ORIGIN)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "success": false, "message": "Internal server error while creating coupon." })
        );
    }

    #[actix_web::test]
    async fn test_invalid_origin_makes_no_upstream_call() {
        let (url, captured) = spawn_upstream(StatusCode::CREATED, json!({ "code": "unused" }));

        for origin in [None, Some("https://evil.example"), Some("")] {
            let service = build_service(&url, default_prizes());
            let (status, body) = get_coupon_with(service, origin).await;
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(body, json!({ "error": "Forbidden: Invalid origin" }));
        }

        assert!(captured.lock().unwrap().is_empty());
    }
}
