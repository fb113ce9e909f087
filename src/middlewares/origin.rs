use crate::error::AppError;
use actix_web::body::EitherBody;
use actix_web::http::{Method, header};
use actix_web::{
    Error, ResponseError,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::sync::Arc;

// 文档路径不校验 Origin
const PUBLIC_PREFIXES: [&str; 2] = ["/swagger-ui", "/api-docs/"];

fn is_public_path(path: &str) -> bool {
    PUBLIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Origin 白名单校验，不匹配或缺失时直接返回 403，请求不会到达处理器
#[derive(Clone)]
pub struct OriginGuard {
    allowed: Arc<Vec<String>>,
}

impl OriginGuard {
    pub fn new(allowed: Vec<String>) -> Self {
        Self {
            allowed: Arc::new(allowed),
        }
    }

    pub fn is_allowed(&self, origin: Option<&str>) -> bool {
        origin.is_some_and(|o| self.allowed.iter().any(|a| a == o))
    }
}

impl<S, B> Transform<S, ServiceRequest> for OriginGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = OriginGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(OriginGuardService {
            service,
            guard: self.clone(),
        }))
    }
}

pub struct OriginGuardService<S> {
    service: S,
    guard: OriginGuard,
}

impl<S, B> Service<ServiceRequest> for OriginGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // 放行 CORS 预检与文档路径
        let bypass = req.method() == Method::OPTIONS || is_public_path(req.path());

        let origin = req
            .headers()
            .get(header::ORIGIN)
            .and_then(|v| v.to_str().ok());

        if bypass || self.guard.is_allowed(origin) {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        log::warn!(
            "Blocked {} {} from origin {:?}",
            req.method(),
            req.path(),
            origin
        );
        let response = AppError::InvalidOrigin.error_response();
        Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
    }
}
