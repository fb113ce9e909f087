use actix_cors::Cors;

/// 与前端保持宽松的 CORS；来源限制由 OriginGuard 负责
pub fn create_cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
