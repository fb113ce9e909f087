use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 发券成功响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CouponIssuedResponse {
    pub success: bool,
    /// 抽中的奖品名称
    #[schema(example = "15% off 1-Step Algo")]
    pub prize: String,
    /// WooCommerce 回传的优惠码
    #[schema(example = "15_Algo_AB12C")]
    pub coupon: String,
}

impl CouponIssuedResponse {
    pub fn new(prize: String, coupon: String) -> Self {
        Self {
            success: true,
            prize,
            coupon,
        }
    }
}

/// WooCommerce 拒绝创建优惠券时原样转发其错误体
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CouponRejectedResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub error: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorMessageResponse {
    pub success: bool,
    #[schema(example = "Internal server error while creating coupon.")]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ForbiddenResponse {
    #[schema(example = "Forbidden: Invalid origin")]
    pub error: String,
}
