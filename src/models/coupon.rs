use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{DiscountType, Prize};

/// 发送给 WooCommerce `POST /wp-json/wc/v3/coupons` 的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponData {
    pub code: String,
    pub discount_type: DiscountType,
    pub amount: String,
    pub product_ids: Vec<i64>,
    pub individual_use: bool,
    pub usage_limit: u32,
    pub usage_limit_per_user: u32,
    pub name: String,
    pub date_expires: String,
}

impl CouponData {
    /// 单次使用、仅限单个商品的优惠券
    pub fn for_prize(prize: &Prize, code: String, expires_on: NaiveDate) -> Self {
        Self {
            code,
            discount_type: prize.discount_type,
            amount: prize.amount_label(),
            product_ids: vec![prize.product_id],
            individual_use: true,
            usage_limit: 1,
            usage_limit_per_user: 1,
            name: prize.name.clone(),
            date_expires: expires_on.format("%Y-%m-%d").to_string(),
        }
    }
}

/// 一次抽奖的结果，仅在单个请求内存在
#[derive(Debug, Clone)]
pub struct CouponDraw {
    pub prize: Prize,
    pub coupon_code: String,
    pub coupon_data: CouponData,
}
