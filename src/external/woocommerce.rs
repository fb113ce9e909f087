use crate::config::WooCommerceConfig;
use crate::error::{AppError, AppResult};
use crate::models::CouponData;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const COUPONS_PATH: &str = "/wp-json/wc/v3/coupons";

/// WooCommerce 创建成功后返回的优惠券（只取用到的字段）
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedCoupon {
    #[serde(default)]
    pub id: Option<i64>,
    pub code: String,
}

/// 创建优惠券的业务结果；网络/解析失败走 `Err`
#[derive(Debug)]
pub enum CouponOutcome {
    Created(CreatedCoupon),
    Rejected {
        status: u16,
        body: serde_json::Value,
    },
}

#[derive(Clone)]
pub struct WooCommerceClient {
    http: Client,
    config: WooCommerceConfig,
}

impl WooCommerceClient {
    pub fn new(config: WooCommerceConfig) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent("prize-wheel/woocommerce")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn coupons_url(&self) -> String {
        format!("{}{}", self.config.site_url, COUPONS_PATH)
    }

    /// POST {site_url}/wp-json/wc/v3/coupons，Basic Auth 使用 consumer key/secret
    pub async fn create_coupon(&self, data: &CouponData) -> AppResult<CouponOutcome> {
        let response = self
            .http
            .post(self.coupons_url())
            .basic_auth(&self.config.consumer_key, Some(&self.config.consumer_secret))
            .json(data)
            .send()
            .await?;

        let status = response.status();
        // 无论成功与否 WooCommerce 都返回 JSON；非 JSON 视为异常
        let body: serde_json::Value = response.json().await?;

        if !status.is_success() {
            return Ok(CouponOutcome::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreatedCoupon = serde_json::from_value(body).map_err(|e| {
            AppError::ExternalApiError(format!("Malformed coupon response from WooCommerce: {e}"))
        })?;

        log::info!(
            "WooCommerce coupon created: code={}, id={:?}",
            created.code,
            created.id
        );
        Ok(CouponOutcome::Created(created))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupons_url() {
        let client = WooCommerceClient::new(WooCommerceConfig {
            site_url: "https://shop.example.com".to_string(),
            consumer_key: "ck_test".to_string(),
            consumer_secret: "cs_test".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(
            client.coupons_url(),
            "https://shop.example.com/wp-json/wc/v3/coupons"
        );
    }
}
