use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::utils::select_weighted;

/// WooCommerce 优惠券类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    #[default]
    Percent,
    FixedCart,
    FixedProduct,
}

/// 奖品定义（启动时加载，运行期只读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Prize {
    /// 展示名称
    pub name: String,
    /// 相对权重（不要求总和为 100）
    pub probability: u32,
    #[serde(default)]
    pub discount_type: DiscountType,
    /// 优惠码中的分类标签，如 "Algo"
    pub discount_name: String,
    /// 折扣数值；缺省时按 0 下发
    #[serde(default)]
    pub discount_amount: Option<f64>,
    /// 适用商品ID
    pub product_id: i64,
}

impl Prize {
    fn percent(name: &str, probability: u32, discount_name: &str, amount: f64, product_id: i64) -> Self {
        Self {
            name: name.to_string(),
            probability,
            discount_type: DiscountType::Percent,
            discount_name: discount_name.to_string(),
            discount_amount: Some(amount),
            product_id,
        }
    }

    /// 折扣数值的文本形式：整数不带小数位（15 而非 15.0），缺省为 "0"
    pub fn amount_label(&self) -> String {
        self.discount_amount
            .map(|amount| amount.to_string())
            .unwrap_or_else(|| "0".to_string())
    }
}

/// 内置奖品表，权重合计 130
pub fn default_prizes() -> Vec<Prize> {
    vec![
        Prize::percent("30% off 2-Step Challenge", 1, "Challenge", 30.0, 846),
        Prize::percent("25% off 2-Step Challenge", 2, "Challenge", 25.0, 846),
        Prize::percent("20% off 2-Step Challenge", 7, "Challenge", 20.0, 846),
        Prize::percent("15% off 2-Step Challenge", 10, "Challenge", 15.0, 846),
        Prize::percent("15% off 1-Step Algo", 10, "Algo", 15.0, 853),
        Prize::percent("15% off 1-Step Standard", 20, "Standard", 15.0, 830),
        Prize::percent("12.5% off 1-Step Algo", 20, "Algo", 12.5, 853),
        Prize::percent("10% off 1-Step Algo", 30, "Algo", 10.0, 853),
        Prize::percent("10% off 1-Step Standard", 30, "Standard", 10.0, 830),
    ]
}

/// 校验过的奖品表：非空且所有权重为正
#[derive(Debug, Clone)]
pub struct PrizeTable {
    prizes: Arc<[Prize]>,
}

impl PrizeTable {
    pub fn new(prizes: Vec<Prize>) -> AppResult<Self> {
        if prizes.is_empty() {
            return Err(AppError::ConfigError("Prize table is empty".into()));
        }
        if let Some(p) = prizes.iter().find(|p| p.probability == 0) {
            return Err(AppError::ConfigError(format!(
                "Prize '{}' must have a positive probability",
                p.name
            )));
        }
        if let Some(p) = prizes.iter().find(|p| p.discount_name.trim().is_empty()) {
            return Err(AppError::ConfigError(format!(
                "Prize '{}' is missing a discount name",
                p.name
            )));
        }
        Ok(Self {
            prizes: prizes.into(),
        })
    }

    pub fn prizes(&self) -> &[Prize] {
        &self.prizes
    }

    pub fn total_weight(&self) -> u64 {
        self.prizes.iter().map(|p| u64::from(p.probability)).sum()
    }

    /// 按权重抽取一个奖品
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> AppResult<&Prize> {
        select_weighted(&self.prizes, rng)
    }
}
