use crate::error::{AppError, AppResult};
use crate::external::{CouponOutcome, WooCommerceClient};
use crate::models::{CouponData, CouponDraw, CouponIssuedResponse, PrizeTable};
use crate::utils::generate_coupon_code;
use chrono::NaiveDate;
use rand::Rng;

#[derive(Clone)]
pub struct PrizeWheelService {
    prizes: PrizeTable,
    client: WooCommerceClient,
    expires_on: NaiveDate,
}

impl PrizeWheelService {
    pub fn new(prizes: PrizeTable, client: WooCommerceClient, expires_on: NaiveDate) -> Self {
        Self {
            prizes,
            client,
            expires_on,
        }
    }

    pub fn prizes(&self) -> &PrizeTable {
        &self.prizes
    }

    /// 抽奖并生成优惠码与请求体（不产生副作用）
    pub fn prepare_draw<R: Rng + ?Sized>(&self, rng: &mut R) -> AppResult<CouponDraw> {
        let prize = self.prizes.draw(rng)?.clone();
        let coupon_code = generate_coupon_code(&prize, rng);
        let coupon_data = CouponData::for_prize(&prize, coupon_code.clone(), self.expires_on);
        Ok(CouponDraw {
            prize,
            coupon_code,
            coupon_data,
        })
    }

    /// 转盘发券:
    /// 1. 按权重抽取奖品
    /// 2. 生成优惠码 `{折扣}_{分类}_{随机5位}`
    /// 3. 调用 WooCommerce 创建单次使用优惠券
    /// 4. 返回奖品名与 WooCommerce 回传的优惠码
    ///
    /// 不重试；WooCommerce 拒绝时返回 `CouponRejected`，网络异常原样向上传递。
    pub async fn issue_coupon(&self) -> AppResult<CouponIssuedResponse> {
        let draw = self.prepare_draw(&mut rand::thread_rng())?;
        log::info!(
            "Prize drawn: {} (coupon code {})",
            draw.prize.name,
            draw.coupon_code
        );

        match self.client.create_coupon(&draw.coupon_data).await? {
            CouponOutcome::Created(created) => {
                Ok(CouponIssuedResponse::new(draw.prize.name, created.code))
            }
            CouponOutcome::Rejected { status, body } => {
                Err(AppError::CouponRejected { status, body })
            }
        }
    }
}
