use rand::Rng;

use crate::models::Prize;

const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SUFFIX_LEN: usize = 5;

/// 生成5位大写字母数字后缀（降低碰撞概率，不保证唯一）
pub fn generate_coupon_suffix<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect()
}

/// 优惠码格式: `{折扣数值}_{分类}_{随机5位}`，如 `15_Algo_AB12C`
pub fn generate_coupon_code<R: Rng + ?Sized>(prize: &Prize, rng: &mut R) -> String {
    format!(
        "{}_{}_{}",
        prize.amount_label(),
        prize.discount_name,
        generate_coupon_suffix(rng)
    )
}
