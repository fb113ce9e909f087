use rand::Rng;

use crate::error::{AppError, AppResult};
use crate::models::Prize;

/// 线性累加的加权随机抽取：每个奖品的中奖概率 = probability / 总权重
///
/// 空列表视为配置错误。
pub fn select_weighted<'a, R: Rng + ?Sized>(prizes: &'a [Prize], rng: &mut R) -> AppResult<&'a Prize> {
    if prizes.is_empty() {
        return Err(AppError::ConfigError("No prizes configured".into()));
    }

    let total: f64 = prizes.iter().map(|p| f64::from(p.probability)).sum();
    let target = rng.gen_range(0.0..1.0) * total;

    Ok(pick_by_target(prizes, target))
}

/// 返回第一个累计权重超过 target 的奖品；浮点误差导致落空时返回最后一个
fn pick_by_target(prizes: &[Prize], target: f64) -> &Prize {
    let mut cumulative = 0.0;
    for prize in prizes {
        cumulative += f64::from(prize.probability);
        if target < cumulative {
            return prize;
        }
    }
    &prizes[prizes.len() - 1]
}
