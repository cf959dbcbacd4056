// ==========================================
// 零售库存分配决策支持系统 - 数值工具函数
// ==========================================
// 职责: 安全除法 / 区间裁剪
// 红线: 任何比值计算不得因除零而失败
// ==========================================

/// 安全除法
///
/// # 参数
/// - `numerator`: 分子
/// - `denominator`: 分母
/// - `default`: 分母为 0 或非法时的回退值
///
/// # 返回
/// 分母非零且有限时返回商，否则返回 `default`（绝不 panic）
pub fn safe_divide(numerator: f64, denominator: f64, default: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return default;
    }
    numerator / denominator
}

/// 区间裁剪
///
/// 将值限制在 [lower, upper] 之间
pub fn clip(value: f64, lower: f64, upper: f64) -> f64 {
    value.max(lower).min(upper)
}

/// 下限裁剪
pub fn clip_lower(value: f64, lower: f64) -> f64 {
    value.max(lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_divide_normal() {
        assert_eq!(safe_divide(10.0, 2.0, 0.0), 5.0);
        assert_eq!(safe_divide(7.0, 7.0, 1.0), 1.0);
    }

    #[test]
    fn test_safe_divide_zero_denominator() {
        assert_eq!(safe_divide(10.0, 0.0, 1.0), 1.0);
        assert_eq!(safe_divide(0.0, 0.0, 999.0), 999.0);
    }

    #[test]
    fn test_safe_divide_nan_inputs() {
        assert_eq!(safe_divide(f64::NAN, 2.0, 0.5), 0.5);
        assert_eq!(safe_divide(2.0, f64::NAN, 0.5), 0.5);
        assert_eq!(safe_divide(2.0, f64::INFINITY, 0.5), 0.5);
    }

    #[test]
    fn test_clip() {
        assert_eq!(clip(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clip(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clip(5.0, 0.0, 10.0), 5.0);
    }

    #[test]
    fn test_clip_lower() {
        assert_eq!(clip_lower(-3.0, 0.0), 0.0);
        assert_eq!(clip_lower(3.0, 0.0), 3.0);
    }
}
