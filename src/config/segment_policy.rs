// ==========================================
// 零售库存分配决策支持系统 - 段位策略配置
// ==========================================
// 职责: 每个生命周期段的补货/分配/降价策略参数
// 红线: 配置为不可变值对象，调整必须克隆后替换整个映射
// ==========================================

use crate::domain::types::{Depot, Segment};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// SegmentPolicy - 单段策略
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPolicy {
    pub display_name: String,

    // ===== 补货与安全库存 =====
    pub reorder_days: f64,
    pub safety_stock_days: f64,

    // ===== 分配 =====
    /// 电商仓目标库存占总库存的比例
    pub allocation_pct: f64,
    pub depot_priority: Vec<Depot>,
    pub auto_transfer: bool,
    pub transfer_threshold: f64,

    // ===== 降价 =====
    /// 可售天数超过该阈值时建议降价
    pub markdown_day: f64,

    // ===== 分类阈值 (仅部分段使用) =====
    pub velocity_min: Option<f64>,
    pub velocity_max: Option<f64>,
    pub trend_min: Option<f64>,
    pub daily_sales_min: Option<f64>,
    pub daily_sales_max: Option<f64>,
    pub engagement_min: Option<f64>,
    pub stockout_max: Option<i32>,
    pub stock_days_min: Option<f64>,
}

impl SegmentPolicy {
    /// HOT 段默认策略
    pub fn default_hot() -> Self {
        Self {
            display_name: "HOT (爆款)".to_string(),
            reorder_days: 3.0,
            safety_stock_days: 5.0,
            depot_priority: vec![Depot::Akyazi, Depot::Oms, Depot::AnaDepo],
            auto_transfer: true,
            transfer_threshold: 0.7,
            allocation_pct: 0.80,
            markdown_day: 999.0,
            velocity_min: Some(1.5),
            velocity_max: None,
            trend_min: Some(1.3),
            daily_sales_min: Some(15.0),
            daily_sales_max: None,
            engagement_min: None,
            stockout_max: None,
            stock_days_min: None,
        }
    }

    /// RISING_STAR 段默认策略
    pub fn default_rising_star() -> Self {
        Self {
            display_name: "RISING STAR (上升期)".to_string(),
            reorder_days: 4.0,
            safety_stock_days: 6.0,
            depot_priority: vec![Depot::Akyazi, Depot::AnaDepo, Depot::Oms],
            auto_transfer: true,
            transfer_threshold: 0.6,
            allocation_pct: 0.70,
            markdown_day: 999.0,
            velocity_min: Some(1.2),
            velocity_max: Some(1.5),
            trend_min: Some(1.2),
            daily_sales_min: None,
            daily_sales_max: None,
            engagement_min: Some(5.0),
            stockout_max: None,
            stock_days_min: None,
        }
    }

    /// STEADY 段默认策略
    pub fn default_steady() -> Self {
        Self {
            display_name: "STEADY (平稳期)".to_string(),
            reorder_days: 7.0,
            safety_stock_days: 10.0,
            depot_priority: vec![Depot::Akyazi, Depot::AnaDepo, Depot::Oms],
            auto_transfer: false,
            transfer_threshold: 0.5,
            allocation_pct: 0.60,
            markdown_day: 45.0,
            velocity_min: Some(0.8),
            velocity_max: Some(1.2),
            trend_min: None,
            daily_sales_min: Some(5.0),
            daily_sales_max: None,
            engagement_min: None,
            stockout_max: Some(3),
            stock_days_min: None,
        }
    }

    /// SLOW 段默认策略
    pub fn default_slow() -> Self {
        Self {
            display_name: "SLOW (慢销)".to_string(),
            reorder_days: 14.0,
            safety_stock_days: 20.0,
            depot_priority: vec![Depot::Oms, Depot::AnaDepo, Depot::Akyazi],
            auto_transfer: false,
            transfer_threshold: 0.3,
            allocation_pct: 0.30,
            markdown_day: 30.0,
            velocity_min: Some(0.5),
            velocity_max: None,
            trend_min: None,
            daily_sales_min: None,
            daily_sales_max: Some(5.0),
            engagement_min: None,
            stockout_max: None,
            stock_days_min: None,
        }
    }

    /// DYING 段默认策略
    pub fn default_dying() -> Self {
        Self {
            display_name: "DYING (衰退)".to_string(),
            reorder_days: 999.0,
            safety_stock_days: 0.0,
            depot_priority: vec![Depot::Oms, Depot::Akyazi, Depot::AnaDepo],
            auto_transfer: false,
            transfer_threshold: 0.0,
            allocation_pct: 0.0,
            markdown_day: 7.0,
            velocity_min: None,
            velocity_max: Some(0.5),
            trend_min: None,
            daily_sales_min: None,
            daily_sales_max: None,
            engagement_min: None,
            stockout_max: None,
            stock_days_min: Some(60.0),
        }
    }
}

// ==========================================
// SegmentPolicyMap - 段位 → 策略映射
// ==========================================
// 未配置的段查询时回退 STEADY 策略（不报错）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPolicyMap {
    policies: HashMap<Segment, SegmentPolicy>,
    /// 兜底策略，构造时固定为 STEADY（或其默认值）
    fallback: SegmentPolicy,
}

impl SegmentPolicyMap {
    /// 从完整映射构造；缺失 STEADY 时兜底策略取内置默认
    pub fn from_map(policies: HashMap<Segment, SegmentPolicy>) -> Self {
        let fallback = policies
            .get(&Segment::Steady)
            .cloned()
            .unwrap_or_else(SegmentPolicy::default_steady);
        Self { policies, fallback }
    }

    /// 按段查询策略；未知段回退 STEADY
    pub fn policy_for(&self, segment: Segment) -> &SegmentPolicy {
        self.policies.get(&segment).unwrap_or(&self.fallback)
    }

    /// 是否为某段显式配置了策略
    pub fn has_policy(&self, segment: Segment) -> bool {
        self.policies.contains_key(&segment)
    }

    /// 替换单段策略，产出新映射（写时复制）
    pub fn with_policy(&self, segment: Segment, policy: SegmentPolicy) -> Self {
        let mut policies = self.policies.clone();
        policies.insert(segment, policy);
        Self::from_map(policies)
    }
}

impl Default for SegmentPolicyMap {
    fn default() -> Self {
        let mut policies = HashMap::new();
        policies.insert(Segment::Hot, SegmentPolicy::default_hot());
        policies.insert(Segment::RisingStar, SegmentPolicy::default_rising_star());
        policies.insert(Segment::Steady, SegmentPolicy::default_steady());
        policies.insert(Segment::Slow, SegmentPolicy::default_slow());
        policies.insert(Segment::Dying, SegmentPolicy::default_dying());
        Self::from_map(policies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_map_covers_five_segments() {
        let map = SegmentPolicyMap::default();
        for segment in [
            Segment::Hot,
            Segment::RisingStar,
            Segment::Steady,
            Segment::Slow,
            Segment::Dying,
        ] {
            assert!(map.has_policy(segment), "缺少段策略: {}", segment);
        }
        assert!(!map.has_policy(Segment::Unclassified));
    }

    #[test]
    fn test_unknown_segment_falls_back_to_steady() {
        let map = SegmentPolicyMap::default();
        let policy = map.policy_for(Segment::Unclassified);
        assert_eq!(policy, map.policy_for(Segment::Steady));
    }

    #[test]
    fn test_missing_steady_uses_builtin_default() {
        let mut policies = HashMap::new();
        policies.insert(Segment::Hot, SegmentPolicy::default_hot());
        let map = SegmentPolicyMap::from_map(policies);
        assert_eq!(map.policy_for(Segment::Slow).reorder_days, 7.0);
    }

    #[test]
    fn test_with_policy_is_copy_on_write() {
        let base = SegmentPolicyMap::default();
        let mut hot = SegmentPolicy::default_hot();
        hot.allocation_pct = 0.90;
        let modified = base.with_policy(Segment::Hot, hot);

        assert_eq!(base.policy_for(Segment::Hot).allocation_pct, 0.80);
        assert_eq!(modified.policy_for(Segment::Hot).allocation_pct, 0.90);
    }
}
