// ==========================================
// 零售库存分配决策支持系统 - 领域类型定义
// ==========================================
// 红线: 分段是互斥的，每个商品每轮只属于一个生命周期段
// 序列化格式: SCREAMING_SNAKE_CASE (与报表导出一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 生命周期段 (Lifecycle Segment)
// ==========================================
// 规则按固定顺序评估，首次命中即定段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Segment {
    Hot,          // 爆款
    RisingStar,   // 上升期
    Steady,       // 平稳期
    Slow,         // 慢销
    Dying,        // 衰退
    Unclassified, // 未分类
}

impl Segment {
    /// 全部段位，按分类规则的固定评估顺序
    pub const ALL: [Segment; 6] = [
        Segment::Hot,
        Segment::RisingStar,
        Segment::Steady,
        Segment::Slow,
        Segment::Dying,
        Segment::Unclassified,
    ];
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Hot => write!(f, "HOT"),
            Segment::RisingStar => write!(f, "RISING_STAR"),
            Segment::Steady => write!(f, "STEADY"),
            Segment::Slow => write!(f, "SLOW"),
            Segment::Dying => write!(f, "DYING"),
            Segment::Unclassified => write!(f, "UNCLASSIFIED"),
        }
    }
}

// ==========================================
// 仓库标识 (Depot)
// ==========================================
// 系统固定建模三个库位: 电商仓 / 主仓 / 门店 OMS 池
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Depot {
    Akyazi,  // 电商履约仓
    AnaDepo, // 主仓
    Oms,     // 门店/OMS 池
}

impl fmt::Display for Depot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Depot::Akyazi => write!(f, "akyazi"),
            Depot::AnaDepo => write!(f, "ana_depo"),
            Depot::Oms => write!(f, "oms"),
        }
    }
}

impl Depot {
    /// 从导入/模拟接口的字符串标识解析
    pub fn parse(value: &str) -> Option<Depot> {
        match value.trim().to_lowercase().as_str() {
            "akyazi" => Some(Depot::Akyazi),
            "ana_depo" => Some(Depot::AnaDepo),
            "oms" | "oms_total" => Some(Depot::Oms),
            _ => None,
        }
    }
}

// ==========================================
// 降价建议 (Markdown Advice)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarkdownAdvice {
    No,       // 不降价
    Consider, // 建议评估
    Urgent,   // 立即降价
}

impl fmt::Display for MarkdownAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkdownAdvice::No => write!(f, "NO"),
            MarkdownAdvice::Consider => write!(f, "CONSIDER"),
            MarkdownAdvice::Urgent => write!(f, "URGENT"),
        }
    }
}

// ==========================================
// 告警等级 (Alert Level)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    Critical, // 红线
    Warning,  // 关注
    Info,     // 提示
}

impl AlertLevel {
    /// 优先级基数 (CRITICAL=100, WARNING=50, INFO=10)
    pub fn base_priority(&self) -> f64 {
        match self {
            AlertLevel::Critical => 100.0,
            AlertLevel::Warning => 50.0,
            AlertLevel::Info => 10.0,
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertLevel::Critical => write!(f, "CRITICAL"),
            AlertLevel::Warning => write!(f, "WARNING"),
            AlertLevel::Info => write!(f, "INFO"),
        }
    }
}

// ==========================================
// 告警类别 (Alert Category)
// ==========================================
// 规则族标识，不同类别之间不互斥
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertCategory {
    Stock,           // 临界库存
    Trend,           // 高流速风险
    Markdown,        // 降价建议
    StockoutHistory, // 历史断货
    Transfer,        // 大额调拨
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertCategory::Stock => write!(f, "STOCK"),
            AlertCategory::Trend => write!(f, "TREND"),
            AlertCategory::Markdown => write!(f, "MARKDOWN"),
            AlertCategory::StockoutHistory => write!(f, "STOCKOUT_HISTORY"),
            AlertCategory::Transfer => write!(f, "TRANSFER"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_display_roundtrip() {
        for segment in Segment::ALL {
            let json = serde_json::to_string(&segment).unwrap();
            assert_eq!(json, format!("\"{}\"", segment));
        }
    }

    #[test]
    fn test_depot_parse() {
        assert_eq!(Depot::parse("akyazi"), Some(Depot::Akyazi));
        assert_eq!(Depot::parse(" ANA_DEPO "), Some(Depot::AnaDepo));
        assert_eq!(Depot::parse("oms"), Some(Depot::Oms));
        assert_eq!(Depot::parse("unknown"), None);
    }

    #[test]
    fn test_alert_level_priority_order() {
        assert!(AlertLevel::Critical.base_priority() > AlertLevel::Warning.base_priority());
        assert!(AlertLevel::Warning.base_priority() > AlertLevel::Info.base_priority());
    }
}
