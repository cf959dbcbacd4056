// ==========================================
// 零售库存分配决策支持系统 - 商品实体
// ==========================================
// 职责: 商品主数据 + 各阶段派生表的行类型
// 红线: total_stock 在导入阶段派生一次，管线内不可变
// ==========================================
// 数据流: ProductRecord → ScoredProduct → SegmentedProduct
// 每个阶段产出新表，不回写上游
// ==========================================

use crate::domain::types::{Depot, Segment};
use serde::{Deserialize, Serialize};

// ==========================================
// ProductRecord - 清洗后的商品行 (导入层输出)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    // ===== 标识 =====
    pub sku: String,
    pub product_name: String,
    pub category: String,
    /// 商品类型标志，只允许 1 或 2（非法值在清洗时归为 2）
    pub tip: u8,

    // ===== 定价 =====
    pub price: f64,
    pub margin_pct: f64,

    // ===== 三仓库存 =====
    pub stock_akyazi: f64,
    pub stock_ana_depo: f64,
    pub stock_oms_total: f64,
    /// 三仓之和，导入时派生
    pub total_stock: f64,

    // ===== 销售历史 =====
    pub daily_sales_avg_30d: f64,
    pub daily_sales_avg_7d: f64,
    pub daily_sales_yesterday: f64,

    // ===== 互动信号 =====
    pub view_count_7d: u32,
    pub add_to_cart_7d: u32,
    pub favorites_7d: u32,

    // ===== 质量信号 =====
    pub avg_rating: f64,
    pub review_count: u32,

    // ===== 运营历史 =====
    pub stock_out_days_last_30d: i32,
    pub campaign_flag: bool,
}

impl ProductRecord {
    /// 指定仓库的当前库存
    pub fn stock_in(&self, depot: Depot) -> f64 {
        match depot {
            Depot::Akyazi => self.stock_akyazi,
            Depot::AnaDepo => self.stock_ana_depo,
            Depot::Oms => self.stock_oms_total,
        }
    }

    /// 库存金额 (总库存 × 单价)
    pub fn stock_value(&self) -> f64 {
        self.total_stock * self.price
    }
}

// ==========================================
// ProductMetrics - 派生指标 (指标计算器输出的 9 列)
// ==========================================
// 计算顺序固定，final_score 依赖前置各列
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductMetrics {
    /// 7 日均量 / 30 日均量，1.0 = 平稳
    pub velocity_score: f64,
    /// 昨日销量 / 7 日均量，单日动量
    pub trend_score: f64,
    /// 加购率（百分比）
    pub engagement_score: f64,
    /// 周销量 / 周加购（百分比，可超 100）
    pub conversion_rate: f64,
    /// 库存可售天数，999 = 无近期销量哨兵值
    pub days_of_stock: f64,
    /// 评分 + 评论量混合质量分 (0-100 量级)
    pub quality_score: f64,
    /// 断货惩罚分，每断货日扣 3 分，下限 0
    pub stockout_penalty: f64,
    /// 活动加成乘数 (1.3 / 1.0)
    pub campaign_boost: f64,
    /// 加权综合分
    pub final_score: f64,
}

// ==========================================
// ScoredProduct - 指标计算后的行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProduct {
    pub product: ProductRecord,
    pub metrics: ProductMetrics,
}

// ==========================================
// SegmentedProduct - 定段后的行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentedProduct {
    pub product: ProductRecord,
    pub metrics: ProductMetrics,
    pub segment: Segment,
}

impl SegmentedProduct {
    pub fn sku(&self) -> &str {
        &self.product.sku
    }
}
