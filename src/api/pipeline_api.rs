// ==========================================
// 零售库存分配决策支持系统 - 流水线 API
// ==========================================
// 职责: 四级流水线编排（指标 → 定段 → 分配 → 告警），
//       记忆各阶段输出表，支持换配置后仅重跑下游
// 红线: 配置以不可变值传入各阶段，阶段之间绝不回写
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::AnalysisConfig;
use crate::domain::alert::{AlertRecord, AlertSummary};
use crate::domain::allocation::AllocationRecord;
use crate::domain::product::{ProductRecord, ScoredProduct, SegmentedProduct};
use crate::engine::{
    AlertEngine, AllocationEngine, DemandEstimator, MetricEngine, SegmentationEngine,
    TransferPriority, TrendDemandEstimator,
};
use tracing::{info, instrument};

// ==========================================
// PipelineApi - 流水线编排
// ==========================================
pub struct PipelineApi {
    config: AnalysisConfig,
    estimator: Box<dyn DemandEstimator>,

    metric_engine: MetricEngine,
    segmentation_engine: SegmentationEngine,
    allocation_engine: AllocationEngine,
    alert_engine: AlertEngine,

    // 各阶段记忆表，换配置重跑下游时复用上游
    scored: Option<Vec<ScoredProduct>>,
    segmented: Option<Vec<SegmentedProduct>>,
    plan: Option<Vec<AllocationRecord>>,
    alerts: Option<Vec<AlertRecord>>,
}

impl PipelineApi {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            estimator: Box::new(TrendDemandEstimator),
            metric_engine: MetricEngine::new(),
            segmentation_engine: SegmentationEngine::new(),
            allocation_engine: AllocationEngine::new(),
            alert_engine: AlertEngine::new(),
            scored: None,
            segmented: None,
            plan: None,
            alerts: None,
        }
    }

    /// 替换需求预测估计器（默认为趋势修正估计）
    pub fn with_estimator(mut self, estimator: Box<dyn DemandEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 全量运行四级流水线
    #[instrument(skip_all, fields(count = products.len()))]
    pub fn run(&mut self, products: &[ProductRecord]) -> ApiResult<()> {
        if products.is_empty() {
            return Err(ApiError::InvalidInput("商品表为空".to_string()));
        }

        let scored = self
            .metric_engine
            .calculate_batch(products, &self.config.metric_weights);
        let segmented = self
            .segmentation_engine
            .classify_batch(&scored, &self.config.segment_policies);
        let plan =
            self.allocation_engine
                .generate_plan(&segmented, &self.config, self.estimator.as_ref());
        let alerts = self
            .alert_engine
            .generate_all(&segmented, &plan, &self.config);

        info!(
            products = products.len(),
            alerts = alerts.len(),
            "流水线运行完成"
        );

        self.scored = Some(scored);
        self.segmented = Some(segmented);
        self.plan = Some(plan);
        self.alerts = Some(alerts);
        Ok(())
    }

    /// 换配置后仅重跑定段及其下游，指标表复用
    ///
    /// 指标权重变化需要走 `run` 全量重算
    #[instrument(skip_all)]
    pub fn rerun_downstream(&mut self, config: AnalysisConfig) -> ApiResult<()> {
        let scored = self
            .scored
            .as_ref()
            .ok_or_else(|| ApiError::NotReady("指标表不存在，请先运行 run".to_string()))?;

        self.config = config;

        let segmented = self
            .segmentation_engine
            .classify_batch(scored, &self.config.segment_policies);
        let plan =
            self.allocation_engine
                .generate_plan(&segmented, &self.config, self.estimator.as_ref());
        let alerts = self
            .alert_engine
            .generate_all(&segmented, &plan, &self.config);

        info!(alerts = alerts.len(), "下游阶段重算完成");

        self.segmented = Some(segmented);
        self.plan = Some(plan);
        self.alerts = Some(alerts);
        Ok(())
    }

    /// 清空全部记忆表
    pub fn invalidate(&mut self) {
        self.scored = None;
        self.segmented = None;
        self.plan = None;
        self.alerts = None;
    }

    // ==========================================
    // 各阶段输出表访问
    // ==========================================

    pub fn scored(&self) -> ApiResult<&[ScoredProduct]> {
        self.scored
            .as_deref()
            .ok_or_else(|| ApiError::NotReady("指标表".to_string()))
    }

    pub fn segmented(&self) -> ApiResult<&[SegmentedProduct]> {
        self.segmented
            .as_deref()
            .ok_or_else(|| ApiError::NotReady("定段表".to_string()))
    }

    pub fn allocation_plan(&self) -> ApiResult<&[AllocationRecord]> {
        self.plan
            .as_deref()
            .ok_or_else(|| ApiError::NotReady("分配计划表".to_string()))
    }

    pub fn alerts(&self) -> ApiResult<&[AlertRecord]> {
        self.alerts
            .as_deref()
            .ok_or_else(|| ApiError::NotReady("告警表".to_string()))
    }

    /// 告警汇总（基于当前记忆表现算）
    pub fn alert_summary(&self) -> ApiResult<AlertSummary> {
        Ok(self.alert_engine.summarize(self.alerts()?))
    }

    /// 调拨建议，最小件数阈值取配置 min_transfer_qty
    pub fn transfer_recommendations(
        &self,
        priority: TransferPriority,
    ) -> ApiResult<Vec<AllocationRecord>> {
        Ok(self.allocation_engine.get_transfer_recommendations(
            self.allocation_plan()?,
            priority,
            self.config.min_transfer_qty,
        ))
    }
}
