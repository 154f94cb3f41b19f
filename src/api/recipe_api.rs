// ==========================================
// 配方替代优化API
// ==========================================
// 职责: 封装单次/批量配方优化,连接请求边界与优化引擎
// 说明: 目录以 Arc 共享只读,任意并发调用无需加锁
// ==========================================

use crate::api::dto::RecipeRequestDto;
use crate::api::error::{ApiError, ApiResult};
use crate::config::OptimizerConfigReader;
use crate::domain::catalog::{Catalog, CatalogSummary};
use crate::domain::recipe::{OptimizedRecipe, RecipeRequest};
use crate::engine::RecipeOptimizer;
use std::sync::Arc;
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

/// 配方优化API
#[derive(Debug, Clone)]
pub struct RecipeApi {
    catalog: Arc<Catalog>,
    optimizer: RecipeOptimizer,
}

impl RecipeApi {
    /// 创建新的RecipeApi实例
    ///
    /// # 参数
    /// - catalog: 已加载的原料目录
    /// - config: 配置读取器（提供用量容差）
    pub fn new(catalog: Arc<Catalog>, config: &dyn OptimizerConfigReader) -> Self {
        Self::with_optimizer(catalog, RecipeOptimizer::new(config.get_amount_tolerance()))
    }

    pub fn with_optimizer(catalog: Arc<Catalog>, optimizer: RecipeOptimizer) -> Self {
        Self { catalog, optimizer }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// 优化单个配方（已完成边界校验的领域请求）
    pub fn optimize(&self, request: &RecipeRequest) -> ApiResult<OptimizedRecipe> {
        self.optimizer
            .optimize(&self.catalog, request)
            .map_err(ApiError::from)
    }

    /// 优化单个配方（请求 DTO）
    ///
    /// # 返回
    /// - Ok(OptimizedRecipe): 按请求行顺序的替代配方
    /// - Err(ApiError): InvalidInput / InvalidRecipe / NoEligibleCandidate / UnknownSimilarityIndex
    pub fn optimize_recipe(&self, dto: RecipeRequestDto) -> ApiResult<OptimizedRecipe> {
        let request = dto.into_request()?;
        self.optimize(&request)
    }

    /// 优化单个配方（JSON 文本）
    pub fn optimize_json(&self, payload: &str) -> ApiResult<OptimizedRecipe> {
        let dto = RecipeRequestDto::from_json(payload)?;
        self.optimize_recipe(dto)
    }

    /// 批量优化（并发执行）
    ///
    /// 每个请求在独立的阻塞任务中执行,持有目录的 Arc 副本;
    /// 单个请求失败不影响其他请求,结果顺序与输入一致
    pub async fn optimize_batch(
        &self,
        requests: Vec<RecipeRequestDto>,
    ) -> Vec<ApiResult<OptimizedRecipe>> {
        use futures::future::join_all;

        info!(count = requests.len(), "开始批量优化");

        let tasks = requests.into_iter().enumerate().map(|(position, dto)| {
            let catalog = Arc::clone(&self.catalog);
            let optimizer = self.optimizer;
            let span = info_span!("optimize_request", request_id = %Uuid::new_v4(), position);

            async move {
                let handle = tokio::task::spawn_blocking(move || {
                    let _entered = span.enter();
                    let request = dto.into_request()?;
                    optimizer
                        .optimize(&catalog, &request)
                        .map_err(ApiError::from)
                });

                match handle.await {
                    Ok(result) => {
                        if let Err(e) = &result {
                            warn!(position, code = e.code(), error = %e, "批量请求失败");
                        }
                        result
                    }
                    Err(e) => {
                        error!(position, error = %e, "优化任务异常退出");
                        Err(ApiError::InternalError(format!("优化任务异常退出: {}", e)))
                    }
                }
            }
        });

        let results = join_all(tasks).await;

        info!(
            total = results.len(),
            success = results.iter().filter(|r| r.is_ok()).count(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "批量优化完成"
        );

        results
    }

    /// 目录概况
    pub fn catalog_summary(&self) -> CatalogSummary {
        self.catalog.summary()
    }
}
