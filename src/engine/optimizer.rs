// ==========================================
// 配方替代优化系统 - 配方优化引擎
// ==========================================
// 职责: 校验 → 约束过滤（每请求一次）→ 逐行最低价选料 → 成本汇总
// 红线: 单遍、无副作用;任一行无候选即整单失败,不返回部分配方
// ==========================================

use crate::domain::catalog::Catalog;
use crate::domain::recipe::{OptimizedLine, OptimizedRecipe, RecipeRequest};
use crate::engine::eligibility::ConstraintFilter;
use crate::engine::error::{OptimizeError, OptimizeResult};
use crate::engine::recipe_validator::RecipeValidator;
use crate::engine::selector::Selector;
use tracing::{debug, info, instrument, warn};

// ==========================================
// RecipeOptimizer - 配方优化引擎
// ==========================================
// 不持有目录,目录由调用方以只读引用传入
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeOptimizer {
    validator: RecipeValidator,
}

impl RecipeOptimizer {
    /// 创建优化引擎
    ///
    /// # 参数
    /// - amount_tolerance: 用量合计容差
    pub fn new(amount_tolerance: f64) -> Self {
        Self {
            validator: RecipeValidator::new(amount_tolerance),
        }
    }

    pub fn amount_tolerance(&self) -> f64 {
        self.validator.tolerance()
    }

    /// 优化单个配方
    ///
    /// # 流程
    /// 1. 用量校验（失败 → InvalidRecipe,不选料）
    /// 2. 按请求级约束计算可替代子集（仅一次）
    /// 3. 逐行选最低价;无候选 → UnknownSimilarityIndex / NoEligibleCandidate
    /// 4. 组装结果行,汇总 total_cost,保持请求行顺序
    #[instrument(skip(self, catalog, request), fields(lines = request.components.len(), country = %request.country))]
    pub fn optimize(&self, catalog: &Catalog, request: &RecipeRequest) -> OptimizeResult<OptimizedRecipe> {
        // === 步骤 1: 用量校验 ===
        if let Err(e) = self.validator.validate(request) {
            warn!(error = %e, "配方用量校验失败");
            return Err(e);
        }

        // === 步骤 2: 约束过滤 ===
        let subset = ConstraintFilter::eligible_subset(catalog, request.melting_point, &request.country);

        // === 步骤 3: 逐行选料 ===
        let mut lines = Vec::with_capacity(request.components.len());
        for component in &request.components {
            let selected = match Selector::select_cheapest(&subset, &component.similarity_index) {
                Some(record) => record,
                None => {
                    let err = Self::not_found(catalog, request, &component.similarity_index);
                    warn!(error = %err, "选料失败,整单终止");
                    return Err(err);
                }
            };

            debug!(
                similarity_index = %component.similarity_index,
                selected = %selected.id,
                price = selected.price,
                amount = component.amount,
                "选料完成"
            );
            lines.push(OptimizedLine::from_selection(selected, component));
        }

        // === 步骤 4: 成本汇总 ===
        let recipe = OptimizedRecipe::from_lines(lines);
        info!(total_cost = recipe.total_cost, "配方优化完成");
        Ok(recipe)
    }

    /// 区分 "目录中无此指数" 与 "有记录但均不满足约束"
    fn not_found(catalog: &Catalog, request: &RecipeRequest, similarity_index: &str) -> OptimizeError {
        let group_size = catalog.records_by_similarity(similarity_index).len();
        if group_size == 0 {
            OptimizeError::UnknownSimilarityIndex {
                similarity_index: similarity_index.to_string(),
            }
        } else {
            OptimizeError::NoEligibleCandidate {
                similarity_index: similarity_index.to_string(),
                melting_point: request.melting_point,
                country: request.country.clone(),
                group_size,
            }
        }
    }
}
