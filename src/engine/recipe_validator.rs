// ==========================================
// 配方替代优化系统 - 配方用量校验器
// ==========================================
// 职责: 校验每行用量 ∈ (0, 1] 且合计 = 1.0（容差内）
// 红线: 校验失败时不得执行任何选料
// ==========================================

use crate::domain::recipe::RecipeRequest;
use crate::engine::error::{InvalidLine, OptimizeError, OptimizeResult};

/// 期望用量合计（100%）
pub const EXPECTED_TOTAL_AMOUNT: f64 = 1.0;

/// 默认合计容差
pub const DEFAULT_AMOUNT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy)]
pub struct RecipeValidator {
    tolerance: f64,
}

impl Default for RecipeValidator {
    fn default() -> Self {
        Self::new(DEFAULT_AMOUNT_TOLERANCE)
    }
}

impl RecipeValidator {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// 校验请求用量
    ///
    /// # 返回
    /// - Ok(()): 校验通过
    /// - Err(InvalidRecipe): 携带实际合计与全部非法行
    pub fn validate(&self, request: &RecipeRequest) -> OptimizeResult<()> {
        let actual_sum = request.total_amount();

        let offending_lines: Vec<InvalidLine> = request
            .components
            .iter()
            .enumerate()
            .filter_map(|(idx, component)| {
                Self::amount_violation(component.amount).map(|reason| InvalidLine {
                    line_index: idx,
                    similarity_index: component.similarity_index.clone(),
                    amount: component.amount,
                    reason,
                })
            })
            .collect();

        let sum_ok = !request.components.is_empty()
            && actual_sum.is_finite()
            && (actual_sum - EXPECTED_TOTAL_AMOUNT).abs() <= self.tolerance;

        if offending_lines.is_empty() && sum_ok {
            return Ok(());
        }

        Err(OptimizeError::InvalidRecipe {
            actual_sum,
            expected_sum: EXPECTED_TOTAL_AMOUNT,
            offending_lines,
        })
    }

    /// 单行用量规则: 0 < amount <= 1
    fn amount_violation(amount: f64) -> Option<String> {
        if !amount.is_finite() {
            Some(format!("amount={} 不是有限数值", amount))
        } else if amount <= 0.0 {
            Some(format!("amount={} 必须大于 0", amount))
        } else if amount > 1.0 {
            Some(format!("amount={} 不能超过 1", amount))
        } else {
            None
        }
    }
}
