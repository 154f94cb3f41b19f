// ==========================================
// 配方替代优化系统 - 引擎层
// ==========================================
// 职责: 实现替代选料规则
// 红线: 引擎不读文件,不修改目录,所有失败以类型化错误返回
// ==========================================

pub mod eligibility;
pub mod eligibility_core;
pub mod error;
pub mod optimizer;
pub mod recipe_validator;
pub mod selector;

// 重导出核心引擎
pub use eligibility::{ConstraintFilter, EligibleSubset};
pub use eligibility_core::{EligibilityCore, EligibilityVerdict};
pub use error::{InvalidLine, OptimizeError, OptimizeResult};
pub use optimizer::RecipeOptimizer;
pub use recipe_validator::{RecipeValidator, DEFAULT_AMOUNT_TOLERANCE, EXPECTED_TOTAL_AMOUNT};
pub use selector::Selector;
