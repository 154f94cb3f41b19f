// ==========================================
// 配方替代优化系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读取逻辑,不含引擎逻辑
// ==========================================

pub mod catalog;
pub mod material;
pub mod recipe;
pub mod types;

// 重导出核心类型
pub use catalog::{Catalog, CatalogSummary};
pub use material::{MaterialRecord, RawMaterialRow};
pub use recipe::{OptimizedLine, OptimizedRecipe, RecipeRequest, RequestedComponent};
pub use types::Availability;
