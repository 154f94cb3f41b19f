// ==========================================
// 配方替代优化系统 - API 层
// ==========================================
// 职责: 提供配方优化接口,供应用层命令与 CLI 调用
// ==========================================

pub mod dto;
pub mod error;
pub mod recipe_api;

// 重导出核心类型
pub use dto::{ComponentDto, RecipeRequestDto};
pub use error::{ApiError, ApiResult};
pub use recipe_api::RecipeApi;
