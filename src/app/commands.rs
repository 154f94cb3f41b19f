// ==========================================
// 配方替代优化系统 - 应用命令（按域拆分）
// ==========================================
// 职责: JSON 命令定义,连接外部调用方与后端 API
// 约定: 成功返回结果 JSON,失败返回错误信封 JSON
// ==========================================

mod catalog;
mod common;
mod recipe;

pub use catalog::*;
pub use common::{map_api_error, ErrorResponse};
pub use recipe::*;
