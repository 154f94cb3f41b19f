// ==========================================
// 配方替代优化系统 - 应用层
// ==========================================
// 职责: 应用状态装配与 JSON 命令,连接调用方与后端
// ==========================================

pub mod commands;
pub mod state;

// 重导出
pub use commands::*;
pub use state::AppState;
