// ==========================================
// 配方替代优化系统 - 核心库
// ==========================================
// 职责: 按相似度指数为配方逐行选择最低价可替代原料
// 约束: 工艺熔点 + 生产国家可用性
// 系统定位: 只读目录 + 无状态优化引擎
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部数据
pub mod importer;

// 引擎层 - 选料规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态装配与命令
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::Availability;

// 领域实体
pub use domain::{
    Catalog, CatalogSummary, MaterialRecord, OptimizedLine, OptimizedRecipe, RecipeRequest,
    RequestedComponent,
};

// 导入
pub use importer::{CatalogLoader, CatalogLoaderImpl, ImportError};

// 引擎
pub use engine::{OptimizeError, RecipeOptimizer};

// 配置
pub use config::{ConfigManager, OptimizerConfig};

// API
pub use api::{ApiError, RecipeApi, RecipeRequestDto};

// 应用
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "配方替代优化系统";
