// ==========================================
// 配方替代优化系统 - 配置层
// ==========================================
// 职责: 系统配置管理,支持文件与环境变量覆写
// 存储: TOML 配置文件
// ==========================================

pub mod config_manager;
pub mod config_reader;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, get_default_catalog_path, get_default_config_path, ConfigError, ConfigManager,
    ConfigResult, OptimizerConfig,
};
pub use config_reader::OptimizerConfigReader;
