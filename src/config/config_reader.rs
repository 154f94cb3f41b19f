// ==========================================
// 配方替代优化系统 - 配置读取 Trait
// ==========================================
// 职责: 定义引擎/应用层所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use std::path::PathBuf;

// ==========================================
// OptimizerConfigReader Trait
// ==========================================
// 实现者: ConfigManager, OptimizerConfig
pub trait OptimizerConfigReader: Send + Sync {
    /// 获取原料目录文件路径
    ///
    /// # 默认值
    /// - <data_dir>/recipe-optimizer/ingredients_info.csv
    fn get_catalog_path(&self) -> PathBuf;

    /// 获取用量合计容差
    ///
    /// # 默认值
    /// - 1e-6
    fn get_amount_tolerance(&self) -> f64;
}
