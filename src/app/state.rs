// ==========================================
// 配方替代优化系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 生命周期: 启动时加载配置与目录（失败即终止）,此后只读
// ==========================================

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::RecipeApi;
use crate::config::{ConfigManager, OptimizerConfig, OptimizerConfigReader};
use crate::domain::catalog::Catalog;
use crate::importer::{CatalogLoader, CatalogLoaderImpl};
use tracing::info;

/// 应用状态
///
/// 包含配置、共享目录与API实例
pub struct AppState {
    /// 生效配置
    pub config: OptimizerConfig,

    /// 原料目录（只读共享）
    pub catalog: Arc<Catalog>,

    /// 配方优化API
    pub recipe_api: Arc<RecipeApi>,
}

impl AppState {
    /// 按默认优先级解析生效配置
    ///
    /// # 参数
    /// - lookup: 环境变量读取函数
    ///
    /// # 返回
    /// - Err(ApiError::ConfigError): 配置文件缺失/格式错误或覆写值非法
    pub fn resolve_config<F>(lookup: F) -> ApiResult<OptimizerConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let manager = ConfigManager::load_with(lookup)?;
        Ok(manager.into_config())
    }

    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - config: 生效配置（catalog_path 指向目录文件）
    ///
    /// # 返回
    /// - Err(ApiError::CatalogLoadError): 目录文件缺失或格式错误
    pub async fn new(config: OptimizerConfig) -> ApiResult<Self> {
        let catalog_path = config.get_catalog_path();
        info!(catalog_path = %catalog_path.display(), "初始化AppState");

        let loader = CatalogLoaderImpl::new();
        let catalog = loader.load_from_file(&catalog_path).await?;

        Ok(Self::with_catalog(config, catalog))
    }

    /// 由已加载目录创建（测试/嵌入场景）
    pub fn with_catalog(config: OptimizerConfig, catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        let recipe_api = Arc::new(RecipeApi::new(Arc::clone(&catalog), &config));

        info!(
            records = catalog.len(),
            groups = catalog.similarity_indexes().len(),
            "AppState初始化完成"
        );

        Self {
            config,
            catalog,
            recipe_api,
        }
    }
}
