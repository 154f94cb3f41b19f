// ==========================================
// 配方替代优化系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 优先级: 默认值 → TOML 配置文件 → 环境变量
// ==========================================

use crate::config::config_reader::OptimizerConfigReader;
use crate::engine::DEFAULT_AMOUNT_TOLERANCE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

// ==========================================
// 配置键（环境变量名）
// ==========================================
pub mod config_keys {
    /// 配置文件路径
    pub const CONFIG_PATH: &str = "RECIPE_OPTIMIZER_CONFIG";
    /// 原料目录文件路径
    pub const CATALOG_PATH: &str = "RECIPE_OPTIMIZER_CATALOG_PATH";
    /// 数据目录（默认目录文件所在位置）
    pub const DATA_DIR: &str = "RECIPE_OPTIMIZER_DATA_DIR";
    /// 用量合计容差
    pub const AMOUNT_TOLERANCE: &str = "RECIPE_OPTIMIZER_AMOUNT_TOLERANCE";
}

/// 应用目录名（位于系统 data/config 目录下）
pub const APP_DIR_NAME: &str = "recipe-optimizer";

/// 默认目录文件名
pub const DEFAULT_CATALOG_FILE: &str = "ingredients_info.csv";

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// OptimizerConfig - 系统配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// 原料目录文件（.csv / .xlsx / .xls）
    pub catalog_path: PathBuf,
    /// 用量合计容差
    pub amount_tolerance: f64,
    /// 日志过滤器（RUST_LOG 未设置时生效）
    pub log_filter: String,
    /// 是否输出 JSON 格式日志
    pub log_json: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            catalog_path: get_default_catalog_path(),
            amount_tolerance: DEFAULT_AMOUNT_TOLERANCE,
            log_filter: "info".to_string(),
            log_json: false,
        }
    }
}

impl OptimizerConfig {
    /// 配置值校验
    ///
    /// # 规则
    /// - amount_tolerance: 有限数值,0 < t < 0.5
    /// - log_filter: 非空
    pub fn validate(&self) -> ConfigResult<()> {
        let t = self.amount_tolerance;
        if !t.is_finite() || t <= 0.0 || t >= 0.5 {
            return Err(ConfigError::ConfigValueError {
                key: "amount_tolerance".to_string(),
                value: t.to_string(),
                message: "容差必须为 (0, 0.5) 区间内的有限数值".to_string(),
            });
        }
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::ConfigValueError {
                key: "log_filter".to_string(),
                value: self.log_filter.clone(),
                message: "日志过滤器不能为空".to_string(),
            });
        }
        Ok(())
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: OptimizerConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 按默认优先级加载配置（读取进程环境变量）
    ///
    /// 1. 默认值
    /// 2. 配置文件（RECIPE_OPTIMIZER_CONFIG 或系统配置目录下 config.toml,不存在则跳过）
    /// 3. 环境变量覆写
    pub fn load() -> ConfigResult<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// 按默认优先级加载配置
    ///
    /// # 参数
    /// - lookup: 环境变量读取函数（便于测试注入）
    pub fn load_with<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let explicit = non_empty(lookup(config_keys::CONFIG_PATH)).map(PathBuf::from);

        let mut manager = match explicit {
            // 显式指定的配置文件必须存在
            Some(path) => Self::from_file(&path)?,
            None => match get_default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::from_config(OptimizerConfig::default()),
            },
        };

        manager.apply_env_overrides(lookup)?;
        manager.config.validate()?;
        Ok(manager)
    }

    /// 从 TOML 文件加载（未写出的键取默认值）
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config = Self::parse_toml(&content, &path.display().to_string())?;
        debug!(path = %path.display(), "配置文件已读取");

        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// 从 TOML 文本解析
    pub fn parse_toml(content: &str, origin: &str) -> ConfigResult<OptimizerConfig> {
        let config: OptimizerConfig = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 由现成配置创建（测试/嵌入场景）
    pub fn from_config(config: OptimizerConfig) -> Self {
        Self {
            config,
            source: None,
        }
    }

    /// 应用环境变量覆写
    ///
    /// # 参数
    /// - lookup: 环境变量读取函数（便于测试注入）
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = non_empty(lookup(config_keys::CATALOG_PATH)) {
            self.config.catalog_path = PathBuf::from(path);
        }

        if let Some(raw) = non_empty(lookup(config_keys::AMOUNT_TOLERANCE)) {
            let tolerance = raw.parse::<f64>().map_err(|e| ConfigError::ConfigValueError {
                key: config_keys::AMOUNT_TOLERANCE.to_string(),
                value: raw.clone(),
                message: e.to_string(),
            })?;
            self.config.amount_tolerance = tolerance;
        }

        self.config.validate()
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn into_config(self) -> OptimizerConfig {
        self.config
    }

    /// 配置文件来源（使用默认值时为 None）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl OptimizerConfigReader for ConfigManager {
    fn get_catalog_path(&self) -> PathBuf {
        self.config.catalog_path.clone()
    }

    fn get_amount_tolerance(&self) -> f64 {
        self.config.amount_tolerance
    }
}

impl OptimizerConfigReader for OptimizerConfig {
    fn get_catalog_path(&self) -> PathBuf {
        self.catalog_path.clone()
    }

    fn get_amount_tolerance(&self) -> f64 {
        self.amount_tolerance
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 默认配置文件路径: <config_dir>/recipe-optimizer/config.toml
pub fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
}

/// 默认原料目录路径
///
/// 1. RECIPE_OPTIMIZER_DATA_DIR/ingredients_info.csv
/// 2. <data_dir>/recipe-optimizer/ingredients_info.csv
/// 3. ./data/ingredients_info.csv
pub fn get_default_catalog_path() -> PathBuf {
    if let Some(dir) = non_empty(std::env::var(config_keys::DATA_DIR).ok()) {
        return PathBuf::from(dir).join(DEFAULT_CATALOG_FILE);
    }

    match dirs::data_dir() {
        Some(data_dir) => data_dir.join(APP_DIR_NAME).join(DEFAULT_CATALOG_FILE),
        None => PathBuf::from("./data").join(DEFAULT_CATALOG_FILE),
    }
}
