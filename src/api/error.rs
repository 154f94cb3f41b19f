// ==========================================
// 配方替代优化系统 - API层错误类型
// ==========================================
// 职责: 汇总导入/引擎/配置错误,转换为请求边界可识别的错误
// 要求: 所有错误信息必须包含显式原因
// ==========================================

use crate::config::ConfigError;
use crate::engine::error::{InvalidLine, OptimizeError};
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 配方优化错误
    // ==========================================
    #[error("配方用量非法: 合计={actual_sum}, 期望={expected_sum}")]
    InvalidRecipe {
        actual_sum: f64,
        expected_sum: f64,
        offending_lines: Vec<InvalidLine>,
    },

    #[error("无可用替代原料: similarity_index={similarity_index}, melting_point>={melting_point}, country={country}")]
    NoEligibleCandidate {
        similarity_index: String,
        melting_point: f64,
        country: String,
        group_size: usize,
    },

    #[error("未知相似度指数: {0}")]
    UnknownSimilarityIndex(String),

    // ==========================================
    // 请求边界错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 启动期错误
    // ==========================================
    #[error("原料目录加载失败: {message}")]
    CatalogLoadError {
        message: String,
        row: Option<usize>,
    },

    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 错误代码（对外契约）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidRecipe { .. } => "INVALID_RECIPE",
            ApiError::NoEligibleCandidate { .. } => "NO_ELIGIBLE_CANDIDATE",
            ApiError::UnknownSimilarityIndex(_) => "UNKNOWN_SIMILARITY_INDEX",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::CatalogLoadError { .. } => "CATALOG_LOAD_ERROR",
            ApiError::ConfigError(_) => "CONFIG_ERROR",
            ApiError::InternalError(_) | ApiError::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// 结构化诊断信息（可选）
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::InvalidRecipe {
                actual_sum,
                expected_sum,
                offending_lines,
            } => Some(serde_json::json!({
                "actualSum": actual_sum,
                "expectedSum": expected_sum,
                "offendingLines": offending_lines,
            })),
            ApiError::NoEligibleCandidate {
                similarity_index,
                melting_point,
                country,
                group_size,
            } => Some(serde_json::json!({
                "similarityIndex": similarity_index,
                "meltingPoint": melting_point,
                "country": country,
                "groupSize": group_size,
            })),
            ApiError::UnknownSimilarityIndex(similarity_index) => Some(serde_json::json!({
                "similarityIndex": similarity_index,
            })),
            ApiError::CatalogLoadError { row: Some(row), .. } => Some(serde_json::json!({
                "row": row,
            })),
            _ => None,
        }
    }
}

// ==========================================
// 从 OptimizeError 转换
// ==========================================
impl From<OptimizeError> for ApiError {
    fn from(err: OptimizeError) -> Self {
        match err {
            OptimizeError::InvalidRecipe {
                actual_sum,
                expected_sum,
                offending_lines,
            } => ApiError::InvalidRecipe {
                actual_sum,
                expected_sum,
                offending_lines,
            },
            OptimizeError::NoEligibleCandidate {
                similarity_index,
                melting_point,
                country,
                group_size,
            } => ApiError::NoEligibleCandidate {
                similarity_index,
                melting_point,
                country,
                group_size,
            },
            OptimizeError::UnknownSimilarityIndex { similarity_index } => {
                ApiError::UnknownSimilarityIndex(similarity_index)
            }
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::CatalogLoadError {
            row: err.row(),
            message: err.to_string(),
        }
    }
}

// ==========================================
// 从 ConfigError 转换
// ==========================================
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimize_error_codes() {
        let err: ApiError = OptimizeError::InvalidRecipe {
            actual_sum: 0.7,
            expected_sum: 1.0,
            offending_lines: vec![],
        }
        .into();
        assert_eq!(err.code(), "INVALID_RECIPE");

        let err: ApiError = OptimizeError::NoEligibleCandidate {
            similarity_index: "231".to_string(),
            melting_point: 250.0,
            country: "China".to_string(),
            group_size: 3,
        }
        .into();
        assert_eq!(err.code(), "NO_ELIGIBLE_CANDIDATE");
        let details = err.details().unwrap();
        assert_eq!(details["similarityIndex"], "231");
        assert_eq!(details["groupSize"], 3);

        let err: ApiError = OptimizeError::UnknownSimilarityIndex {
            similarity_index: "9999".to_string(),
        }
        .into();
        assert_eq!(err.code(), "UNKNOWN_SIMILARITY_INDEX");
        assert!(err.to_string().contains("9999"));
    }

    #[test]
    fn test_invalid_recipe_details() {
        let err: ApiError = OptimizeError::InvalidRecipe {
            actual_sum: 1.2,
            expected_sum: 1.0,
            offending_lines: vec![InvalidLine {
                line_index: 1,
                similarity_index: "54".to_string(),
                amount: 1.2,
                reason: "用量超出 (0, 1]".to_string(),
            }],
        }
        .into();

        let details = err.details().unwrap();
        assert_eq!(details["actualSum"], 1.2);
        assert_eq!(details["expectedSum"], 1.0);
        assert_eq!(details["offendingLines"][0]["lineIndex"], 1);
    }

    #[test]
    fn test_import_error_maps_to_catalog_load_error() {
        let err: ApiError = ImportError::EmptyCatalog("ingredients.csv".to_string()).into();
        assert_eq!(err.code(), "CATALOG_LOAD_ERROR");
        assert!(err.details().is_none());

        let err: ApiError = ImportError::MissingField {
            row: 3,
            field: "Price".to_string(),
        }
        .into();
        assert_eq!(err.code(), "CATALOG_LOAD_ERROR");
        assert_eq!(err.details().unwrap()["row"], 3);
    }

    #[test]
    fn test_other_maps_to_internal_error() {
        let err: ApiError = anyhow::anyhow!("boom").into();
        assert_eq!(err.code(), "INTERNAL_ERROR");
    }
}
