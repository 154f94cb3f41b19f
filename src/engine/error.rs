// ==========================================
// 配方替代优化系统 - 引擎层错误类型
// ==========================================
// 职责: 单次优化请求的类型化失败结果
// 红线: 全有或全无,失败时不返回部分配方
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 用量非法的请求行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidLine {
    pub line_index: usize, // 请求行下标（0 起）
    pub similarity_index: String,
    pub amount: f64,
    pub reason: String,
}

/// 优化引擎错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizeError {
    /// 用量校验失败（未执行任何选料）
    #[error("配方用量非法: 合计={actual_sum}, 期望={expected_sum}")]
    InvalidRecipe {
        actual_sum: f64,
        expected_sum: f64,
        offending_lines: Vec<InvalidLine>,
    },

    /// 相似度指数存在,但无记录满足熔点/国家约束
    #[error("无可用替代原料: similarity_index={similarity_index}, melting_point>={melting_point}, country={country}（同组候选 {group_size} 个均不满足约束）")]
    NoEligibleCandidate {
        similarity_index: String,
        melting_point: f64,
        country: String,
        group_size: usize,
    },

    /// 目录中不存在该相似度指数
    #[error("未知相似度指数: {similarity_index}")]
    UnknownSimilarityIndex { similarity_index: String },
}

impl OptimizeError {
    /// 失败涉及的相似度指数（用量校验失败返回 None）
    pub fn similarity_index(&self) -> Option<&str> {
        match self {
            OptimizeError::NoEligibleCandidate { similarity_index, .. }
            | OptimizeError::UnknownSimilarityIndex { similarity_index } => Some(similarity_index),
            OptimizeError::InvalidRecipe { .. } => None,
        }
    }
}

/// Result 类型别名
pub type OptimizeResult<T> = Result<T, OptimizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_index() {
        let err = OptimizeError::NoEligibleCandidate {
            similarity_index: "54".to_string(),
            melting_point: 200.0,
            country: "China".to_string(),
            group_size: 2,
        };
        assert!(err.to_string().contains("similarity_index=54"));
        assert_eq!(err.similarity_index(), Some("54"));

        let err = OptimizeError::UnknownSimilarityIndex {
            similarity_index: "9999".to_string(),
        };
        assert!(err.to_string().contains("9999"));
    }

    #[test]
    fn test_invalid_recipe_message_carries_sum() {
        let err = OptimizeError::InvalidRecipe {
            actual_sum: 0.9,
            expected_sum: 1.0,
            offending_lines: Vec::new(),
        };
        assert!(err.to_string().contains("合计=0.9"));
        assert_eq!(err.similarity_index(), None);
    }
}
