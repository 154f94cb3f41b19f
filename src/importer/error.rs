// ==========================================
// 配方替代优化系统 - 目录导入错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 目录导入错误只在启动阶段出现,不会在单次请求中暴露
// ==========================================

use thiserror::Error;

/// 目录导入错误类型（CatalogLoadError）
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 行级数据错误 =====
    #[error("必填字段缺失 (行 {row}): {field}")]
    MissingField { row: usize, field: String },

    #[error("价格格式错误 (行 {row}): {value}（{message}）")]
    InvalidPrice {
        row: usize,
        value: String,
        message: String,
    },

    #[error("供货范围格式错误 (行 {row}): {value}")]
    InvalidAvailability { row: usize, value: String },

    #[error("熔点格式错误 (行 {row}): {value}")]
    InvalidMeltingPoint { row: usize, value: String },

    #[error("原料号重复 (行 {row}): {id}，首次出现于行 {first_row}")]
    DuplicateId {
        row: usize,
        id: String,
        first_row: usize,
    },

    // ===== 目录级错误 =====
    #[error("原料目录为空: {0}")]
    EmptyCatalog(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 行级错误对应的数据行号（文件级错误返回 None）
    pub fn row(&self) -> Option<usize> {
        match self {
            ImportError::MissingField { row, .. }
            | ImportError::InvalidPrice { row, .. }
            | ImportError::InvalidAvailability { row, .. }
            | ImportError::InvalidMeltingPoint { row, .. }
            | ImportError::DuplicateId { row, .. } => Some(*row),
            _ => None,
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_accessor() {
        let err = ImportError::InvalidPrice {
            row: 7,
            value: "$abc".to_string(),
            message: "无法解析为数值".to_string(),
        };
        assert_eq!(err.row(), Some(7));
        assert!(err.to_string().contains("行 7"));
        assert!(err.to_string().contains("$abc"));

        let err = ImportError::FileNotFound("missing.csv".to_string());
        assert_eq!(err.row(), None);
    }
}
