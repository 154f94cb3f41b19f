// ==========================================
// 配方替代优化系统 - 目录导入 Trait
// ==========================================
// 职责: 定义目录导入管道各阶段接口（不包含实现）
// 管道: 文件解析 → 字段映射 → 清洗 → 重复检测 → Catalog
// ==========================================

use crate::domain::catalog::Catalog;
use crate::domain::material::RawMaterialRow;
use crate::domain::types::Availability;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// CatalogLoader Trait
// ==========================================
// 用途: 目录导入主接口
// 实现者: CatalogLoaderImpl
#[async_trait]
pub trait CatalogLoader: Send + Sync {
    /// 从文件加载原料目录（按扩展名选择 CSV / Excel 解析器）
    ///
    /// # 返回
    /// - Ok(Catalog): 完整目录（全部行校验通过）
    /// - Err(ImportError): 任一行非法即整体失败
    async fn load_from_file<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<Catalog>;

    /// 从已解析的原始行构建目录（目录源不是文件时使用）
    fn load_from_rows(
        &self,
        rows: Vec<HashMap<String, String>>,
        source: Option<String>,
    ) -> ImportResult<Catalog>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（HashMap<列名, 值>）
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 将原始行记录映射为 RawMaterialRow
    ///
    /// # 参数
    /// - row: 原始行记录（HashMap<列名, 值>）
    /// - row_number: 数据行号（1 起）
    fn map_to_raw_row(&self, row: &HashMap<String, String>, row_number: usize) -> RawMaterialRow;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗与类型转换接口（阶段 2）
// 实现者: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// 解析价格（去除货币符号前缀与千分位）
    ///
    /// # 示例
    /// - "$2.80" → 2.80
    /// - " $ 1,250.00 " → 1250.0
    fn parse_price(&self, raw: &str, row: usize) -> ImportResult<f64>;

    /// 解析供货范围
    ///
    /// # 格式
    /// - "ALL" → Availability::All
    /// - "ALL except A, B" → Availability::Exclude
    /// - "Only A, B" → Availability::Include
    fn parse_availability(&self, raw: &str, row: usize) -> ImportResult<Availability>;

    /// 解析熔点（空值 → None）
    fn parse_melting_point(&self, raw: Option<&str>, row: usize) -> ImportResult<Option<f64>>;
}

// ==========================================
// ConflictHandler Trait
// ==========================================
// 用途: 原料号重复检测
// 实现者: ConflictHandlerImpl
pub trait ConflictHandler: Send + Sync {
    /// 检测目录内重复原料号
    ///
    /// # 返回
    /// - Vec<(行号, id, 首次出现行号)>: 重复记录（不含首次出现）
    fn detect_duplicates(&self, rows: &[RawMaterialRow]) -> Vec<(usize, String, usize)>;
}
