// ==========================================
// 配方替代优化系统 - 原料目录导入器实现
// ==========================================
// 职责: 整合导入流程,从文件到只读 Catalog
// 流程: 解析 → 映射 → 必填校验 → 重复检测 → 清洗 → Catalog
// 红线: 全有或全无,任一行非法即整体失败
// ==========================================

use crate::domain::catalog::Catalog;
use crate::domain::material::{MaterialRecord, RawMaterialRow};
use crate::importer::catalog_loader_trait::{
    CatalogLoader, ConflictHandler, DataCleaner, FieldMapper, FileParser,
};
use crate::importer::conflict_handler::ConflictHandler as ConflictHandlerImpl;
use crate::importer::data_cleaner::DataCleaner as DataCleanerImpl;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{
    FieldMapper as FieldMapperImpl, COL_AVAILABILITY, COL_ID, COL_PRICE, COL_SIMILARITY_INDEX,
};
use crate::importer::file_parser::UniversalFileParser;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

// ==========================================
// CatalogLoaderImpl - 原料目录导入器
// ==========================================
pub struct CatalogLoaderImpl {
    file_parser: Arc<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleaner>,
    conflict_handler: Box<dyn ConflictHandler>,
}

impl Default for CatalogLoaderImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogLoaderImpl {
    /// 使用默认组件创建导入器（按扩展名选择 CSV / Excel）
    pub fn new() -> Self {
        Self::with_parser(Arc::new(UniversalFileParser))
    }

    /// 使用指定文件解析器创建导入器
    pub fn with_parser(file_parser: Arc<dyn FileParser>) -> Self {
        Self {
            file_parser,
            field_mapper: Box::new(FieldMapperImpl),
            data_cleaner: Box::new(DataCleanerImpl),
            conflict_handler: Box::new(ConflictHandlerImpl),
        }
    }

    /// 必填字段校验（id / similarity_index / availability / price）
    fn validate_required(&self, row: &RawMaterialRow) -> ImportResult<()> {
        let required = [
            (COL_ID, &row.id),
            (COL_SIMILARITY_INDEX, &row.similarity_index),
            (COL_AVAILABILITY, &row.availability),
            (COL_PRICE, &row.price),
        ];

        for (field, value) in required {
            if value.is_none() {
                return Err(ImportError::MissingField {
                    row: row.row_number,
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }

    /// 清洗单行 → MaterialRecord
    fn clean_row(&self, row: RawMaterialRow, catalog_order: usize) -> ImportResult<MaterialRecord> {
        let row_number = row.row_number;
        let missing = |field: &str| ImportError::MissingField {
            row: row_number,
            field: field.to_string(),
        };

        let price_raw = row.price.as_deref().ok_or_else(|| missing(COL_PRICE))?;
        let availability_raw = row
            .availability
            .as_deref()
            .ok_or_else(|| missing(COL_AVAILABILITY))?;

        let price = self.data_cleaner.parse_price(price_raw, row_number)?;
        let availability = self
            .data_cleaner
            .parse_availability(availability_raw, row_number)?;
        let melting_point = self
            .data_cleaner
            .parse_melting_point(row.melting_point.as_deref(), row_number)?;

        Ok(MaterialRecord {
            id: row.id.ok_or_else(|| missing(COL_ID))?,
            similarity_index: row
                .similarity_index
                .ok_or_else(|| missing(COL_SIMILARITY_INDEX))?,
            melting_point,
            availability,
            price,
            catalog_order,
        })
    }
}

#[async_trait]
impl CatalogLoader for CatalogLoaderImpl {
    #[instrument(skip(self, file_path))]
    async fn load_from_file<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<Catalog> {
        let start_time = Instant::now();
        let path = file_path.as_ref().to_path_buf();
        let source = path.display().to_string();
        info!(source = %source, "开始加载原料目录");

        // === 步骤 1: 解析文件（阻塞 I/O 放到 blocking 线程池）===
        debug!("步骤 1: 解析文件");
        let parser = Arc::clone(&self.file_parser);
        let raw_rows = tokio::task::spawn_blocking(move || parser.parse_to_raw_records(&path))
            .await
            .map_err(|e| ImportError::InternalError(format!("解析任务异常终止: {}", e)))?
            .map_err(|e| {
                error!(error = %e, "文件解析失败");
                e
            })?;
        info!(total_rows = raw_rows.len(), "文件解析完成");

        let catalog = self.load_from_rows(raw_rows, Some(source))?;

        info!(
            records = catalog.len(),
            groups = catalog.similarity_indexes().len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "原料目录加载完成"
        );
        Ok(catalog)
    }

    fn load_from_rows(
        &self,
        rows: Vec<HashMap<String, String>>,
        source: Option<String>,
    ) -> ImportResult<Catalog> {
        // === 步骤 2: 字段映射 ===
        debug!("步骤 2: 字段映射");
        let mapped: Vec<RawMaterialRow> = rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.field_mapper.map_to_raw_row(row, idx + 1))
            .collect();

        // === 步骤 3: 必填校验 ===
        debug!("步骤 3: 必填校验");
        for row in &mapped {
            self.validate_required(row).map_err(|e| {
                error!(row_number = row.row_number, error = %e, "必填字段缺失");
                e
            })?;
        }

        // === 步骤 4: 重复检测 ===
        debug!("步骤 4: 重复检测");
        if let Some((row, id, first_row)) = self
            .conflict_handler
            .detect_duplicates(&mapped)
            .into_iter()
            .next()
        {
            error!(row_number = row, id = %id, first_row = first_row, "原料号重复");
            return Err(ImportError::DuplicateId { row, id, first_row });
        }

        // === 步骤 5: 清洗与类型转换 ===
        debug!("步骤 5: 清洗与类型转换");
        let mut records = Vec::with_capacity(mapped.len());
        for (order, row) in mapped.into_iter().enumerate() {
            let row_number = row.row_number;
            let record = self.clean_row(row, order).map_err(|e| {
                error!(row_number = row_number, error = %e, "行数据非法");
                e
            })?;
            records.push(record);
        }

        if records.is_empty() {
            return Err(ImportError::EmptyCatalog(
                source.unwrap_or_else(|| "<rows>".to_string()),
            ));
        }

        Ok(Catalog::from_records(records, source))
    }
}
