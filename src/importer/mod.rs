// ==========================================
// 配方替代优化系统 - 导入层
// ==========================================
// 职责: 外部原料数据导入,生成只读 Catalog
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod catalog_loader;
pub mod catalog_loader_trait;
pub mod conflict_handler;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use catalog_loader::CatalogLoaderImpl;
pub use conflict_handler::ConflictHandler as ConflictHandlerImpl;
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};

// 重导出 Trait 接口
pub use catalog_loader_trait::{CatalogLoader, ConflictHandler, DataCleaner, FieldMapper, FileParser};
