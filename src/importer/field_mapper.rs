// ==========================================
// 配方替代优化系统 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 标准字段映射（支持列名别名）
// 说明: 只做映射不做类型转换,转换在 DataCleaner 完成
// ==========================================

use crate::domain::material::RawMaterialRow;
use crate::importer::catalog_loader_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;

// ===== 标准列名 =====
pub const COL_ID: &str = "Raw Material ID";
pub const COL_SIMILARITY_INDEX: &str = "Similarity Index";
pub const COL_MELTING_POINT: &str = "Melting Point";
pub const COL_AVAILABILITY: &str = "Availability in Country";
pub const COL_PRICE: &str = "Price";

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_to_raw_row(&self, row: &HashMap<String, String>, row_number: usize) -> RawMaterialRow {
        RawMaterialRow {
            id: self.get_string(row, COL_ID),
            similarity_index: self.get_string(row, COL_SIMILARITY_INDEX),
            melting_point: self.get_string(row, COL_MELTING_POINT),
            availability: self.get_string(row, COL_AVAILABILITY),
            price: self.get_string(row, COL_PRICE),
            row_number,
        }
    }
}

impl FieldMapper {
    /// 提取字符串字段（空白视为缺失）,支持多个可能的列名（别名）
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        let aliases: &[&str] = match key {
            COL_ID => &[COL_ID, "id", "material_id", "raw_material_id"],
            COL_SIMILARITY_INDEX => &[COL_SIMILARITY_INDEX, "similarity_index", "similarityIndex"],
            COL_MELTING_POINT => &[COL_MELTING_POINT, "melting_point", "meltingPoint"],
            COL_AVAILABILITY => &[COL_AVAILABILITY, "Availability", "availability"],
            COL_PRICE => &[COL_PRICE, "price", "Unit Price"],
            _ => &[],
        };

        aliases
            .iter()
            .chain(std::iter::once(&key))
            .filter_map(|alias| row.get(*alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_field_mapper_standard_columns() {
        let raw = row(&[
            ("Raw Material ID", "RM-001"),
            ("Similarity Index", "54"),
            ("Melting Point", "210"),
            ("Availability in Country", "ALL"),
            ("Price", "$2.80"),
        ]);

        let mapped = FieldMapper.map_to_raw_row(&raw, 3);
        assert_eq!(mapped.id.as_deref(), Some("RM-001"));
        assert_eq!(mapped.similarity_index.as_deref(), Some("54"));
        assert_eq!(mapped.melting_point.as_deref(), Some("210"));
        assert_eq!(mapped.availability.as_deref(), Some("ALL"));
        assert_eq!(mapped.price.as_deref(), Some("$2.80"));
        assert_eq!(mapped.row_number, 3);
    }

    #[test]
    fn test_field_mapper_aliases_and_blanks() {
        let raw = row(&[
            ("material_id", "RM-002"),
            ("similarity_index", "231"),
            ("melting_point", "   "),
            ("availability", "Only China"),
            ("price", "1.5"),
        ]);

        let mapped = FieldMapper.map_to_raw_row(&raw, 1);
        assert_eq!(mapped.id.as_deref(), Some("RM-002"));
        assert_eq!(mapped.similarity_index.as_deref(), Some("231"));
        assert_eq!(mapped.melting_point, None);
        assert_eq!(mapped.availability.as_deref(), Some("Only China"));
        assert_eq!(mapped.price.as_deref(), Some("1.5"));
    }
}
