// ==========================================
// 配方替代优化系统 - 冲突处理器实现
// ==========================================
// 职责: 检测目录内重复原料号
// 策略: 任一重复即导入失败（原料号须全局唯一）
// ==========================================

use crate::domain::material::RawMaterialRow;
use crate::importer::catalog_loader_trait::ConflictHandler as ConflictHandlerTrait;
use std::collections::HashMap;

pub struct ConflictHandler;

impl ConflictHandlerTrait for ConflictHandler {
    /// 检测目录内重复原料号
    ///
    /// # 返回
    /// - Vec<(行号, id, 首次出现行号)>: 重复记录列表（不包括第一次出现）
    fn detect_duplicates(&self, rows: &[RawMaterialRow]) -> Vec<(usize, String, usize)> {
        let mut first_occurrence: HashMap<&str, usize> = HashMap::new();
        let mut duplicates = Vec::new();

        for row in rows {
            if let Some(id) = row.id.as_deref() {
                match first_occurrence.get(id) {
                    Some(&first_row) => duplicates.push((row.row_number, id.to_string(), first_row)),
                    None => {
                        first_occurrence.insert(id, row.row_number);
                    }
                }
            }
        }

        duplicates
    }
}
