// ==========================================
// 配方替代优化系统 - 原料领域模型
// ==========================================
// 职责: 原料目录条目 + 导入中间结构体
// 红线: MaterialRecord 构建后只读,不得在请求处理中修改
// ==========================================

use crate::domain::types::Availability;
use serde::{Deserialize, Serialize};

// ==========================================
// MaterialRecord - 原料目录条目
// ==========================================
// 用途: 导入层写入,引擎层只读
// 不变量: id / similarity_index 非空, price >= 0 且有限
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecord {
    pub id: String,                  // 原料唯一标识（Raw Material ID）
    pub similarity_index: String,    // 相似度指数（可互换原料分组键,按字符串相等比较）
    pub melting_point: Option<f64>,  // 熔点（缺失则永不入选）
    pub availability: Availability,  // 供货范围
    pub price: f64,                  // 单价（100% 用量的成本）
    pub catalog_order: usize,        // 目录顺序（0 起,同价时的确定性决胜键）
}

// ==========================================
// RawMaterialRow - 导入中间结构体
// ==========================================
// 用途: 文件解析 → 字段映射 → 此结构 → 清洗 → MaterialRecord
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMaterialRow {
    pub id: Option<String>,
    pub similarity_index: Option<String>,
    pub melting_point: Option<String>,
    pub availability: Option<String>,
    pub price: Option<String>,

    // 元信息
    pub row_number: usize, // 原始文件数据行号（1 起,不含表头）
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_record_serializes_camel_case() {
        let record = MaterialRecord {
            id: "RM-001".to_string(),
            similarity_index: "54".to_string(),
            melting_point: Some(210.0),
            availability: Availability::All,
            price: 2.8,
            catalog_order: 0,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["similarityIndex"], "54");
        assert_eq!(json["meltingPoint"], 210.0);
        assert_eq!(json["catalogOrder"], 0);
        assert_eq!(json["availability"]["mode"], "ALL");
    }
}
