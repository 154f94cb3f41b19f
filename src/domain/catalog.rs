// ==========================================
// 配方替代优化系统 - 原料目录
// ==========================================
// 职责: 持有全部 MaterialRecord,按相似度指数提供查询
// 红线: 启动时构建一次,此后只读（通过 Arc<Catalog> 跨请求共享）
// ==========================================

use crate::domain::material::MaterialRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Catalog - 只读原料目录
// ==========================================
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<MaterialRecord>,
    // similarity_index → records 下标（保持目录顺序）
    groups: HashMap<String, Vec<usize>>,
    // 相似度指数首次出现顺序
    group_order: Vec<String>,
    source: Option<String>,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// 由已校验的原料记录构建目录
    ///
    /// # 说明
    /// - catalog_order 按传入顺序重新编号（0 起）,保证决胜键与目录顺序一致
    /// - 记录不变量（id 唯一、价格合法）由导入层校验
    pub fn from_records(records: Vec<MaterialRecord>, source: Option<String>) -> Self {
        let mut records = records;
        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
        let mut group_order = Vec::new();

        for (idx, record) in records.iter_mut().enumerate() {
            record.catalog_order = idx;
            let key = record.similarity_index.trim().to_string();
            let slots = groups.entry(key.clone()).or_insert_with(|| {
                group_order.push(key);
                Vec::new()
            });
            slots.push(idx);
        }

        Self {
            records,
            groups,
            group_order,
            source,
            loaded_at: Utc::now(),
        }
    }

    /// 按相似度指数查询全部记录（目录顺序）
    ///
    /// 未知指数返回空列表,本层不视为错误
    pub fn records_by_similarity(&self, similarity_index: &str) -> Vec<&MaterialRecord> {
        self.groups
            .get(similarity_index.trim())
            .map(|slots| slots.iter().map(|&idx| &self.records[idx]).collect())
            .unwrap_or_default()
    }

    pub fn contains_similarity_index(&self, similarity_index: &str) -> bool {
        self.groups.contains_key(similarity_index.trim())
    }

    /// 按 id 查询
    pub fn get(&self, id: &str) -> Option<&MaterialRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// 全部记录（目录顺序）
    pub fn records(&self) -> &[MaterialRecord] {
        &self.records
    }

    /// 相似度指数列表（首次出现顺序）
    pub fn similarity_indexes(&self) -> &[String] {
        &self.group_order
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// 目录概况（诊断用）
    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            record_count: self.records.len(),
            similarity_group_count: self.groups.len(),
            missing_melting_point_count: self
                .records
                .iter()
                .filter(|r| r.melting_point.is_none())
                .count(),
            source: self.source.clone(),
            loaded_at: self.loaded_at,
        }
    }
}

// ==========================================
// CatalogSummary - 目录概况
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub record_count: usize,
    pub similarity_group_count: usize,
    pub missing_melting_point_count: usize, // 无熔点记录数（永不入选）
    pub source: Option<String>,
    pub loaded_at: DateTime<Utc>,
}
