// ==========================================
// 配方替代优化系统 - 约束过滤引擎
// ==========================================
// 职责: 按 (熔点, 国家) 从目录中筛出可替代原料子集
// 输入: Catalog + 请求级约束
// 输出: EligibleSubset（借用目录记录,保持目录顺序）
// 红线: 纯函数,不修改目录,可重复调用
// ==========================================

use crate::domain::catalog::Catalog;
use crate::domain::material::MaterialRecord;
use crate::engine::eligibility_core::EligibilityCore;
use tracing::{debug, trace};

// ==========================================
// EligibleSubset - 满足约束的原料子集
// ==========================================
#[derive(Debug, Clone)]
pub struct EligibleSubset<'a> {
    records: Vec<&'a MaterialRecord>,
    melting_point: f64,
    country: String,
}

impl<'a> EligibleSubset<'a> {
    /// 子集内指定相似度指数的记录（目录顺序）
    pub fn by_similarity<'s>(
        &'s self,
        similarity_index: &'s str,
    ) -> impl Iterator<Item = &'a MaterialRecord> + 's {
        let key = similarity_index.trim();
        self.records
            .iter()
            .copied()
            .filter(move |r| r.similarity_index.trim() == key)
    }

    pub fn records(&self) -> &[&'a MaterialRecord] {
        &self.records
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn melting_point(&self) -> f64 {
        self.melting_point
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

// ==========================================
// ConstraintFilter - 约束过滤器
// ==========================================
pub struct ConstraintFilter;

impl ConstraintFilter {
    /// 计算满足约束的原料子集
    ///
    /// # 参数
    /// - catalog: 只读目录
    /// - melting_point: 工艺温度（候选熔点须 >= 此值）
    /// - country: 生产国家
    pub fn eligible_subset<'a>(
        catalog: &'a Catalog,
        melting_point: f64,
        country: &str,
    ) -> EligibleSubset<'a> {
        let records: Vec<&MaterialRecord> = catalog
            .records()
            .iter()
            .filter(|record| {
                let verdict = EligibilityCore::evaluate(record, melting_point, country);
                trace!(id = %record.id, verdict = %verdict, "准入判定");
                verdict.is_eligible()
            })
            .collect();

        debug!(
            eligible = records.len(),
            total = catalog.len(),
            melting_point = melting_point,
            country = %country,
            "约束过滤完成"
        );

        EligibleSubset {
            records,
            melting_point,
            country: country.trim().to_string(),
        }
    }
}
