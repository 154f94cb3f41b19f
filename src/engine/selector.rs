// ==========================================
// 配方替代优化系统 - 最低价选料器
// ==========================================
// 职责: 在满足约束的子集中,按相似度指数选出单价最低的原料
// 决胜: 同价时取 catalog_order 最小者（跨次运行可复现）
// ==========================================

use crate::domain::material::MaterialRecord;
use crate::engine::eligibility::EligibleSubset;
use std::cmp::Ordering;

pub struct Selector;

impl Selector {
    /// 选出最低价原料
    ///
    /// # 返回
    /// - Some(record): 最低价（同价取目录顺序最前）
    /// - None: 该相似度指数在子集中无候选
    pub fn select_cheapest<'a>(
        subset: &EligibleSubset<'a>,
        similarity_index: &str,
    ) -> Option<&'a MaterialRecord> {
        Self::cheapest_of(subset.by_similarity(similarity_index))
    }

    /// 在任意候选序列中选出最低价原料
    pub fn cheapest_of<'a, I>(candidates: I) -> Option<&'a MaterialRecord>
    where
        I: IntoIterator<Item = &'a MaterialRecord>,
    {
        candidates.into_iter().min_by(|a, b| Self::compare(a, b))
    }

    /// 排序键: (price, catalog_order)
    fn compare(a: &MaterialRecord, b: &MaterialRecord) -> Ordering {
        a.price
            .total_cmp(&b.price)
            .then_with(|| a.catalog_order.cmp(&b.catalog_order))
    }
}
