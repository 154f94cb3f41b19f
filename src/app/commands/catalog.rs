use crate::app::state::AppState;

use super::common::to_json;

// ==========================================
// 原料目录相关命令
// ==========================================

/// 获取目录概况
///
/// # 返回
/// - Ok: `{"recordCount", "similarityGroupCount", "missingMeltingPointCount", "source", "loadedAt"}`
pub fn get_catalog_summary(state: &AppState) -> Result<String, String> {
    let summary = state.recipe_api.catalog_summary();
    tracing::debug!("[get_catalog_summary] records={}", summary.record_count);
    to_json(&summary)
}
