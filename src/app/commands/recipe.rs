use crate::api::RecipeRequestDto;
use crate::app::state::AppState;

use super::common::{map_api_error, to_json};

// ==========================================
// 配方优化相关命令
// ==========================================

/// 优化单个配方
///
/// # 参数
/// - payload: 请求 JSON（components / meltingPoint / country）
///
/// # 返回
/// - Ok: `{"optimizedRecipe": [...], "totalCost": n}`
/// - Err: 错误信封 `{"code", "message", "details"}`
pub fn optimize_recipe(state: &AppState, payload: &str) -> Result<String, String> {
    tracing::debug!("[optimize_recipe] 收到请求: {} 字节", payload.len());

    let recipe = state.recipe_api.optimize_json(payload).map_err(|e| {
        tracing::warn!("[optimize_recipe] 优化失败: {}", e);
        map_api_error(e)
    })?;

    tracing::info!(
        "[optimize_recipe] 优化成功: lines={}, total_cost={}",
        recipe.lines.len(),
        recipe.total_cost
    );
    to_json(&recipe)
}

/// 批量优化配方
///
/// # 参数
/// - payload: 请求 JSON 数组
///
/// # 返回
/// - Ok: 与输入同序的结果数组,每项为成功结果或错误信封
/// - Err: 整体 JSON 无法解析时返回错误信封
pub async fn optimize_recipes(state: &AppState, payload: &str) -> Result<String, String> {
    let requests: Vec<RecipeRequestDto> = serde_json::from_str(payload).map_err(|e| {
        map_api_error(crate::api::ApiError::InvalidInput(format!(
            "批量请求 JSON 解析失败: {}",
            e
        )))
    })?;

    let results = state.recipe_api.optimize_batch(requests).await;

    let items: Vec<serde_json::Value> = results
        .iter()
        .map(|result| match result {
            Ok(recipe) => serde_json::to_value(recipe).unwrap_or(serde_json::Value::Null),
            Err(e) => serde_json::to_value(super::common::ErrorResponse::from(e))
                .unwrap_or(serde_json::Value::Null),
        })
        .collect();

    to_json(&items)
}
