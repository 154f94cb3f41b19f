// ==========================================
// 配方替代优化系统 - 请求/响应 DTO
// ==========================================
// 职责: 请求边界的 JSON 契约与输入校验
// 说明: 字段采用 camelCase,兼容 snake_case 别名
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::recipe::{RecipeRequest, RequestedComponent};
use serde::{Deserialize, Serialize};

/// 请求行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDto {
    #[serde(alias = "similarity_index")]
    pub similarity_index: String,
    pub amount: f64,
}

/// 优化请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequestDto {
    pub components: Vec<ComponentDto>,
    #[serde(alias = "melting_point")]
    pub melting_point: f64,
    pub country: String,
}

impl RecipeRequestDto {
    /// 从 JSON 文本解析
    pub fn from_json(payload: &str) -> ApiResult<Self> {
        serde_json::from_str(payload)
            .map_err(|e| ApiError::InvalidInput(format!("请求 JSON 解析失败: {}", e)))
    }

    /// 边界校验并转换为领域请求
    ///
    /// # 规则
    /// - meltingPoint: 有限数值且 > 0
    /// - country: 去除首尾空白后非空
    /// - similarityIndex: 去除首尾空白后非空
    /// - amount: 有限数值（区间与合计由引擎校验）
    pub fn into_request(self) -> ApiResult<RecipeRequest> {
        if !self.melting_point.is_finite() || self.melting_point <= 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "meltingPoint 必须为正数: {}",
                self.melting_point
            )));
        }

        let country = self.country.trim();
        if country.is_empty() {
            return Err(ApiError::InvalidInput("country 不能为空".to_string()));
        }

        let mut components = Vec::with_capacity(self.components.len());
        for (idx, component) in self.components.into_iter().enumerate() {
            let similarity_index = component.similarity_index.trim();
            if similarity_index.is_empty() {
                return Err(ApiError::InvalidInput(format!(
                    "第 {} 行 similarityIndex 不能为空",
                    idx
                )));
            }
            if !component.amount.is_finite() {
                return Err(ApiError::InvalidInput(format!(
                    "第 {} 行 amount 不是有效数值",
                    idx
                )));
            }
            components.push(RequestedComponent::new(similarity_index, component.amount));
        }

        Ok(RecipeRequest::new(components, self.melting_point, country))
    }
}
