// ==========================================
// 配方替代优化系统 - 配方领域模型
// ==========================================
// 职责: 配方请求 / 优化结果
// 生命周期: 每次请求创建,请求结束即丢弃,不跨请求共享
// ==========================================

use crate::domain::material::MaterialRecord;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

// ==========================================
// RequestedComponent - 配方请求行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedComponent {
    pub similarity_index: String,
    pub amount: f64, // 用量占比 (0, 1]
}

impl RequestedComponent {
    pub fn new(similarity_index: impl Into<String>, amount: f64) -> Self {
        Self {
            similarity_index: similarity_index.into(),
            amount,
        }
    }
}

// ==========================================
// RecipeRequest - 配方优化请求
// ==========================================
// 约束为请求级: 熔点阈值与生产国家对所有行生效
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    pub components: Vec<RequestedComponent>,
    pub melting_point: f64, // 工艺温度（候选熔点须 >= 此值）
    pub country: String,    // 生产国家
}

impl RecipeRequest {
    pub fn new(
        components: Vec<RequestedComponent>,
        melting_point: f64,
        country: impl Into<String>,
    ) -> Self {
        Self {
            components,
            melting_point,
            country: country.into(),
        }
    }

    /// 用量合计
    pub fn total_amount(&self) -> f64 {
        self.components.iter().map(|c| c.amount).sum()
    }
}

// ==========================================
// OptimizedLine - 优化结果行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedLine {
    pub id: String,
    pub similarity_index: String,
    pub amount: f64,
    pub price: f64,
    pub cost: f64, // price × amount
}

impl OptimizedLine {
    /// 由选中原料与请求行组装结果行
    pub fn from_selection(material: &MaterialRecord, component: &RequestedComponent) -> Self {
        Self {
            id: material.id.clone(),
            similarity_index: material.similarity_index.clone(),
            amount: component.amount,
            price: material.price,
            cost: material.price * component.amount,
        }
    }
}

// ==========================================
// OptimizedRecipe - 优化后配方
// ==========================================
// 行顺序与请求一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedRecipe {
    #[serde(rename = "optimizedRecipe")]
    pub lines: Vec<OptimizedLine>,
    pub total_cost: f64,
}

impl OptimizedRecipe {
    /// 由结果行汇总总成本
    pub fn from_lines(lines: Vec<OptimizedLine>) -> Self {
        let total_cost = lines.iter().map(|l| l.cost).sum();
        Self { lines, total_cost }
    }

    /// 文本报表（命令行输出）
    pub fn render_report(&self) -> String {
        let mut out = String::from("Optimized Recipe:\n");
        for line in &self.lines {
            let _ = writeln!(
                out,
                "Raw Material ID: {}, Similarity Index: {}, Amount: {:.0}%, Price: ${:.2}, Cost: ${:.2}",
                line.id,
                line.similarity_index,
                line.amount * 100.0,
                line.price,
                line.cost
            );
        }
        let _ = writeln!(out, "Total Cost: ${:.2}", self.total_cost);
        out
    }
}
