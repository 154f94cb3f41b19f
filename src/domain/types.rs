// ==========================================
// 配方替代优化系统 - 领域类型定义
// ==========================================
// 职责: 供货范围（Availability）等封闭枚举类型
// 红线: 供货判定只能通过 Availability 模式匹配完成
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ==========================================
// 供货范围 (Availability)
// ==========================================
// 三种模式: 全球可用 / 排除若干国家 / 仅限若干国家
// 序列化格式: {"mode": "EXCLUDE", "countries": ["China"]}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "countries", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    All,                       // 全球可用
    Exclude(BTreeSet<String>), // 除列出国家外可用
    Include(BTreeSet<String>), // 仅列出国家可用
}

impl Availability {
    /// 判断材料在指定国家是否可供货
    ///
    /// # 规则
    /// - All → 恒可用
    /// - Exclude(set) → country ∉ set
    /// - Include(set) → country ∈ set
    ///
    /// 国家名比较有意放宽: 两侧 trim 后按 ASCII 大小写不敏感匹配,
    /// 而非逐字节相等（"china" 与 "China" 视为同一国家）
    pub fn is_available_in(&self, country: &str) -> bool {
        match self {
            Availability::All => true,
            Availability::Exclude(countries) => !contains_country(countries, country),
            Availability::Include(countries) => contains_country(countries, country),
        }
    }
}

fn contains_country(countries: &BTreeSet<String>, country: &str) -> bool {
    let target = country.trim();
    countries.iter().any(|c| c.eq_ignore_ascii_case(target))
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::All => write!(f, "ALL"),
            Availability::Exclude(countries) => {
                let list: Vec<&str> = countries.iter().map(String::as_str).collect();
                write!(f, "ALL except {}", list.join(", "))
            }
            Availability::Include(countries) => {
                let list: Vec<&str> = countries.iter().map(String::as_str).collect();
                write!(f, "Only {}", list.join(", "))
            }
        }
    }
}
