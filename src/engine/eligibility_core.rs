// ==========================================
// 配方替代优化系统 - Eligibility Core 纯函数库
// ==========================================
// 职责: 熔点约束 + 供货国家约束 的准入判定
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::material::MaterialRecord;
use std::fmt;

// ==========================================
// EligibilityVerdict - 准入判定结果（可解释）
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum EligibilityVerdict {
    Eligible,
    MeltingPointUnknown,
    BelowMeltingPoint { melting_point: f64, required: f64 },
    NotAvailableInCountry { country: String },
}

impl EligibilityVerdict {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityVerdict::Eligible)
    }
}

impl fmt::Display for EligibilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EligibilityVerdict::Eligible => write!(f, "ELIGIBLE"),
            EligibilityVerdict::MeltingPointUnknown => write!(f, "REJECTED: melting_point missing"),
            EligibilityVerdict::BelowMeltingPoint {
                melting_point,
                required,
            } => write!(
                f,
                "REJECTED: melting_point={} < required={}",
                melting_point, required
            ),
            EligibilityVerdict::NotAvailableInCountry { country } => {
                write!(f, "REJECTED: not available in {}", country)
            }
        }
    }
}

// ==========================================
// EligibilityCore - 纯函数工具类
// ==========================================
pub struct EligibilityCore;

impl EligibilityCore {
    /// 判定原料是否满足请求约束
    ///
    /// # 规则（按顺序,首个不满足即返回）
    /// 1. melting_point 缺失 → MeltingPointUnknown
    /// 2. melting_point < 要求熔点 → BelowMeltingPoint（等于视为满足）
    /// 3. 供货范围不含该国家 → NotAvailableInCountry
    /// 4. 否则 → Eligible
    pub fn evaluate(record: &MaterialRecord, melting_point: f64, country: &str) -> EligibilityVerdict {
        let record_mp = match record.melting_point {
            Some(mp) => mp,
            None => return EligibilityVerdict::MeltingPointUnknown,
        };

        if !Self::meets_melting_point(record_mp, melting_point) {
            return EligibilityVerdict::BelowMeltingPoint {
                melting_point: record_mp,
                required: melting_point,
            };
        }

        if !record.availability.is_available_in(country) {
            return EligibilityVerdict::NotAvailableInCountry {
                country: country.trim().to_string(),
            };
        }

        EligibilityVerdict::Eligible
    }

    /// 准入判定（布尔版本）
    pub fn is_eligible(record: &MaterialRecord, melting_point: f64, country: &str) -> bool {
        Self::evaluate(record, melting_point, country).is_eligible()
    }

    /// 熔点规则: 候选熔点须不低于工艺温度（record >= required）
    pub fn meets_melting_point(record_melting_point: f64, required: f64) -> bool {
        record_melting_point >= required
    }
}
