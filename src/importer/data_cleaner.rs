// ==========================================
// 配方替代优化系统 - 数据清洗器实现
// ==========================================
// 职责: 价格 / 供货范围 / 熔点 的解析与校验
// 红线: 格式非法的行在导入期拒绝,不带入运行期
// ==========================================

use crate::domain::types::Availability;
use crate::importer::catalog_loader_trait::DataCleaner as DataCleanerTrait;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::BTreeSet;

// 可接受的货币符号前缀
const CURRENCY_PREFIXES: &[char] = &['$', '¥', '€', '£'];

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn parse_price(&self, raw: &str, row: usize) -> ImportResult<f64> {
        let invalid = |message: &str| ImportError::InvalidPrice {
            row,
            value: raw.to_string(),
            message: message.to_string(),
        };

        // 至多一个货币符号前缀
        let text = raw.trim();
        let text = text.strip_prefix(CURRENCY_PREFIXES).unwrap_or(text).trim_start();
        if text.starts_with(CURRENCY_PREFIXES) {
            return Err(invalid("货币符号重复"));
        }

        if text.is_empty() {
            return Err(invalid("价格为空"));
        }

        let cleaned = strip_thousands_separators(text)
            .ok_or_else(|| invalid("千分位格式错误（逗号只能分隔整数部分的三位数字组）"))?;

        let price = cleaned
            .parse::<f64>()
            .map_err(|_| invalid("无法解析为数值"))?;

        if !price.is_finite() {
            return Err(invalid("价格必须为有限数值"));
        }
        if price < 0.0 {
            return Err(invalid("价格不能为负"));
        }

        Ok(price)
    }

    fn parse_availability(&self, raw: &str, row: usize) -> ImportResult<Availability> {
        let invalid = || ImportError::InvalidAvailability {
            row,
            value: raw.to_string(),
        };

        let text = raw.trim();

        if text.eq_ignore_ascii_case("ALL") {
            return Ok(Availability::All);
        }

        if let Some(rest) = strip_prefix_ignore_case(text, "ALL except") {
            let countries = split_countries(rest).ok_or_else(invalid)?;
            return Ok(Availability::Exclude(countries));
        }

        if let Some(rest) = strip_prefix_ignore_case(text, "Only") {
            let countries = split_countries(rest).ok_or_else(invalid)?;
            return Ok(Availability::Include(countries));
        }

        Err(invalid())
    }

    fn parse_melting_point(&self, raw: Option<&str>, row: usize) -> ImportResult<Option<f64>> {
        let value = match raw.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => v,
            None => return Ok(None),
        };

        match value.parse::<f64>() {
            Ok(mp) if mp.is_finite() => Ok(Some(mp)),
            _ => Err(ImportError::InvalidMeltingPoint {
                row,
                value: value.to_string(),
            }),
        }
    }
}

/// 大小写不敏感前缀剥离,要求前缀后为空白或串尾（避免 "Onlyx" 误判）
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(prefix) {
        return None;
    }
    let rest = &text[prefix.len()..];
    match rest.chars().next() {
        None => Some(rest),
        Some(c) if c.is_whitespace() => Some(rest),
        _ => None,
    }
}

/// 去除整数部分的千分位逗号
///
/// 首组 1~3 位数字,其后每组恰好 3 位;小数部分不允许逗号。
/// 格式不符返回 None（如 "2,80"、"1,2.5"）
fn strip_thousands_separators(number: &str) -> Option<String> {
    if !number.contains(',') {
        return Some(number.to_string());
    }

    let (integer, fraction) = match number.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (number, None),
    };
    if fraction.is_some_and(|f| f.contains(',')) {
        return None;
    }

    let mut groups = integer.split(',');
    let head = groups.next()?;
    if head.is_empty() || head.len() > 3 || !head.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }

    Some(match fraction {
        Some(f) => format!("{}.{}", digits, f),
        None => digits,
    })
}

/// 逗号分隔国家列表（TRIM,丢弃空项）,列表为空返回 None
fn split_countries(list: &str) -> Option<BTreeSet<String>> {
    let countries: BTreeSet<String> = list
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    if countries.is_empty() {
        None
    } else {
        Some(countries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_currency_prefixed() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_price("$2.80", 1).unwrap(), 2.80);
        assert_eq!(cleaner.parse_price(" $ 1,250.00 ", 1).unwrap(), 1250.0);
        assert_eq!(cleaner.parse_price("0", 1).unwrap(), 0.0);
        assert_eq!(cleaner.parse_price("€3.5", 1).unwrap(), 3.5);
    }

    #[test]
    fn test_parse_price_rejects_malformed() {
        let cleaner = DataCleaner;
        assert!(matches!(
            cleaner.parse_price("$abc", 4),
            Err(ImportError::InvalidPrice { row: 4, .. })
        ));
        assert!(cleaner.parse_price("$", 1).is_err());
        assert!(cleaner.parse_price("-1.00", 1).is_err());
        assert!(cleaner.parse_price("$-0.50", 1).is_err());
        assert!(cleaner.parse_price("NaN", 1).is_err());
        assert!(cleaner.parse_price("inf", 1).is_err());
    }

    #[test]
    fn test_parse_price_thousands_separator() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_price("$1,200.00", 1).unwrap(), 1200.0);
        assert_eq!(cleaner.parse_price("£12,345,678", 1).unwrap(), 12_345_678.0);
        assert_eq!(cleaner.parse_price("999", 1).unwrap(), 999.0);

        // 小数逗号（欧式写法）不被当作千分位
        assert!(matches!(
            cleaner.parse_price("€2,80", 3),
            Err(ImportError::InvalidPrice { row: 3, .. })
        ));
        assert!(cleaner.parse_price("$1,2.5", 1).is_err());
        assert!(cleaner.parse_price("$1234,567", 1).is_err());
        assert!(cleaner.parse_price("$,100", 1).is_err());
        assert!(cleaner.parse_price("$1,000,", 1).is_err());
        assert!(cleaner.parse_price("$1.000,50", 1).is_err());
    }

    #[test]
    fn test_parse_price_single_currency_symbol() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_price("¥ 15", 1).unwrap(), 15.0);
        assert!(matches!(
            cleaner.parse_price("$$2.80", 2),
            Err(ImportError::InvalidPrice { row: 2, .. })
        ));
        assert!(cleaner.parse_price("$€2.80", 1).is_err());
        assert!(cleaner.parse_price("$ $2.80", 1).is_err());
    }

    #[test]
    fn test_parse_availability_modes() {
        let cleaner = DataCleaner;

        assert_eq!(cleaner.parse_availability("ALL", 1).unwrap(), Availability::All);
        assert_eq!(cleaner.parse_availability(" all ", 1).unwrap(), Availability::All);

        match cleaner.parse_availability("ALL except Thailand, Indonesia, Germany", 1).unwrap() {
            Availability::Exclude(set) => {
                assert_eq!(set.len(), 3);
                assert!(set.contains("Indonesia"));
            }
            other => panic!("Expected Exclude, got {:?}", other),
        }

        match cleaner.parse_availability("Only Malaysia, Singapore", 1).unwrap() {
            Availability::Include(set) => {
                assert!(set.contains("Malaysia"));
                assert!(set.contains("Singapore"));
            }
            other => panic!("Expected Include, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_availability_rejects_malformed() {
        let cleaner = DataCleaner;
        assert!(matches!(
            cleaner.parse_availability("Everywhere", 9),
            Err(ImportError::InvalidAvailability { row: 9, .. })
        ));
        assert!(cleaner.parse_availability("ALL except", 1).is_err());
        assert!(cleaner.parse_availability("Only , ,", 1).is_err());
        assert!(cleaner.parse_availability("Onlyx China", 1).is_err());
        assert!(cleaner.parse_availability("", 1).is_err());
    }

    #[test]
    fn test_parse_melting_point() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_melting_point(Some("210"), 1).unwrap(), Some(210.0));
        assert_eq!(cleaner.parse_melting_point(Some(" 195.5 "), 1).unwrap(), Some(195.5));
        assert_eq!(cleaner.parse_melting_point(Some(""), 1).unwrap(), None);
        assert_eq!(cleaner.parse_melting_point(None, 1).unwrap(), None);
        assert!(matches!(
            cleaner.parse_melting_point(Some("hot"), 2),
            Err(ImportError::InvalidMeltingPoint { row: 2, .. })
        ));
    }
}
