// ==========================================
// 配方替代优化系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: Vec<HashMap<列名, 值>>（值已 TRIM）
// ==========================================

use crate::importer::catalog_loader_trait::FileParser;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

type RawRows = Vec<HashMap<String, String>>;

/// 小写扩展名（无扩展名时为空串）
fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// 按表头组装行映射
///
/// 单元格 TRIM 后写入; 超出表头的列丢弃; 整行空白跳过
fn assemble_rows<I, R, S>(headers: &[String], rows: I) -> RawRows
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    rows.into_iter()
        .map(|cells| {
            headers
                .iter()
                .zip(cells)
                .map(|(header, cell)| (header.clone(), cell.as_ref().trim().to_string()))
                .collect::<HashMap<_, _>>()
        })
        .filter(|row| row.values().any(|v| !v.is_empty()))
        .collect()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<RawRows> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        // 无扩展名按 CSV 处理
        let ext = lowercase_extension(file_path);
        if !ext.is_empty() && ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        parse_csv_reader(File::open(file_path)?)
    }
}

/// 从任意 Reader 解析 CSV（首行为表头）
///
/// 兼容带 UTF-8 BOM 的表头（Excel 另存为 CSV 常见）
pub fn parse_csv_reader<R: std::io::Read>(reader: R) -> ImportResult<RawRows> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // 允许行长度不一致
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let records = reader.records().collect::<Result<Vec<_>, _>>()?;
    Ok(assemble_rows(&headers, records.iter().map(|record| record.iter())))
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 仅读取第一个工作表; 数值单元格按显示文本输出（210.0 → "210"）
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<RawRows> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let ext = lowercase_extension(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        Ok(assemble_rows(
            &headers,
            rows.map(|row| row.iter().map(|cell| cell.to_string())),
        ))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<RawRows> {
        let ext = lowercase_extension(file_path);
        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_records(file_path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(file_path),
            _ if !file_path.exists() => {
                Err(ImportError::FileNotFound(file_path.display().to_string()))
            }
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Raw Material ID,Similarity Index,Price").unwrap();
        writeln!(temp_file, "RM-001,54,$2.80").unwrap();
        writeln!(temp_file, "RM-002, 231 ,$1.10").unwrap();

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Raw Material ID"), Some(&"RM-001".to_string()));
        assert_eq!(records[0].get("Price"), Some(&"$2.80".to_string()));
        assert_eq!(records[1].get("Similarity Index"), Some(&"231".to_string()));
    }

    #[test]
    fn test_csv_parser_quoted_country_list() {
        let data = "Raw Material ID,Availability in Country\nRM-001,\"ALL except Thailand, Indonesia\"\n";
        let records = parse_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(
            records[0].get("Availability in Country"),
            Some(&"ALL except Thailand, Indonesia".to_string())
        );
    }

    #[test]
    fn test_csv_parser_strips_bom() {
        let data = "\u{feff}Raw Material ID,Price\nRM-001,$1.00\n";
        let records = parse_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(records[0].get("Raw Material ID"), Some(&"RM-001".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_records(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "Raw Material ID,Price").unwrap();
        writeln!(temp_file, "RM-001,$2.50").unwrap();
        writeln!(temp_file, ",").unwrap(); // 空行
        writeln!(temp_file, "RM-002,$3.00").unwrap();

        let records = CsvParser.parse_to_raw_records(temp_file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_excel_parser_first_sheet() {
        let temp_file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, " Raw Material ID ").unwrap();
        sheet.write_string(0, 1, "Melting Point").unwrap();
        sheet.write_string(0, 2, "Price").unwrap();
        sheet.write_string(1, 0, "RM-001").unwrap();
        sheet.write_number(1, 1, 210.0).unwrap();
        sheet.write_number(1, 2, 2.8).unwrap();
        // 第 2 行留空
        sheet.write_string(3, 0, "RM-002").unwrap();
        sheet.write_number(3, 2, 1.5).unwrap();
        workbook.save(temp_file.path()).unwrap();

        let records = ExcelParser.parse_to_raw_records(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Raw Material ID"), Some(&"RM-001".to_string()));
        assert_eq!(records[0].get("Melting Point"), Some(&"210".to_string()));
        assert_eq!(records[0].get("Price"), Some(&"2.8".to_string()));
        assert_eq!(records[1].get("Melting Point"), Some(&String::new()));
    }

    #[test]
    fn test_excel_parser_rejects_csv_extension() {
        let temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let result = ExcelParser.parse_to_raw_records(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "csv"));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let temp_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let result = UniversalFileParser.parse_to_raw_records(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "json"));
    }
}
