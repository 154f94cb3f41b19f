// ==========================================
// CatalogLoader 集成测试
// ==========================================
// 测试目标: 验证 CSV 目录文件 → 只读 Catalog 的完整导入流程
// ==========================================


use recipe_optimizer::domain::types::Availability;
use recipe_optimizer::importer::{CatalogLoader, CatalogLoaderImpl, ImportError};
use recipe_optimizer::logging;
use std::collections::BTreeSet;
use test_helpers::{sample_catalog_file, write_catalog_csv};

const HEADER: &str = "Raw Material ID,Similarity Index,Melting Point,Availability in Country,Price\n";

fn countries(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_load_sample_catalog() {
    logging::init_test();

    let file = sample_catalog_file().unwrap();
    let catalog = CatalogLoaderImpl::new().load_from_file(file.path()).await.unwrap();

    assert_eq!(catalog.len(), 8);
    assert_eq!(catalog.similarity_indexes().len(), 4);
    assert_eq!(catalog.records_by_similarity("231").len(), 3);

    let c = catalog.get("C").unwrap();
    assert_eq!(c.availability, Availability::Exclude(countries(&["China", "Thailand"])));
    assert_eq!(c.price, 0.40);

    let e = catalog.get("E").unwrap();
    assert_eq!(e.melting_point, None);

    let h = catalog.get("H").unwrap();
    assert_eq!(h.availability, Availability::Include(countries(&["Malaysia", "Singapore"])));
    assert_eq!(h.price, 1200.0);

    // 目录顺序即文件行顺序
    let order: Vec<&str> = catalog.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(order, vec!["A", "B", "C", "D", "E", "F", "G", "H"]);
    for (idx, record) in catalog.records().iter().enumerate() {
        assert_eq!(record.catalog_order, idx);
    }

    let summary = catalog.summary();
    assert_eq!(summary.record_count, 8);
    assert_eq!(summary.missing_melting_point_count, 1);
    assert_eq!(summary.source.as_deref(), Some(file.path().display().to_string().as_str()));
}

#[tokio::test]
async fn test_load_xlsx_catalog() {
    let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in HEADER.trim_end().split(',').enumerate() {
        sheet.write_string(0, col as u16, header).unwrap();
    }
    // 数值单元格: 熔点与不带货币符号的价格
    sheet.write_string(1, 0, "A").unwrap();
    sheet.write_number(1, 1, 54.0).unwrap();
    sheet.write_number(1, 2, 210.0).unwrap();
    sheet.write_string(1, 3, "ALL except China").unwrap();
    sheet.write_number(1, 4, 2.8).unwrap();
    // 熔点留空, 价格为文本
    sheet.write_string(2, 0, "B").unwrap();
    sheet.write_string(2, 1, "54").unwrap();
    sheet.write_string(2, 3, "Only Malaysia, Singapore").unwrap();
    sheet.write_string(2, 4, "$1,200.00").unwrap();
    workbook.save(file.path()).unwrap();

    let catalog = CatalogLoaderImpl::new().load_from_file(file.path()).await.unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.records_by_similarity("54").len(), 2);

    let a = catalog.get("A").unwrap();
    assert_eq!(a.melting_point, Some(210.0));
    assert_eq!(a.price, 2.8);
    assert_eq!(a.availability, Availability::Exclude(countries(&["China"])));

    let b = catalog.get("B").unwrap();
    assert_eq!(b.melting_point, None);
    assert_eq!(b.price, 1200.0);
    assert_eq!(b.availability, Availability::Include(countries(&["Malaysia", "Singapore"])));
}

#[tokio::test]
async fn test_load_missing_file() {
    let result = CatalogLoaderImpl::new()
        .load_from_file("/definitely/not/here/ingredients_info.csv")
        .await;
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
}

#[tokio::test]
async fn test_load_unsupported_extension() {
    let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    let result = CatalogLoaderImpl::new().load_from_file(file.path()).await;
    assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_load_header_only_is_empty_catalog() {
    let file = write_catalog_csv(HEADER).unwrap();
    let result = CatalogLoaderImpl::new().load_from_file(file.path()).await;
    assert!(matches!(result, Err(ImportError::EmptyCatalog(_))));
}

#[tokio::test]
async fn test_load_rejects_duplicate_id() {
    let content = format!("{}A,54,210,ALL,$2.80\nB,54,190,ALL,$1.50\nA,231,240,ALL,$0.90\n", HEADER);
    let file = write_catalog_csv(&content).unwrap();

    match CatalogLoaderImpl::new().load_from_file(file.path()).await {
        Err(ImportError::DuplicateId { row, id, first_row }) => {
            assert_eq!(id, "A");
            assert_eq!(row, 3);
            assert_eq!(first_row, 1);
        }
        other => panic!("Expected DuplicateId, got {:?}", other.map(|c| c.len())),
    }
}

#[tokio::test]
async fn test_load_rejects_bad_price() {
    let content = format!("{}A,54,210,ALL,$2.80\nB,54,190,ALL,cheap\n", HEADER);
    let file = write_catalog_csv(&content).unwrap();

    match CatalogLoaderImpl::new().load_from_file(file.path()).await {
        Err(err @ ImportError::InvalidPrice { .. }) => assert_eq!(err.row(), Some(2)),
        other => panic!("Expected InvalidPrice, got {:?}", other.map(|c| c.len())),
    }
}

#[tokio::test]
async fn test_load_rejects_bad_availability() {
    let content = format!("{}A,54,210,Sometimes,$2.80\n", HEADER);
    let file = write_catalog_csv(&content).unwrap();

    let result = CatalogLoaderImpl::new().load_from_file(file.path()).await;
    assert!(matches!(result, Err(ImportError::InvalidAvailability { row: 1, .. })));
}

#[tokio::test]
async fn test_load_rejects_bad_melting_point() {
    let content = format!("{}A,54,hot,ALL,$2.80\n", HEADER);
    let file = write_catalog_csv(&content).unwrap();

    let result = CatalogLoaderImpl::new().load_from_file(file.path()).await;
    assert!(matches!(result, Err(ImportError::InvalidMeltingPoint { row: 1, .. })));
}

#[tokio::test]
async fn test_load_rejects_missing_required_field() {
    let content = format!("{}A,,210,ALL,$2.80\n", HEADER);
    let file = write_catalog_csv(&content).unwrap();

    let result = CatalogLoaderImpl::new().load_from_file(file.path()).await;
    assert!(matches!(result, Err(ImportError::MissingField { row: 1, .. })));
}

#[tokio::test]
async fn test_load_accepts_bom_and_keyword_case() {
    let content = format!("\u{feff}{}A,54,210,all except china,2.80\nB,54,190,ONLY Japan,1.50\n", HEADER);
    let file = write_catalog_csv(&content).unwrap();

    let catalog = CatalogLoaderImpl::new().load_from_file(file.path()).await.unwrap();
    assert_eq!(catalog.len(), 2);
    assert!(!catalog.get("A").unwrap().availability.is_available_in("China"));
    assert!(catalog.get("B").unwrap().availability.is_available_in("japan"));
}
