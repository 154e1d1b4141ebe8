//! End-to-end pipeline runs over a temporary input folder.
//!
//! Documents are stored as plain UTF-8 text under `.pdf` names and read
//! through a text-file line source, so no real PDFs are needed.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use fundconf_core::{
    DocType, Document, FundconfConfig, FundconfError, LineSource, OutputFormat, Pipeline, Result,
};
use pretty_assertions::assert_eq;
use tempfile::{tempdir, TempDir};

struct TextSource;

impl LineSource for TextSource {
    fn read(&self, path: &Path) -> Result<Document> {
        let text = fs::read_to_string(path)?;
        Ok(Document::from_text(path, text))
    }
}

const HAOMAI_REDEMPTION: &str = "好买基金\n万联资管\n账户名称\n稳盈1号\n证件类型\n\
    产品代码：000912\n确认金额：1,000.00\n确认份额：990.00\n手续费：0.50\n预计到账日：2024-06-03";

const HAOMAI_REDEMPTION_NO_DATE: &str = "好买基金\n万联资管\n账户名称\n新产品9号\n证件类型\n\
    产品代码：000913\n确认金额：20.00\n确认份额：20.00\n手续费：0.00";

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

struct Fixture {
    dir: TempDir,
    config: FundconfConfig,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let mut config = FundconfConfig::default();
        config.paths.root = dir.path().to_path_buf();
        config.output.format = OutputFormat::Csv;
        fs::write(
            dir.path().join("product_codes.json"),
            r#"{"万联资管稳盈1号": 3012, "万联资管稳健1号": "A17"}"#,
        )
        .unwrap();
        Self { dir, config }
    }

    fn section(&self) -> PathBuf {
        self.dir.path().join("2025/20250115/1场外开基")
    }

    fn write(&self, rel: &str, content: &[u8]) {
        let path = self.section().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn output(&self, name: &str) -> String {
        let text = fs::read_to_string(self.dir.path().join("2025/20250115").join(name)).unwrap();
        text.trim_start_matches('\u{feff}').to_string()
    }
}

#[test]
fn test_redemption_run() {
    let fx = Fixture::new();
    fx.write("赎回确认单/好买1.pdf", HAOMAI_REDEMPTION.as_bytes());
    fx.write("赎回确认单/好买2.pdf", HAOMAI_REDEMPTION_NO_DATE.as_bytes());
    fx.write("赎回确认单/坏文件.pdf", &[0xff, 0xfe, 0x00]);
    fx.write("赎回确认单/未知.pdf", "无法识别的单据".as_bytes());
    fx.write("其他/好买3.pdf", HAOMAI_REDEMPTION.as_bytes());

    let pipeline = Pipeline::new(&fx.config, run_date());
    let report = pipeline.run(DocType::Redemption, &TextSource).unwrap();

    assert_eq!(report.total_files, 4);
    assert_eq!(report.processed, 2);
    assert_eq!(report.rows, 2);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].path.ends_with("坏文件.pdf"));
    assert_eq!(report.unrecognised.len(), 1);
    assert_eq!(report.outputs.len(), 1);

    let table = fx.output("【境内基金业务】赎回确认.csv");
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(
        lines,
        vec![
            "账套编号,基金市场代码,交易市场,日期,业务类别,数量,金额,手续费,佣金,交易对手,资金账户,赎回到账日期,股东账户,席位号,产品名称,基金平台",
            "3012,000912,国内银行间,20250115,基金赎回确认,990.00,1000.00,0.50,,,,20240603,,,万联资管稳盈1号,好买基金",
            ",000913,国内银行间,20250115,基金赎回确认,20.00,20.00,0.00,,,,20250114,,,万联资管新产品9号,好买基金",
        ]
    );
}

#[test]
fn test_dividend_run_writes_merged_table() {
    let fx = Fixture::new();
    let slip = "长量基金\n投资者名称 万联资管 稳健1号\n基金代码 000001\n红利转投份额 2,001.37";
    let other = "长量基金\n投资者名称 万联资管 稳健1号\n基金代码 000001\n红利转投份额 8.63";
    fx.write("分红单/a.pdf", slip.as_bytes());
    fx.write("分红单/b.pdf", other.as_bytes());

    let report = Pipeline::new(&fx.config, run_date())
        .run(DocType::Dividend, &TextSource)
        .unwrap();
    assert_eq!(report.rows, 2);
    assert_eq!(report.outputs.len(), 2);

    let merged = fx.output("【境内基金业务】红利再投_合并后.csv");
    assert_eq!(
        merged.lines().nth(1),
        Some("A17,,000001,国内银行间,20250115,2010.00,2010.00,20250114,,万联资管稳健1号,长量基金")
    );
}

#[test]
fn test_reruns_are_byte_identical() {
    let fx = Fixture::new();
    fx.write("赎回确认单/好买1.pdf", HAOMAI_REDEMPTION.as_bytes());
    let config = FundconfConfig {
        paths: fx.config.paths.clone(),
        ..FundconfConfig::default()
    };
    let pipeline = Pipeline::new(&config, run_date());

    let first = pipeline.run(DocType::Redemption, &TextSource).unwrap();
    assert!(first.outputs[0].ends_with("【境内基金业务】赎回确认.xml"));
    let bytes = fs::read(&first.outputs[0]).unwrap();
    let second = pipeline.run(DocType::Redemption, &TextSource).unwrap();
    assert_eq!(first.outputs, second.outputs);
    assert_eq!(bytes, fs::read(&second.outputs[0]).unwrap());
}

#[test]
fn test_missing_input_directory() {
    let fx = Fixture::new();
    let err = Pipeline::new(&fx.config, run_date())
        .run(DocType::Redemption, &TextSource)
        .unwrap_err();
    assert!(matches!(err, FundconfError::MissingInput(_)));
}

#[test]
fn test_missing_code_file() {
    let fx = Fixture::new();
    fx.write("转换确认/超级转换.pdf", b"x");
    let err = Pipeline::new(&fx.config, run_date())
        .run(DocType::Conversion, &TextSource)
        .unwrap_err();
    assert!(matches!(err, FundconfError::CodeBook(_)));
}

#[test]
fn test_no_records_is_an_error() {
    let fx = Fixture::new();
    fx.write("申购受理/未知.pdf", "无法识别的单据".as_bytes());
    let err = Pipeline::new(&fx.config, run_date())
        .run(DocType::PurchaseApplication, &TextSource)
        .unwrap_err();
    assert!(matches!(err, FundconfError::NoRecords));
    assert!(!fx.dir.path().join("2025/20250115/【境内基金业务】申购申请.csv").exists());
}

#[test]
fn test_run_all_continues_after_failures() {
    let fx = Fixture::new();
    fx.write("赎回确认单/好买赎回.pdf", HAOMAI_REDEMPTION.as_bytes());

    let results = Pipeline::new(&fx.config, run_date()).run_all(
        |doc_type| match doc_type {
            DocType::ManualDividend => Err(FundconfError::Config("no OCR".into())),
            _ => Ok(Box::new(TextSource) as Box<dyn LineSource>),
        },
        &mut (),
    );

    let order: Vec<DocType> = results.iter().map(|(t, _)| *t).collect();
    assert_eq!(order, DocType::ALL.to_vec());
    let ok: Vec<DocType> = results
        .iter()
        .filter(|(_, r)| r.is_ok())
        .map(|(t, _)| *t)
        .collect();
    assert_eq!(ok, vec![DocType::Redemption]);
}
