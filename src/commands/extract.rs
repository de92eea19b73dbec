//! # extract 命令实现
//!
//! 从 Gaussian 弛豫扫描日志提取各步骤的收敛结构，生成新的输入文件。
//!
//! ## 功能
//! - 单文件模式：一个日志 → `<output>/in1.gjf ... inN.gjf`
//! - 批量模式：目录中的每个日志 → `<output>/<日志名>/inN.gjf`
//! - 缺失或无法解析的步骤单独汇报，不写出空文件
//! - 可选导出 CSV 报告；`--strict` 时任何失败步骤都返回错误
//!
//! ## 依赖关系
//! - 使用 `cli/extract.rs` 定义的参数
//! - 使用 `scan/`, `parsers/gjf.rs`, `batch/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`, `utils/prompt.rs`

use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::extract::ExtractArgs;
use crate::error::{ScanError, Result};
use crate::models::{ScanResult, StepReport};
use crate::parsers::gjf;
use crate::scan::{export, ReportRow, ScanPipeline};
use crate::utils::{output, progress, prompt};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tabled::{Table, Tabled};

/// 输入文件写出配置
struct DeckConfig {
    template: Vec<String>,
    prefix: String,
    ext: String,
    rename_chk: bool,
    overwrite: bool,
}

impl DeckConfig {
    fn file_name(&self, step: usize) -> String {
        format!("{}{}.{}", self.prefix, step, self.ext)
    }
}

/// 单个步骤的写出结果
#[derive(Debug)]
enum DeckOutcome {
    Written(PathBuf),
    Skipped(PathBuf),
    WriteFailed(String),
    NoGeometry,
}

/// 终端汇总表行
#[derive(Debug, Clone, Tabled)]
struct StepRow {
    #[tabled(rename = "Step")]
    step: usize,
    #[tabled(rename = "Markers")]
    markers: usize,
    #[tabled(rename = "Last marker")]
    last_marker: String,
    #[tabled(rename = "Atoms")]
    atoms: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Output")]
    output: String,
}

/// 执行 extract 命令
pub fn execute(args: ExtractArgs) -> Result<()> {
    output::print_header("Extracting Relaxed Scan Geometries");

    let input = match args.input.clone() {
        Some(path) => path,
        None => prompt::prompt_path("Gaussian scan log")?,
    };
    let template_path = match args.template.clone() {
        Some(path) => path,
        None => prompt::prompt_path("Input file template")?,
    };

    if !template_path.is_file() {
        return Err(ScanError::FileNotFound {
            path: template_path.display().to_string(),
        });
    }

    let config = DeckConfig {
        template: gjf::read_template(&template_path)?,
        prefix: args.prefix.clone(),
        ext: args.ext.trim_start_matches('.').to_string(),
        rename_chk: args.rename_chk,
        overwrite: args.overwrite,
    };

    // 检测输入类型
    if input.is_file() {
        execute_single_file(&input, &config, &args)
    } else if input.is_dir() {
        execute_batch(&input, &config, &args)
    } else {
        Err(ScanError::FileNotFound {
            path: input.display().to_string(),
        })
    }
}

/// 单文件模式
fn execute_single_file(input: &Path, config: &DeckConfig, args: &ExtractArgs) -> Result<()> {
    output::print_info(&format!("Single file mode: '{}'", input.display()));

    let spinner = progress::create_spinner("Indexing scan log");
    let result = ScanPipeline::new(args.jobs).run_file(input);
    spinner.finish_and_clear();
    let result = result?;

    print_scan_summary(&result);

    fs::create_dir_all(&args.output).map_err(|e| ScanError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let pb = progress::create_progress_bar(result.steps.len() as u64, "Writing input files");
    let decks: Vec<DeckOutcome> = result
        .steps
        .iter()
        .map(|report| {
            let outcome = write_deck(report, &args.output, config);
            pb.inc(1);
            outcome
        })
        .collect();
    pb.finish_and_clear();

    print_step_table(&result, &decks);

    let written = decks
        .iter()
        .filter(|d| matches!(d, DeckOutcome::Written(_)))
        .count();
    let skipped = decks
        .iter()
        .filter(|d| matches!(d, DeckOutcome::Skipped(_)))
        .count();

    if skipped > 0 {
        output::print_skip(&format!(
            "{} existing file(s) kept (use --overwrite to replace)",
            skipped
        ));
    }

    for (report, deck) in result.steps.iter().zip(&decks) {
        if let DeckOutcome::WriteFailed(err) = deck {
            output::print_error(&format!("step {}: {}", report.step, err));
        }
    }

    let failures = result.failures();
    output::print_step_failures(&failures, 20);

    if let Some(ref report_path) = args.report {
        let rows = report_rows(&log_label(input), &result, &decks);
        export::to_csv(&rows, report_path)?;
        output::print_success(&format!("Report saved to '{}'", report_path.display()));
    }

    output::print_done(&format!(
        "Wrote {} of {} input file(s) to '{}'",
        written,
        result.steps.len(),
        args.output.display()
    ));

    let write_failed = decks
        .iter()
        .any(|d| matches!(d, DeckOutcome::WriteFailed(_)));

    if args.strict {
        if let Some(first) = failures.first() {
            return Err(ScanError::Step((*first).clone()));
        }
        if write_failed {
            return Err(ScanError::Other(
                "Some input files could not be written".to_string(),
            ));
        }
    }

    Ok(())
}

/// 批量处理模式
fn execute_batch(input: &Path, config: &DeckConfig, args: &ExtractArgs) -> Result<()> {
    output::print_info(&format!("Batch mode: directory '{}'", input.display()));

    let files = FileCollector::new(input.to_path_buf())
        .with_pattern(&args.pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No matching files found with pattern '{}'",
            args.pattern
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} scan logs", files.len()));

    fs::create_dir_all(&args.output).map_err(|e| ScanError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let collected: Mutex<Vec<ReportRow>> = Mutex::new(Vec::new());

    // 日志之间并行，单个日志内部顺序执行
    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(files, |file| {
        process_batch_file(file, &args.output, config, &collected)
    })?;

    // 打印统计
    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} complete, {} partial, {} failed",
        result.success, result.partial, result.failed
    ));

    if !result.partials.is_empty() {
        output::print_warning("Logs with missing steps:");
        for (path, detail) in result.partials.iter().take(10) {
            output::print_warning(&format!("  {}: {}", path, detail));
        }
        if result.partials.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.partials.len() - 10));
        }
    }

    if !result.failures.is_empty() {
        output::print_warning("Failed logs:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    if let Some(ref report_path) = args.report {
        let mut rows = collected
            .into_inner()
            .map_err(|_| ScanError::Other("Report collection was poisoned".to_string()))?;
        rows.sort_by(|a, b| a.log.cmp(&b.log).then(a.step.cmp(&b.step)));
        export::to_csv(&rows, report_path)?;
        output::print_success(&format!("Report saved to '{}'", report_path.display()));
    }

    if args.strict && !result.is_clean() {
        return Err(ScanError::Other(format!(
            "{} of {} logs were not fully extracted",
            result.partial + result.failed,
            result.total()
        )));
    }

    Ok(())
}

/// 处理批量模式中的单个日志
fn process_batch_file(
    input: &PathBuf,
    output_root: &Path,
    config: &DeckConfig,
    collected: &Mutex<Vec<ReportRow>>,
) -> ProcessResult {
    let label = log_label(input);
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scan");
    let out_dir = output_root.join(stem);

    let result = match ScanPipeline::new(1).run_file(input) {
        Ok(r) => r,
        Err(e) => return ProcessResult::Failed(label, e.to_string()),
    };

    if let Err(e) = fs::create_dir_all(&out_dir) {
        return ProcessResult::Failed(
            label,
            format!("Failed to create '{}': {}", out_dir.display(), e),
        );
    }

    let decks: Vec<DeckOutcome> = result
        .steps
        .iter()
        .map(|report| write_deck(report, &out_dir, config))
        .collect();

    if let Ok(mut rows) = collected.lock() {
        rows.extend(report_rows(&label, &result, &decks));
    }

    let mut problems: Vec<String> = result
        .failures()
        .iter()
        .map(|e| e.to_string())
        .collect();
    for (report, deck) in result.steps.iter().zip(&decks) {
        if let DeckOutcome::WriteFailed(err) = deck {
            problems.push(format!("step {}: {}", report.step, err));
        }
    }

    if problems.is_empty() {
        ProcessResult::Success(format!("{} -> {}", label, out_dir.display()))
    } else {
        ProcessResult::Partial(label, problems.join("; "))
    }
}

/// 为单个步骤写出输入文件
fn write_deck(report: &StepReport, out_dir: &Path, config: &DeckConfig) -> DeckOutcome {
    let geometry = match report.geometry() {
        Some(g) => g,
        None => return DeckOutcome::NoGeometry,
    };

    let path = out_dir.join(config.file_name(report.step));
    if path.exists() && !config.overwrite {
        return DeckOutcome::Skipped(path);
    }

    let written = if config.rename_chk {
        gjf::rename_checkpoint(&config.template, report.step)
            .and_then(|template| gjf::write_gjf(&path, &template, geometry))
    } else {
        gjf::write_gjf(&path, &config.template, geometry)
    };

    match written {
        Ok(()) => DeckOutcome::Written(path),
        Err(e) => DeckOutcome::WriteFailed(e.to_string()),
    }
}

/// 打印扫描概况
fn print_scan_summary(result: &ScanResult) {
    let formula = result
        .geometries()
        .next()
        .map(|(_, g)| g.formula())
        .unwrap_or_else(|| "-".to_string());

    output::print_info(&format!(
        "Scan: {} steps, {} atoms ({})",
        result.metadata.steps, result.metadata.atoms, formula
    ));
    if result.is_complete() {
        output::print_success(&format!("Extracted all {} geometries", result.steps.len()));
    } else {
        output::print_warning(&format!(
            "Extracted {} of {} geometries",
            result.success_count(),
            result.steps.len()
        ));
    }
}

/// 打印步骤汇总表
fn print_step_table(result: &ScanResult, decks: &[DeckOutcome]) {
    let rows: Vec<StepRow> = result
        .steps
        .iter()
        .zip(decks)
        .map(|(report, deck)| StepRow {
            step: report.step,
            markers: report.markers.len(),
            last_marker: report
                .last_marker()
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".to_string()),
            atoms: report
                .geometry()
                .map(|g| g.len().to_string())
                .unwrap_or_else(|| "-".to_string()),
            status: deck_status(report, deck).to_string(),
            output: deck_path(deck)
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        })
        .collect();

    output::print_header("Scan Steps");
    let table = Table::new(&rows);
    println!("{}", table);
}

/// 构造 CSV 报告行
fn report_rows(label: &str, result: &ScanResult, decks: &[DeckOutcome]) -> Vec<ReportRow> {
    result
        .steps
        .iter()
        .zip(decks)
        .map(|(report, deck)| {
            let row = ReportRow::new(label, report, deck_status(report, deck), deck_path(deck));
            match deck {
                DeckOutcome::WriteFailed(err) => row.with_error(err.clone()),
                _ => row,
            }
        })
        .collect()
}

fn deck_status(report: &StepReport, deck: &DeckOutcome) -> &'static str {
    match deck {
        DeckOutcome::Written(_) => "written",
        DeckOutcome::Skipped(_) => "skipped",
        DeckOutcome::WriteFailed(_) => "write failed",
        DeckOutcome::NoGeometry => report.error().map(|e| e.kind()).unwrap_or("no geometry"),
    }
}

fn deck_path(deck: &DeckOutcome) -> Option<&Path> {
    match deck {
        DeckOutcome::Written(p) | DeckOutcome::Skipped(p) => Some(p.as_path()),
        _ => None,
    }
}

fn log_label(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::fixtures::LogBuilder;

    const WATER: [(u32, [f64; 3]); 3] = [
        (8, [0.0, 0.0, 0.117300]),
        (1, [0.0, 0.757200, -0.469200]),
        (1, [0.0, -0.757200, -0.469200]),
    ];

    fn args(input: &Path, template: &Path, output: &Path) -> ExtractArgs {
        ExtractArgs {
            input: Some(input.to_path_buf()),
            template: Some(template.to_path_buf()),
            output: output.to_path_buf(),
            prefix: "in".to_string(),
            ext: "gjf".to_string(),
            rename_chk: false,
            report: None,
            strict: false,
            overwrite: false,
            pattern: "*.log,*.out".to_string(),
            recursive: false,
            jobs: 1,
        }
    }

    /// 三步扫描，步骤 3 的标记缺失
    fn write_fixture(dir: &Path) -> (PathBuf, PathBuf) {
        let log = LogBuilder::new()
            .header(3, 3)
            .marker(1, 3)
            .orientation(&WATER)
            .marker(2, 3)
            .orientation(&WATER);

        let log_path = dir.join("water_scan.log");
        fs::write(&log_path, log.content()).unwrap();

        let template_path = dir.join("template.gjf");
        fs::write(&template_path, "%chk=water.chk\n# HF/3-21G\n\nwater\n\n0 1\n").unwrap();

        (log_path, template_path)
    }

    #[test]
    fn test_single_file_writes_only_extracted_steps() {
        let dir = tempfile::tempdir().unwrap();
        let (log, template) = write_fixture(dir.path());
        let out = dir.path().join("decks");

        let mut a = args(&log, &template, &out);
        a.report = Some(dir.path().join("report.csv"));
        execute(a).unwrap();

        assert!(out.join("in1.gjf").exists());
        assert!(out.join("in2.gjf").exists());
        assert!(!out.join("in3.gjf").exists());

        let deck = fs::read_to_string(out.join("in2.gjf")).unwrap();
        assert!(deck.starts_with("%chk=water.chk\n# HF/3-21G\n\nwater\n\n0 1\n O "));
        assert_eq!(deck.lines().filter(|l| l.starts_with(" H ")).count(), 2);

        let report = fs::read_to_string(dir.path().join("report.csv")).unwrap();
        assert_eq!(report.lines().count(), 4);
        assert!(report.contains(",3,0,,,not found,,"));
    }

    #[test]
    fn test_strict_fails_on_missing_step() {
        let dir = tempfile::tempdir().unwrap();
        let (log, template) = write_fixture(dir.path());

        let mut a = args(&log, &template, &dir.path().join("decks"));
        a.strict = true;
        let err = execute(a).unwrap_err();
        assert!(matches!(err, ScanError::Step(crate::error::StepError::NotFound { step: 3 })));
    }

    #[test]
    fn test_existing_files_skipped_without_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let (log, template) = write_fixture(dir.path());
        let out = dir.path().join("decks");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("in1.gjf"), "keep me").unwrap();

        execute(args(&log, &template, &out)).unwrap();
        assert_eq!(fs::read_to_string(out.join("in1.gjf")).unwrap(), "keep me");

        let mut a = args(&log, &template, &out);
        a.overwrite = true;
        a.rename_chk = true;
        execute(a).unwrap();
        let deck = fs::read_to_string(out.join("in1.gjf")).unwrap();
        assert!(deck.starts_with("%chk=water_1.chk\n"));
    }

    #[test]
    fn test_batch_mode_per_log_directories() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        fs::create_dir_all(&logs).unwrap();
        let (_, template) = write_fixture(dir.path());

        let complete = LogBuilder::new()
            .header(2, 3)
            .marker(1, 2)
            .orientation(&WATER)
            .marker(2, 2)
            .orientation(&WATER);
        fs::write(logs.join("a.log"), complete.content()).unwrap();
        fs::write(logs.join("b.out"), "no metadata in here\n").unwrap();
        fs::write(logs.join("notes.txt"), "ignored").unwrap();

        let out = dir.path().join("batch");
        let mut a = args(&logs, &template, &out);
        a.jobs = 2;
        a.report = Some(dir.path().join("batch.csv"));
        execute(a).unwrap();

        assert!(out.join("a").join("in1.gjf").exists());
        assert!(out.join("a").join("in2.gjf").exists());
        assert!(!out.join("b").exists());

        let report = fs::read_to_string(dir.path().join("batch.csv")).unwrap();
        assert_eq!(report.lines().count(), 3);
    }

    #[test]
    fn test_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let (_, template) = write_fixture(dir.path());
        let err = execute(args(&dir.path().join("nope.log"), &template, dir.path())).unwrap_err();
        assert!(matches!(err, ScanError::FileNotFound { .. }));
    }
}
