use pretty_assertions::assert_eq;
use ssig_distance::commands::{execute_pisa, run_pisa, PisaArgs};
use ssig_distance::utils::config::PipelineConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const GRID: &str = "\
mode,alpha,k,theta,a_avg_mean,s_avg_mean,x
B,1,1,0,0.2,0.2,0
A,1,1,1,0.6,0.4,1
A,2,1,0,0.9,0.1,0
A,1,1,0,0.5,0.5,0
A,1,1,2,,0.3,5
A,1,1,3,1.0,-1.0,3
";

fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn pisa_args(dir: &TempDir, input: &Path, config: PipelineConfig) -> PisaArgs {
    PisaArgs {
        input: input.to_path_buf(),
        row_out: dir.path().join("rows.csv"),
        summary_out: dir.path().join("summary.csv"),
        json_out: None,
        config,
    }
}

#[test]
fn test_worked_example() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "grid.csv",
        "mode,alpha,k,theta,a_avg_mean,s_avg_mean\nA,1,1,0,0.5,0.5\nA,1,1,1,0.6,0.4\n",
    );

    let out = run_pisa(&input, &PipelineConfig::default()).unwrap();
    let (r1, r2) = (&out.rows[0], &out.rows[1]);

    assert!((r1.point.u - 0.549_306_144_334_054_8).abs() < 1e-12);
    assert_eq!(r1.point.u, r1.point.v);
    assert_eq!(r1.step.l_struct_uv, 0.0);

    assert!((r2.point.u - 0.693_147_180_559_945_3).abs() < 1e-12);
    assert!((r2.point.v - 0.423_648_930_193_601_8).abs() < 1e-12);
    assert!((r2.step.du - 0.143_841).abs() < 1e-6);
    assert!((r2.step.dv + 0.125_657).abs() < 1e-6);
    assert!((r2.step.d_uv_step - 0.190_997_3).abs() < 1e-6);
    assert_eq!(r2.step.l_struct_uv, r2.step.d_uv_step);
}

#[test]
fn test_rows_sorted_and_incomplete_dropped() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "grid.csv", GRID);

    let out = run_pisa(&input, &PipelineConfig::default()).unwrap();
    let order: Vec<_> = out
        .rows
        .iter()
        .map(|r| (r.key.mode.as_str(), r.key.alpha.raw.as_str(), r.theta_raw.as_str()))
        .collect();

    assert_eq!(
        order,
        vec![
            ("A", "1", "0"),
            ("A", "1", "1"),
            ("A", "1", "3"),
            ("A", "2", "0"),
            ("B", "1", "0"),
        ]
    );
}

#[test]
fn test_cumulative_length_is_running_sum() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "grid.csv", GRID);

    let out = run_pisa(&input, &PipelineConfig::default()).unwrap();

    for pair in out.rows.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        assert!(cur.step.d_uv_step >= 0.0);
        if prev.key == cur.key {
            assert_eq!(cur.step.l_struct_uv, prev.step.l_struct_uv + cur.step.d_uv_step);
        } else {
            assert_eq!(cur.step.l_struct_uv, 0.0);
            assert_eq!(cur.step.du, 0.0);
            assert_eq!(cur.step.dv, 0.0);
        }
    }
}

#[test]
fn test_summary_matches_rows() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "grid.csv", GRID);

    let out = run_pisa(&input, &PipelineConfig::default()).unwrap();
    assert_eq!(out.summaries.len(), 3);

    for summary in &out.summaries {
        let group: Vec<_> = out
            .rows
            .iter()
            .filter(|r| r.key.mode == summary.mode && r.key.alpha.raw == summary.alpha)
            .collect();

        let max_r = group.iter().map(|r| r.point.r).fold(f64::MIN, f64::max);
        let last = group.last().unwrap();

        assert_eq!(summary.rows, group.len());
        assert_eq!(summary.max_r, max_r);
        assert_eq!(summary.l_struct_uv, last.step.l_struct_uv);
    }
}

#[test]
fn test_clamped_inputs_stay_finite() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "grid.csv", GRID);

    let out = run_pisa(&input, &PipelineConfig::default()).unwrap();
    let clamped = out.rows.iter().find(|r| r.theta_raw == "3").unwrap();

    assert!(clamped.point.u.is_finite());
    assert!(clamped.point.v.is_finite());
    assert!((clamped.point.u + clamped.point.v).abs() < 1e-9);
}

#[test]
fn test_output_files_with_m_column() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "grid.csv", GRID);
    let config = PipelineConfig::default().with_overrides(None, Some("x".to_string()));
    let args = pisa_args(&dir, &input, config);

    execute_pisa(args.clone()).unwrap();

    let rows = fs::read_to_string(&args.row_out).unwrap();
    let mut lines = rows.lines();
    assert_eq!(
        lines.next().unwrap(),
        "mode,alpha,k,theta,a_avg_mean,s_avg_mean,u,v,R,Psi,du,dv,D_uv_step,L_struct_uv,m_used,D_muv_step,L_struct_muv"
    );
    let first = lines.next().unwrap();
    assert!(first.starts_with("A,1,1,0,0.5,0.5,0.549306144334055,0.549306144334055,"));
    assert!(first.ends_with(",0,0,0,0,0,0"));
    assert_eq!(rows.lines().count(), 6);

    let summary = fs::read_to_string(&args.summary_out).unwrap();
    assert!(summary.starts_with(
        "mode,alpha,k,rows,theta_min,theta_max,L_struct_uv,L_struct_muv,max_R,max_Psi,mean_R,mean_Psi\n"
    ));
    assert!(summary.contains("\nA,1,1,3,0,3,"));
}

#[test]
fn test_output_without_m_omits_m_columns() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "grid.csv", GRID);
    let args = pisa_args(&dir, &input, PipelineConfig::default());

    execute_pisa(args.clone()).unwrap();

    let rows = fs::read_to_string(&args.row_out).unwrap();
    assert!(!rows.contains("m_used"));
    let summary = fs::read_to_string(&args.summary_out).unwrap();
    assert!(!summary.contains("L_struct_muv"));
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "grid.csv", GRID);
    let args = pisa_args(&dir, &input, PipelineConfig::default());

    execute_pisa(args.clone()).unwrap();
    let rows_first = fs::read(&args.row_out).unwrap();
    let summary_first = fs::read(&args.summary_out).unwrap();

    execute_pisa(args.clone()).unwrap();
    assert_eq!(fs::read(&args.row_out).unwrap(), rows_first);
    assert_eq!(fs::read(&args.summary_out).unwrap(), summary_first);
}

#[test]
fn test_missing_column_is_fatal_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "grid.csv", "mode,alpha,k,theta,a_avg_mean\nA,1,1,0,0.5\n");
    let args = pisa_args(&dir, &input, PipelineConfig::default());

    let err = execute_pisa(args.clone()).unwrap_err();

    assert!(format!("{:#}", err).contains("s_avg_mean"));
    assert!(!args.row_out.exists());
    assert!(!args.summary_out.exists());
}

#[test]
fn test_missing_m_column_is_fatal() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "grid.csv", GRID);
    let config = PipelineConfig::default().with_overrides(None, Some("m".to_string()));
    let args = pisa_args(&dir, &input, config);

    let err = execute_pisa(args.clone()).unwrap_err();
    assert!(format!("{:#}", err).contains("'m'"));
    assert!(!args.row_out.exists());
}

#[test]
fn test_empty_input_is_fatal() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "grid.csv", "mode,alpha,k,theta,a_avg_mean,s_avg_mean\n");
    let args = pisa_args(&dir, &input, PipelineConfig::default());

    let err = execute_pisa(args.clone()).unwrap_err();
    assert!(format!("{:#}", err).contains("Empty CSV"));
    assert!(!args.summary_out.exists());
}
