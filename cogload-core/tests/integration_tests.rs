//! Integration tests for cogload analysis

use cogload_core::{analyze, render_json, render_text, AnalysisOptions, SortKey};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("tests")
        .join("fixtures")
        .join("python")
        .join(name)
}

#[test]
fn test_scenario_rows() {
    let path = fixture_path("scenarios.py");
    let reports = analyze(&path, AnalysisOptions::default()).unwrap();

    assert_eq!(reports.len(), 1);
    let rows = &reports[0].rows;
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].function_name, "add_numbers_simple");
    assert_eq!(rows[0].cognitive_complexity, 0);
    assert_eq!(rows[0].lines_of_code, 10);
    assert_eq!(rows[0].logical_lines_of_code, 7);
    assert_eq!(rows[0].function_arguments, 3);

    assert_eq!(rows[1].function_name, "add_numbers_complex");
    assert_eq!(rows[1].cognitive_complexity, 1);
    assert_eq!(rows[1].lines_of_code, 6);
    assert_eq!(rows[1].logical_lines_of_code, 6);
    assert_eq!(rows[1].function_arguments, 3);
}

#[test]
fn test_logical_lines_never_exceed_physical() {
    for name in ["scenarios.py", "sorting.py", "methods.py", "nested.py"] {
        let reports = analyze(&fixture_path(name), AnalysisOptions::default()).unwrap();
        for report in &reports {
            for row in &report.rows {
                assert!(
                    row.logical_lines_of_code <= row.lines_of_code,
                    "{}: {} has lloc {} > loc {}",
                    name,
                    row.function_name,
                    row.logical_lines_of_code,
                    row.lines_of_code
                );
            }
        }
    }
}

#[test]
fn test_sort_by_complexity_then_size() {
    let path = fixture_path("sorting.py");

    // Discovery order first: scores are [2, 0, 1]
    let reports = analyze(&path, AnalysisOptions::default()).unwrap();
    let scores: Vec<usize> = reports[0]
        .rows
        .iter()
        .map(|row| row.cognitive_complexity)
        .collect();
    assert_eq!(scores, vec![2, 0, 1]);

    // Sorted: the 0-scoring, then 1-scoring, then 2-scoring function
    let options = AnalysisOptions {
        sort_keys: vec![SortKey::CognitiveComplexity, SortKey::LinesOfCode],
        count_receiver_parameter: false,
    };
    let reports = analyze(&path, options).unwrap();
    let names: Vec<&str> = reports[0]
        .rows
        .iter()
        .map(|row| row.function_name.as_str())
        .collect();
    assert_eq!(names, vec!["echo_value", "clamp_positive", "classify_number"]);
}

#[test]
fn test_directory_with_two_files() {
    let dir = tempfile::tempdir().unwrap();
    let scenario_source = std::fs::read_to_string(fixture_path("scenarios.py")).unwrap();
    std::fs::write(dir.path().join("alpha.py"), &scenario_source).unwrap();
    std::fs::write(dir.path().join("beta.py"), &scenario_source).unwrap();
    // A file with no function definitions emits no report
    std::fs::write(dir.path().join("conf.py"), "SETTING = 1\n").unwrap();

    let reports = analyze(dir.path(), AnalysisOptions::default()).unwrap();

    assert_eq!(reports.len(), 2);
    assert!(reports[0].file_path.ends_with("alpha.py"));
    assert!(reports[1].file_path.ends_with("beta.py"));
    for report in &reports {
        let names: Vec<&str> = report
            .rows
            .iter()
            .map(|row| row.function_name.as_str())
            .collect();
        assert_eq!(names, vec!["add_numbers_simple", "add_numbers_complex"]);
    }
}

#[test]
fn test_skipped_directories_are_not_analyzed() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("__pycache__")).unwrap();
    std::fs::write(
        dir.path().join("__pycache__").join("cached.py"),
        "def cached():\n    return 1\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("real.py"), "def real():\n    return 1\n").unwrap();

    // Sanity-check the fixture layout before analyzing it
    let laid_out: Vec<String> = walkdir::WalkDir::new(dir.path())
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert!(laid_out.contains(&"cached.py".to_string()));
    assert!(laid_out.contains(&"real.py".to_string()));

    let reports = analyze(dir.path(), AnalysisOptions::default()).unwrap();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].file_path.ends_with("real.py"));
}

#[test]
fn test_method_receivers_excluded_by_default() {
    let path = fixture_path("methods.py");
    let reports = analyze(&path, AnalysisOptions::default()).unwrap();

    let rows = &reports[0].rows;
    let args: Vec<(String, usize)> = rows
        .iter()
        .map(|row| (row.function_name.clone(), row.function_arguments))
        .collect();
    assert_eq!(
        args,
        vec![
            ("__init__".to_string(), 1),
            ("add".to_string(), 2),
            ("from_values".to_string(), 2),
        ]
    );
}

#[test]
fn test_nested_definitions_get_their_own_rows() {
    let path = fixture_path("nested.py");
    let reports = analyze(&path, AnalysisOptions::default()).unwrap();

    let rows = &reports[0].rows;
    assert_eq!(rows.len(), 2);

    // Outer first (pre-order); its size includes the nested body
    assert_eq!(rows[0].function_name, "make_counter");
    assert_eq!(rows[0].cognitive_complexity, 1);
    assert_eq!(rows[0].lines_of_code, 9);
    assert_eq!(rows[0].logical_lines_of_code, 7);

    assert_eq!(rows[1].function_name, "bump");
    assert_eq!(rows[1].cognitive_complexity, 1);
    assert_eq!(rows[1].lines_of_code, 4);
    assert_eq!(rows[1].logical_lines_of_code, 4);
}

#[test]
fn test_deterministic_output() {
    let path = fixture_path("scenarios.py");

    let reports1 = analyze(&path, AnalysisOptions::default()).unwrap();
    let reports2 = analyze(&path, AnalysisOptions::default()).unwrap();

    assert_eq!(
        render_json(&reports1),
        render_json(&reports2),
        "Output should be byte-for-byte identical"
    );
}

#[test]
fn test_text_rendering_end_to_end() {
    let path = fixture_path("scenarios.py");
    let reports = analyze(&path, AnalysisOptions::default()).unwrap();
    let text = render_text(&reports);

    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].ends_with("scenarios.py"));
    assert!(lines[1].starts_with("function_name"));
    assert!(lines[2].starts_with("---"));
    assert!(lines[3].starts_with("add_numbers_simple"));
    assert!(lines[4].starts_with("add_numbers_complex"));
}
