mod support;

use std::fs;

use tempfile::tempdir;

use support::{
    run_postrun, spawn_http_server, write_mixed_collection, write_passing_collection,
};

#[test]
fn e2e_passing_run_exits_zero() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    write_passing_collection(&dir.path().join("alpha.json"), "Alpha", &url)?;
    write_passing_collection(&dir.path().join("beta.json"), "Beta", &url)?;

    let args = vec![
        "--dir".to_owned(),
        dir.path().to_string_lossy().into_owned(),
    ];
    let output = run_postrun(args)?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for needle in ["Overall Summary", "Collections: 2 (2 passing)", "All tests passed."] {
        if !stdout.contains(needle) {
            return Err(format!("Missing '{}' in:\n{}", needle, stdout));
        }
    }
    Ok(())
}

#[test]
fn e2e_failing_request_exits_nonzero() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let file = dir.path().join("smoke.json");
    write_mixed_collection(&file, "Smoke", &url)?;

    let args = vec!["--file".to_owned(), file.to_string_lossy().into_owned()];
    let output = run_postrun(args)?;
    if output.status.code() != Some(1) {
        return Err(format!("Unexpected exit code: {:?}", output.status.code()));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    for needle in [
        "[1.1] PASS ok",
        "[1.2] FAIL missing",
        "Tests: 2 (1 passed, 1 failed)",
    ] {
        if !stdout.contains(needle) {
            return Err(format!("Missing '{}' in:\n{}", needle, stdout));
        }
    }
    Ok(())
}

#[test]
fn e2e_json_report_written_despite_failures() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let file = dir.path().join("smoke.json");
    let report = dir.path().join("report.json");
    write_mixed_collection(&file, "Smoke", &url)?;

    let args = vec![
        "--file".to_owned(),
        file.to_string_lossy().into_owned(),
        "--format".to_owned(),
        "json".to_owned(),
        "--output".to_owned(),
        report.to_string_lossy().into_owned(),
    ];
    let output = run_postrun(args)?;
    if output.status.code() != Some(1) {
        return Err(format!("Unexpected exit code: {:?}", output.status.code()));
    }

    let content =
        fs::read_to_string(&report).map_err(|err| format!("read report failed: {}", err))?;
    let parsed: serde_json::Value =
        serde_json::from_str(&content).map_err(|err| format!("reparse failed: {}", err))?;
    let first = parsed
        .get(0)
        .ok_or_else(|| "Expected one summary".to_owned())?;
    if first.get("collection_name") != Some(&serde_json::json!("Smoke")) {
        return Err(format!("Unexpected summary: {}", first));
    }
    if first.get("total_tests") != Some(&serde_json::json!(2)) {
        return Err("Unexpected total_tests".to_owned());
    }
    if first.get("failed_tests") != Some(&serde_json::json!(1)) {
        return Err("Unexpected failed_tests".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_csv_report_has_bom_and_header() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let file = dir.path().join("smoke.json");
    let report = dir.path().join("report.csv");
    write_passing_collection(&file, "Smoke", &url)?;

    let args = vec![
        "--file".to_owned(),
        file.to_string_lossy().into_owned(),
        "--format".to_owned(),
        "csv".to_owned(),
        "--output".to_owned(),
        report.to_string_lossy().into_owned(),
    ];
    let output = run_postrun(args)?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let content =
        fs::read_to_string(&report).map_err(|err| format!("read report failed: {}", err))?;
    if !content.starts_with('\u{feff}') {
        return Err("Expected a BOM prefix".to_owned());
    }
    if !content.contains(
        "Collection,FilePath,TestName,Method,URL,StatusCode,Success,ResponseTime,ErrorMessage",
    ) {
        return Err(format!("Missing header row in:\n{}", content));
    }
    if !content.contains("Smoke") {
        return Err(format!("Missing data row in:\n{}", content));
    }
    Ok(())
}

#[test]
fn e2e_malformed_sibling_file_is_skipped() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    write_passing_collection(&dir.path().join("good.json"), "Good", &url)?;
    fs::write(dir.path().join("broken.json"), "{ not json")
        .map_err(|err| format!("write failed: {}", err))?;

    let args = vec![
        "--dir".to_owned(),
        dir.path().to_string_lossy().into_owned(),
    ];
    let output = run_postrun(args)?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Collections: 1 (1 passing)") {
        return Err(format!(
            "Expected the broken file to be excluded:\n{}",
            stdout
        ));
    }
    Ok(())
}

#[test]
fn e2e_parallel_runs_every_file() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    for name in ["Alpha", "Beta", "Gamma"] {
        let file = dir.path().join(format!("{}.json", name.to_lowercase()));
        write_passing_collection(&file, name, &url)?;
    }

    let args = vec![
        "--dir".to_owned(),
        dir.path().to_string_lossy().into_owned(),
        "--parallel".to_owned(),
        "3".to_owned(),
    ];
    let output = run_postrun(args)?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("Collections: 3 (3 passing)") {
        return Err(format!("Expected every file to run:\n{}", stdout));
    }
    Ok(())
}

#[test]
fn e2e_config_file_supplies_format_and_output() -> Result<(), String> {
    let (url, _server) = spawn_http_server()?;
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let file = dir.path().join("smoke.json");
    let report = dir.path().join("report.json");
    let config_path = dir.path().join("postrun.toml");
    write_passing_collection(&file, "Configured", &url)?;

    let config = format!(
        r#"file = "{file}"
format = "json"
output = "{output}"
timeout = "5s"
"#,
        file = file.to_string_lossy(),
        output = report.to_string_lossy()
    );
    fs::write(&config_path, config).map_err(|err| format!("write config failed: {}", err))?;

    let args = vec![
        "--config".to_owned(),
        config_path.to_string_lossy().into_owned(),
    ];
    let output = run_postrun(args)?;
    if !output.status.success() {
        return Err(format!(
            "stdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        ));
    }

    let content =
        fs::read_to_string(&report).map_err(|err| format!("read report failed: {}", err))?;
    let parsed: serde_json::Value =
        serde_json::from_str(&content).map_err(|err| format!("reparse failed: {}", err))?;
    let first = parsed
        .get(0)
        .ok_or_else(|| "Expected one summary".to_owned())?;
    if first.get("collection_name") != Some(&serde_json::json!("Configured")) {
        return Err(format!("Unexpected summary: {}", first));
    }
    Ok(())
}
