use std::process::Command;

fn run(args: &[&str]) -> (bool, String, String) {
    run_in(env!("CARGO_MANIFEST_DIR"), args)
}

fn run_in(dir: impl AsRef<std::path::Path>, args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_vrf-sizer"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("vrf-sizer process should run");
    (
        output.status.success(),
        String::from_utf8(output.stdout).expect("stdout should be valid UTF-8"),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

/// Model on the `Ideal:` line following the `[brand]` header.
fn ideal_model(stdout: &str, brand: &str) -> String {
    let mut lines = stdout
        .lines()
        .skip_while(|l| !l.starts_with(&format!("[{brand}]")));
    lines.next();
    let line = lines
        .next()
        .unwrap_or_else(|| panic!("missing {brand} section in output: {stdout}"));
    line.trim()
        .strip_prefix("Ideal:")
        .and_then(|rest| rest.split_whitespace().next())
        .unwrap_or_else(|| panic!("invalid ideal line `{line}`"))
        .to_string()
}

#[test]
fn project_files_produce_reports() {
    for path in [
        "projects/office.toml",
        "projects/residence.toml",
        "projects/invalid_combination.toml",
    ] {
        let (ok, stdout, stderr) = run(&["--project", path]);
        assert!(ok, "run failed for {path}: stderr={stderr}");
        assert!(stdout.contains("--- Sizing Report ---"), "{path}: {stdout}");
        assert!(stdout.contains("[Samsung]") && stdout.contains("[Daikin]"));
    }
}

#[test]
fn office_project_selects_vertical_units() {
    let (ok, stdout, stderr) = run(&["--project", "projects/office.toml"]);
    assert!(ok, "stderr={stderr}");
    // 148761 BTU/h x 110% = 163637.1
    assert_eq!(ideal_model(&stdout, "Samsung"), "AM180BXVGGR");
    assert!(!stdout.contains("Notice:"), "data files should load: {stdout}");
}

#[test]
fn project_data_loads_from_any_working_directory() {
    let project = concat!(env!("CARGO_MANIFEST_DIR"), "/projects/office.toml");
    let (ok, stdout, stderr) = run_in(std::env::temp_dir(), &["--project", project]);
    assert!(ok, "stderr={stderr}");
    assert!(!stdout.contains("Notice:"), "{stdout}");
    assert_eq!(ideal_model(&stdout, "Samsung"), "AM180BXVGGR");
}

#[test]
fn evaporator_list_is_exported() {
    let path = std::env::temp_dir().join(format!("vrf-sizer-evaporators-{}.csv", std::process::id()));
    let path_arg = path.to_string_lossy().into_owned();
    let (ok, _, stderr) = run(&["--preset", "residential", "--export-evaporators", &path_arg]);
    assert!(ok, "stderr={stderr}");

    let csv = std::fs::read_to_string(&path).expect("evaporator CSV should be written");
    std::fs::remove_file(&path).ok();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("kind,nominal,real_capacity,quantity,line_capacity,approximated")
    );
    assert_eq!(lines.next(), Some("hi-wall,7,7034.0,2,14068.0,false"));
    assert_eq!(lines.count(), 2);
}

#[test]
fn invalid_combination_is_printed() {
    let (ok, stdout, _) = run(&["--project", "projects/invalid_combination.toml"]);
    assert!(ok);
    assert!(stdout.contains("invalid combination"), "{stdout}");
    assert!(stdout.contains("exceeds the brand limit"), "{stdout}");
}

#[test]
fn overrides_change_the_result() {
    let (_, vertical, _) = run(&["--preset", "residential", "--orientation", "vertical"]);
    let (_, horizontal, _) = run(&["--preset", "residential"]);
    assert_ne!(
        ideal_model(&vertical, "Samsung"),
        ideal_model(&horizontal, "Samsung")
    );
}

#[test]
fn missing_catalog_degrades_with_notice() {
    let (ok, stdout, _) = run(&["--preset", "office", "--catalog", "/nonexistent/catalog.toml"]);
    assert!(ok);
    assert_eq!(stdout.matches("Notice: catalog unavailable").count(), 1);
    assert!(stdout.contains("--- Sizing Report ---"));
}

#[test]
fn bad_arguments_exit_nonzero() {
    let (ok, _, stderr) = run(&["--brand", "lg"]);
    assert!(!ok);
    assert!(stderr.contains("unknown brand"));

    let (ok, _, stderr) = run(&["--preset", "stadium"]);
    assert!(!ok);
    assert!(stderr.contains("unknown preset"));
}
