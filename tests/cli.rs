use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn write_file(path: &Path, contents: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn codescribe(workdir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_codescribe"))
        .current_dir(workdir)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn cli_minimal_keeps_business_files_only() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();

    write_file(&project.path().join("src/main.py"), &b"x".repeat(50));
    write_file(&project.path().join("node_modules/lib.js"), b"lib");
    write_file(&project.path().join("dist/bundle.js"), b"bundle");
    write_file(&project.path().join("README.md"), &b"r".repeat(200));

    let output = codescribe(
        out.path(),
        &["--source", project.path().to_str().unwrap(), "--minimal", "--no-logo"],
    );
    assert!(output.status.success());

    let md = fs::read_to_string(out.path().join("structure_complete.md")).unwrap();

    assert!(md.contains("### src/main.py"));
    assert!(md.contains("### README.md"));
    assert!(!md.contains("node_modules"));
    assert!(!md.contains("bundle.js"));

    // Contents section lists src/main.py before README.md (directories first).
    let main_pos = md.find("### src/main.py").unwrap();
    let readme_pos = md.find("### README.md").unwrap();
    assert!(main_pos < readme_pos);
}

#[test]
fn cli_max_size_truncates_to_exact_threshold() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();

    write_file(&project.path().join("big.log"), &b"a".repeat(20 * 1024));

    let output = codescribe(
        out.path(),
        &[
            "--source",
            project.path().to_str().unwrap(),
            "--include-ext",
            ".log",
            "--max-size",
            "10",
        ],
    );
    assert!(output.status.success());

    let md = fs::read_to_string(out.path().join("structure_complete.md")).unwrap();

    assert!(md.contains(&"a".repeat(10 * 1024)));
    assert!(!md.contains(&"a".repeat(10 * 1024 + 1)));
    assert!(md.contains("*[truncated: 10240 bytes omitted]*"));
}

#[test]
fn cli_exclude_ext_wins_over_default_and_include() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();

    write_file(&project.path().join("keep.py"), b"keep");
    write_file(&project.path().join("notes.md"), b"notes");
    write_file(&project.path().join("noise.log"), b"noise");

    let output = codescribe(
        out.path(),
        &[
            "--source",
            project.path().to_str().unwrap(),
            "--include-ext",
            ".log",
            "--exclude-ext",
            ".log",
            ".md",
        ],
    );
    assert!(output.status.success());

    let md = fs::read_to_string(out.path().join("structure_complete.md")).unwrap();

    assert!(md.contains("### keep.py"));
    assert!(!md.contains("notes.md"));
    assert!(!md.contains("noise.log"));
}

#[test]
fn cli_output_is_idempotent() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();

    write_file(&project.path().join("src/app.py"), b"a = 1\n");
    write_file(&project.path().join("src/util.py"), b"b = 2\n");
    write_file(&project.path().join("README.md"), b"# readme\n");

    let args = ["--source", project.path().to_str().unwrap(), "--export-txt"];
    assert!(codescribe(out.path(), &args).status.success());
    let first_md = fs::read(out.path().join("structure_complete.md")).unwrap();
    let first_txt = fs::read(out.path().join("structure_complete.txt")).unwrap();

    assert!(codescribe(out.path(), &args).status.success());
    let second_md = fs::read(out.path().join("structure_complete.md")).unwrap();
    let second_txt = fs::read(out.path().join("structure_complete.txt")).unwrap();

    assert_eq!(first_md, second_md);
    assert_eq!(first_txt, second_txt);
}

#[test]
fn cli_txt_mode_writes_plain_text_only() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();

    write_file(&project.path().join("main.py"), b"print('x')\n");

    let output = codescribe(
        out.path(),
        &["--source", project.path().to_str().unwrap(), "--txt", "--no-logo"],
    );
    assert!(output.status.success());

    assert!(!out.path().join("structure_complete.md").exists());
    let txt = fs::read_to_string(out.path().join("structure_complete.txt")).unwrap();
    assert!(!txt.contains("```"));
    assert!(txt.contains("==== main.py ===="));
}

#[test]
fn cli_export_txt_writes_both_formats() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();

    write_file(&project.path().join("main.py"), b"print('x')\n");

    let output = codescribe(
        out.path(),
        &["--source", project.path().to_str().unwrap(), "--export-txt"],
    );
    assert!(output.status.success());

    assert!(out.path().join("structure_complete.md").exists());
    assert!(out.path().join("structure_complete.txt").exists());
}

#[test]
fn cli_custom_output_base_name() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();

    write_file(&project.path().join("main.py"), b"print('x')\n");

    let output = codescribe(
        out.path(),
        &[
            "--source",
            project.path().to_str().unwrap(),
            "--output",
            "context.md",
        ],
    );
    assert!(output.status.success());
    assert!(out.path().join("context.md").exists());
}

#[test]
fn cli_git_ignore_without_ignore_file_fails() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();

    write_file(&project.path().join("main.py"), b"x");

    let output = codescribe(
        out.path(),
        &["--source", project.path().to_str().unwrap(), "--git-ignore"],
    );
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("--git-ignore"));
    assert!(!out.path().join("structure_complete.md").exists());
}

#[test]
fn cli_git_ignore_applies_patterns() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();

    write_file(&project.path().join(".gitignore"), b"generated.py\n");
    write_file(&project.path().join("main.py"), b"x");
    write_file(&project.path().join("generated.py"), b"y");

    let output = codescribe(
        out.path(),
        &["--source", project.path().to_str().unwrap(), "--git-ignore"],
    );
    assert!(output.status.success());

    let md = fs::read_to_string(out.path().join("structure_complete.md")).unwrap();
    assert!(md.contains("### main.py"));
    assert!(!md.contains("generated.py"));
}

#[test]
fn cli_default_ext_prints_set_and_exits() {
    let out = tempdir().unwrap();

    let output = codescribe(out.path(), &["--default-ext"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(".py"));
    assert!(stdout.contains(".md"));
    assert!(!out.path().join("structure_complete.md").exists());
}

#[test]
fn cli_missing_source_fails() {
    let out = tempdir().unwrap();

    let output = codescribe(out.path(), &["--source", "/no/such/directory"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("source not found"));
}

#[test]
fn cli_summary_reports_counts() {
    let project = tempdir().unwrap();
    let out = tempdir().unwrap();

    write_file(&project.path().join("a.py"), b"a = 1\n");
    write_file(&project.path().join("skip.bin"), b"skip");

    let output = codescribe(out.path(), &["--source", project.path().to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Files included: 1"));
    assert!(stdout.contains("Files skipped: 1"));
    assert!(stdout.contains("Estimated tokens:"));
}
