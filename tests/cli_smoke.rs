use std::path::PathBuf;

#[test]
fn cli_render_writes_pdf() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let out_path = dir.join("out.pdf");
    let _ = std::fs::remove_file(&out_path);

    let exe = std::env::var_os("CARGO_BIN_EXE_planpress")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "planpress.exe"
            } else {
                "planpress"
            });
            p
        });

    let out_arg = out_path.to_string_lossy().to_string();

    let status = std::process::Command::new(exe)
        .args([
            "render",
            "--plan",
            "demos/plan-sample.json",
            "--quotes",
            "demos/quotes-sample.json",
            "--out",
        ])
        .arg(out_arg.as_str())
        .status()
        .unwrap();

    assert!(status.success());
    let bytes = std::fs::read(&out_path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}
