use planpress::Intake;
use planpress::notify::{DeliveryOutcome, NotifyConfig, notify};

fn intake(email: &str) -> Intake {
    serde_json::from_str(&format!(r#"{{"email": "{email}", "targetTime": "3:58:00"}}"#)).unwrap()
}

#[test]
fn dry_run_finds_files_and_skips_delivery() {
    let dir = tempfile::tempdir().unwrap();
    let plans_dir = dir.path().join("plans");
    let output_dir = dir.path().join("output");
    std::fs::create_dir_all(&plans_dir).unwrap();
    std::fs::create_dir_all(&output_dir).unwrap();

    std::fs::write(
        plans_dir.join("jane-moderate-generated-20260806-101500.json"),
        "{}",
    )
    .unwrap();
    std::fs::write(
        output_dir.join("jane-moderate-generated-20260806-101500.pdf"),
        "%PDF-",
    )
    .unwrap();

    let cfg = NotifyConfig {
        plans_dir,
        output_dir,
        dry_run: true,
    };

    let outcome = notify(&intake("jane@example.com"), &cfg).unwrap();
    assert_eq!(outcome, DeliveryOutcome::Skipped("dry run".to_string()));
}

#[test]
fn missing_email_skips_without_touching_disk() {
    let cfg = NotifyConfig {
        plans_dir: "does-not-exist".into(),
        output_dir: "does-not-exist".into(),
        dry_run: false,
    };
    let outcome = notify(&Intake::default(), &cfg).unwrap();
    assert_eq!(
        outcome,
        DeliveryOutcome::Skipped("no email address in intake".to_string())
    );
}
