use std::fs;
use std::path::{Path, PathBuf};

use reconciling::{Assertion, Discrepancy, Plan, Relocation, missing_files, reconcile};

#[test]
fn discrepancy_set_differences() {
    let declared = vec![PathBuf::from("/out/a.js"), PathBuf::from("/out/b.js")];
    let emitted = vec![PathBuf::from("/out/b.js"), PathBuf::from("/out/c.js")];

    let discrepancy = Discrepancy::between(&declared, &emitted);
    assert_eq!(discrepancy.emitted_but_not_declared.into_iter().collect::<Vec<_>>(), vec![
        PathBuf::from("/out/c.js")
    ]);
    assert_eq!(discrepancy.declared_but_not_emitted.into_iter().collect::<Vec<_>>(), vec![
        PathBuf::from("/out/a.js")
    ]);
}

#[test]
fn discrepancy_differences_are_disjoint() {
    let declared = vec![PathBuf::from("/out/a.js"), PathBuf::from("/out/x/../b.js")];
    let emitted = vec![PathBuf::from("/out/b.js"), PathBuf::from("/out/c.js")];

    let discrepancy = Discrepancy::between(&declared, &emitted);
    assert!(
        discrepancy
            .emitted_but_not_declared
            .intersection(&discrepancy.declared_but_not_emitted)
            .next()
            .is_none()
    );
}

#[test]
fn discrepancy_ignores_order_and_spelling() {
    let declared = vec![PathBuf::from("/out/a.js"), PathBuf::from("/out/./b.js")];
    let emitted = vec![PathBuf::from("/out/b.js"), PathBuf::from("/out/a.js")];

    let discrepancy = Discrepancy::between(&declared, &emitted);
    assert!(discrepancy.is_empty());
    assert_eq!(discrepancy, Discrepancy::default());
}

#[test]
fn discrepancy_message() {
    let declared = vec![PathBuf::from("/out/a.js")];
    let emitted = vec![PathBuf::from("/out/b.js"), PathBuf::from("/out/c.js")];

    let discrepancy = Discrepancy::between(&declared, &emitted);
    insta::assert_snapshot!(discrepancy.to_string(), @r"
    emitted and declared files are not equal
    emitted but not declared /out/b.js,/out/c.js
    declared but not emitted /out/a.js
    ");
}

#[tokio::test]
async fn missing_files_requires_regular_files() {
    let directory = tempfile::tempdir().unwrap();
    let root = directory.path();
    fs::write(root.join("a.js"), "").unwrap();
    fs::create_dir_all(root.join("b.js")).unwrap();

    let declared = vec![root.join("a.js"), root.join("b.js"), root.join("c.js")];
    let missing = missing_files(&declared).await.unwrap();
    assert_eq!(missing, vec![root.join("b.js"), root.join("c.js")]);
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[tokio::test]
async fn relocates_split_outputs_then_asserts() {
    let directory = tempfile::tempdir().unwrap();
    let target = directory.path().join("target");

    write(&target.join("main/assets/app.js"), "main");
    write(&target.join("test/assets/app.spec.js"), "test");

    let relocation = Relocation::new(
        &target,
        Path::new("/project/src/main/assets"),
        Path::new("/project/src/test/assets"),
    );
    let declared = vec![target.join("app.spec.js")];
    let assertion = Assertion { declared: declared.clone(), emitted: declared, emit_skipped: false };
    let plan = Plan { relocation: Some(relocation), assertion: Some(assertion) };

    let report = reconcile(plan).await;

    assert!(report.relocation_error.is_none());
    assert!(report.discrepancy.is_none());
    assert!(report.missing.is_empty());
    assert!(!target.join("main/assets").exists());
    assert!(!target.join("test/assets").exists());
    assert_eq!(fs::read_to_string(target.join("app.spec.js")).unwrap(), "test");
}

#[tokio::test]
async fn failed_relocation_skips_assertion() {
    let directory = tempfile::tempdir().unwrap();
    let target = directory.path().join("target");
    write(&target.join("main/assets/app.js"), "main");

    let relocation = Relocation::new(
        &target,
        Path::new("/project/src/main/assets"),
        Path::new("/project/src/test/assets"),
    );
    let assertion = Assertion {
        declared: vec![target.join("never.js")],
        emitted: vec![],
        emit_skipped: false,
    };
    let plan = Plan { relocation: Some(relocation), assertion: Some(assertion) };

    let report = reconcile(plan).await;

    assert!(report.relocation_error.is_some());
    assert!(report.discrepancy.is_none());
    assert!(report.missing.is_empty());
}

#[tokio::test]
async fn assertion_reports_discrepancy_and_missing_files() {
    let directory = tempfile::tempdir().unwrap();
    let target = directory.path();
    write(&target.join("a.js"), "");
    write(&target.join("extra.js"), "");

    let assertion = Assertion {
        declared: vec![target.join("a.js"), target.join("b.js")],
        emitted: vec![target.join("a.js"), target.join("extra.js")],
        emit_skipped: false,
    };
    let plan = Plan { relocation: None, assertion: Some(assertion) };

    let report = reconcile(plan).await;

    let discrepancy = report.discrepancy.unwrap();
    assert!(discrepancy.emitted_but_not_declared.contains(&target.join("extra.js")));
    assert!(discrepancy.declared_but_not_emitted.contains(&target.join("b.js")));
    assert_eq!(report.missing, vec![target.join("b.js")]);
}

#[tokio::test]
async fn empty_plan_does_nothing() {
    let plan = Plan::default();
    assert!(plan.is_empty());

    let report = reconcile(plan).await;
    assert!(report.relocation_error.is_none());
    assert!(report.discrepancy.is_none());
    assert!(report.missing.is_empty());
}
