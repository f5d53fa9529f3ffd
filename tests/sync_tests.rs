//! End-to-end synchronization tests

mod common;

use common::*;

use predicates::prelude::*;
use std::fs;

const BASE: &str = "https://npm.example.com/-/web/detail/my-pkg?";

#[test]
fn test_sync_rewrites_links_into_manifest() {
    let temp = create_test_package();
    let root = temp.path();

    run_sync(root, &[])
        .success()
        .stdout(predicate::str::contains("Backed up"))
        .stdout(predicate::str::contains("Updated"));

    let manifest = read_manifest(root);
    let readme = manifest["readme"].as_str().unwrap();

    assert!(readme.contains(&format!("- [Install]({BASE}#install)")));
    assert!(readme.contains(&format!("- [Usage]({BASE}#usage)")));
    assert!(readme.contains(&format!("Back to [Install]({BASE}#install).")));
    // Preformatted content and external links are untouched
    assert!(readme.contains("See [Usage](#usage) after installing."));
    assert!(readme.contains("[npm](https://www.npmjs.com/#top)"));
}

#[test]
fn test_sync_keeps_other_fields_and_order() {
    let temp = create_test_package();
    let root = temp.path();

    run_sync(root, &[]).success();

    let content = fs::read_to_string(root.join("package.json")).unwrap();
    let positions: Vec<_> = [
        "\"name\"",
        "\"version\"",
        "\"description\"",
        "\"readme\"",
        "\"publishConfig\"",
        "\"scripts\"",
    ]
    .iter()
    .map(|key| content.find(key).unwrap())
    .collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "Field order changed:\n{}",
        content
    );

    let manifest = read_manifest(root);
    assert_eq!(manifest["version"], "1.2.3");
    assert_eq!(manifest["scripts"]["test"], "node test.js");
    assert!(content.ends_with("}\n"));
    assert!(content.starts_with("{\n  \"name\": \"my-pkg\",\n"));
}

#[test]
fn test_sync_creates_backup_of_original() {
    let temp = create_test_package();
    let root = temp.path();

    run_sync(root, &[]).success();

    let backups = backups(root);
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), MANIFEST);

    let name = backups[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("tmp-"), "Unexpected backup name: {}", name);
    assert!(name.contains("package-json-"), "Unexpected backup name: {}", name);
    assert!(!name.contains('.'), "Unexpected backup name: {}", name);
}

#[test]
fn test_second_run_is_unchanged() {
    let temp = create_test_package();
    let root = temp.path();

    run_sync(root, &[]).success();
    let after_first = fs::read_to_string(root.join("package.json")).unwrap();

    run_sync(root, &[])
        .success()
        .stdout(predicate::str::contains("Unchanged"));

    assert_eq!(fs::read_to_string(root.join("package.json")).unwrap(), after_first);
    assert_eq!(backups(root).len(), 1);
}

#[test]
fn test_dry_run_does_not_modify() {
    let temp = create_test_package();
    let root = temp.path();

    run_sync(root, &["--dry-run"])
        .success()
        .stdout(predicate::str::contains("DRY RUN"))
        .stdout(predicate::str::contains("Pending"));

    assert_eq!(fs::read_to_string(root.join("package.json")).unwrap(), MANIFEST);
    assert!(backups(root).is_empty());
}

#[test]
fn test_default_registry_when_not_configured() {
    let temp = create_package_with("[Top](#top)\n", "{\n  \"name\": \"plain\"\n}\n");
    let root = temp.path();

    run_sync(root, &[]).success();

    assert_eq!(
        read_manifest(root)["readme"],
        "[Top](http://localhost:4873/-/web/detail/plain?#top)\n"
    );
}

#[test]
fn test_explicit_markdown_path_uses_sibling_manifest() {
    let temp = create_test_package();
    let root = temp.path();

    let docs = root.join("docs");
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("GUIDE.MD"), "[A](#a)").unwrap();
    fs::write(docs.join("package.json"), "{\"name\":\"docs-pkg\"}").unwrap();

    run_sync(root, &["docs/GUIDE.MD"]).success();

    assert_eq!(
        read_manifest(&docs)["readme"],
        "[A](http://localhost:4873/-/web/detail/docs-pkg?#a)"
    );
    // Root manifest untouched
    assert_eq!(fs::read_to_string(root.join("package.json")).unwrap(), MANIFEST);
}

#[test]
fn test_non_markdown_argument_falls_back_to_readme() {
    let temp = create_test_package();
    let root = temp.path();

    run_sync(root, &["notes.txt"]).success();

    let manifest = read_manifest(root);
    assert!(
        manifest["readme"]
            .as_str()
            .unwrap()
            .starts_with("# my-pkg")
    );
}

#[test]
fn test_manifest_path_override() {
    let temp = create_test_package();
    let root = temp.path();

    let other = root.join("other");
    fs::create_dir(&other).unwrap();
    fs::write(other.join("package.json"), "{\"name\":\"other\"}").unwrap();

    run_sync(root, &["--manifest-path", "other/package.json"]).success();

    assert!(
        read_manifest(&other)["readme"]
            .as_str()
            .unwrap()
            .contains("[Install](http://localhost:4873/-/web/detail/other?#install)")
    );
    assert_eq!(fs::read_to_string(root.join("package.json")).unwrap(), MANIFEST);
}
