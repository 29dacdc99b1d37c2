//! Tests for the access-list gate

use filegate::store::access::{AccessGate, Operation, load_section};

const LISTS: &str = "\
# files anyone may read
[whitelist]
./index.html
./note.txt

[deletelist]
./scratch.txt

[post_put_list]
./note.txt
";

fn gate_with(contents: &str) -> (tempfile::TempDir, AccessGate) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("server_lists.serverconf");
    std::fs::write(&path, contents).unwrap();
    (dir, AccessGate::new(path))
}

#[test]
fn test_operation_sections() {
    assert_eq!(Operation::Read.section(), "whitelist");
    assert_eq!(Operation::Write.section(), "post_put_list");
    assert_eq!(Operation::Delete.section(), "deletelist");
}

#[test]
fn test_load_section_skips_comments_and_blanks() {
    let list = load_section(LISTS, "whitelist");

    assert_eq!(list.len(), 2);
    assert!(list.contains("./index.html"));
    assert!(list.contains("./note.txt"));
}

#[test]
fn test_load_section_unknown_section_is_empty() {
    assert!(load_section(LISTS, "blacklist").is_empty());
}

#[test]
fn test_load_section_entries_before_any_section_ignored() {
    let list = load_section("./orphan.txt\n[whitelist]\n./a.txt\n", "whitelist");

    assert!(!list.contains("./orphan.txt"));
    assert!(list.contains("./a.txt"));
}

#[tokio::test]
async fn test_exact_match_required() {
    let (_dir, gate) = gate_with(LISTS);

    assert!(gate.is_permitted("./index.html", Operation::Read).await);
    assert!(!gate.is_permitted("index.html", Operation::Read).await);
    assert!(!gate.is_permitted("./index", Operation::Read).await);
    assert!(!gate.is_permitted("./index.html/", Operation::Read).await);
}

#[tokio::test]
async fn test_lists_are_separate() {
    let (_dir, gate) = gate_with(LISTS);

    assert!(gate.is_permitted("./scratch.txt", Operation::Delete).await);
    assert!(!gate.is_permitted("./scratch.txt", Operation::Read).await);
    assert!(!gate.is_permitted("./scratch.txt", Operation::Write).await);

    assert!(gate.is_permitted("./note.txt", Operation::Write).await);
    assert!(!gate.is_permitted("./index.html", Operation::Write).await);
}

#[tokio::test]
async fn test_missing_store_fails_closed() {
    let dir = tempfile::tempdir().unwrap();
    let gate = AccessGate::new(dir.path().join("nope.serverconf"));

    assert!(!gate.is_permitted("./index.html", Operation::Read).await);
    assert!(!gate.is_permitted("./index.html", Operation::Write).await);
    assert!(!gate.is_permitted("./index.html", Operation::Delete).await);
}

#[tokio::test]
async fn test_store_changes_apply_immediately() {
    let (dir, gate) = gate_with("[whitelist]\n");
    assert!(!gate.is_permitted("./late.txt", Operation::Read).await);

    std::fs::write(
        dir.path().join("server_lists.serverconf"),
        "[whitelist]\n./late.txt\n",
    )
    .unwrap();

    assert!(gate.is_permitted("./late.txt", Operation::Read).await);
}
