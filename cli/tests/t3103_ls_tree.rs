mod common;

use common::{EMPTY_TREE_SHA1, HELLO_CONTENT, HELLO_SHA1};

fn hex_to_bytes(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect()
}

fn tree_entry(mode: &str, path: &str, id: &str) -> Vec<u8> {
    let mut entry = format!("{} {}\0", mode, path).into_bytes();
    entry.extend(hex_to_bytes(id));
    entry
}

#[test]
fn lists_entries() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path();
    common::init_empty_repo(path);

    common::output_line(path, &["hash-object", "-w", "--stdin"], HELLO_CONTENT);
    common::output_line(path, &["hash-object", "-t", "tree", "-w", "--stdin"], b"");

    let mut tree = tree_entry("100644", "hello.txt", HELLO_SHA1);
    tree.extend(tree_entry("40000", "empty", EMPTY_TREE_SHA1));
    tree.extend(tree_entry("120000", "link", HELLO_SHA1));

    let tree_id = common::output_line(path, &["hash-object", "-t", "tree", "-w", "--stdin"], &tree);

    let stdout = common::gitcas(path)
        .args(&["ls-tree", &tree_id])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let expected = format!(
        "100644 blob {hello}\thello.txt\n040000 tree {empty}\tempty\n120000 blob {hello}\tlink\n",
        hello = HELLO_SHA1,
        empty = EMPTY_TREE_SHA1
    );
    assert_eq!(String::from_utf8(stdout).unwrap(), expected);
}

#[test]
fn error_missing_tree() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path();
    common::init_empty_repo(path);

    common::gitcas(path)
        .args(&["ls-tree", EMPTY_TREE_SHA1])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn error_not_a_tree() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path();
    common::init_empty_repo(path);

    common::output_line(path, &["hash-object", "-w", "--stdin"], HELLO_CONTENT);

    common::gitcas(path)
        .args(&["ls-tree", HELLO_SHA1])
        .assert()
        .failure()
        .stderr(format!("ERROR: {} is not a tree object\n", HELLO_SHA1).into_bytes());
}
