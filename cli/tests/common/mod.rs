// Not every test binary uses every helper.
#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;

pub const HELLO_CONTENT: &[u8; 11] = b"Hello World";
pub const HELLO_SHA1: &str = "5e1c309dae7f45e0f39b1bf3ac3cd9db12e7d689";
pub const EMPTY_TREE_SHA1: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

// A `gitcas` command that runs in `path`.
pub fn gitcas(path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gitcas").unwrap();
    cmd.current_dir(path);
    cmd
}

pub fn init_empty_repo(path: &Path) {
    gitcas(path)
        .args(&["init", path.to_str().unwrap()])
        .assert()
        .success();
}

// Run `gitcas` with `stdin` and return its stdout, which must be a single line.
pub fn output_line(path: &Path, args: &[&str], stdin: &[u8]) -> String {
    let output = gitcas(path)
        .args(args)
        .write_stdin(stdin.to_vec())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let mut line = String::from_utf8(output).unwrap();
    assert_eq!(line.pop(), Some('\n'));
    assert!(!line.contains('\n'), "more than one line: {:?}", line);
    line
}
