//! Integration tests for the gitlink CLI.
//!
//! These tests run the built binary against real git repositories and check
//! its output and exit status.

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Test fixture: a repository with two commits and a remote-tracking ref.
struct TestRepo {
    dir: TempDir,
    home: TempDir,
}

impl TestRepo {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        run_git(dir.path(), &["init", "-b", "main"]);
        run_git(dir.path(), &["config", "user.email", "test@example.com"]);
        run_git(dir.path(), &["config", "user.name", "Test User"]);

        dir.child("README.md").write_str("# Test Repo\n").unwrap();
        dir.child("src/main.txt").write_str("main\n").unwrap();
        run_git(dir.path(), &["add", "-A"]);
        run_git(dir.path(), &["commit", "-m", "Initial commit"]);

        dir.child("src/lib.txt").write_str("lib\n").unwrap();
        run_git(dir.path(), &["add", "-A"]);
        run_git(dir.path(), &["commit", "-m", "Add lib"]);

        run_git(dir.path(), &["remote", "add", "origin", "https://example.com/r.git"]);
        run_git(dir.path(), &["update-ref", "refs/remotes/origin/main", "HEAD~1"]);

        Self { dir, home }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A gitlink command running in the repository with an isolated config.
    fn gitlink(&self) -> Command {
        let mut cmd = Command::cargo_bin("gitlink").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.home.path())
            .env("GITLINK_CONFIG", self.home.path().join("none.toml"))
            .env_remove("XDG_CONFIG_HOME")
            .env_remove("RUST_LOG");
        cmd
    }

    fn rev_parse(&self, expr: &str) -> String {
        let output = StdCommand::new("git")
            .args(["rev-parse", expr])
            .current_dir(self.path())
            .output()
            .expect("git rev-parse failed");
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }
}

fn run_git(dir: &Path, args: &[&str]) {
    let output = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git command failed");

    if !output.status.success() {
        panic!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn version_flag_works() {
    Command::cargo_bin("gitlink")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gitlink"));
}

#[test]
fn completion_generates_script() {
    Command::cargo_bin("gitlink")
        .unwrap()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gitlink"));
}

#[test]
fn outside_repository_fails() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("gitlink")
        .unwrap()
        .current_dir(dir.path())
        .args(["resolve", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: "));
}

// =============================================================================
// resolve
// =============================================================================

#[test]
fn resolve_commit_text() {
    let repo = TestRepo::new();
    let expected = format!(
        "commit {}\ntree {}\n",
        repo.rev_parse("HEAD~1"),
        repo.rev_parse("HEAD~1^{tree}")
    );

    repo.gitlink()
        .args(["resolve", "HEAD~1"])
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn resolve_colon_path_json() {
    let repo = TestRepo::new();
    let output = repo
        .gitlink()
        .args(["resolve", "HEAD~1:src/main.txt", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["type"], "object");
    assert_eq!(json["kind"], "blob");
    assert_eq!(json["path"], "src/main.txt");
    assert_eq!(json["sha"], repo.rev_parse("HEAD~1:src/main.txt"));
    assert_eq!(json["tree_sha"], repo.rev_parse("HEAD~1:src"));
    assert_eq!(json["commit_sha"], repo.rev_parse("HEAD~1"));
}

#[test]
fn resolve_directory_with_cwd_flag() {
    let repo = TestRepo::new();
    let elsewhere = TempDir::new().unwrap();

    Command::cargo_bin("gitlink")
        .unwrap()
        .current_dir(elsewhere.path())
        .env("GITLINK_CONFIG", elsewhere.path().join("none.toml"))
        .args(["--cwd", repo.path().to_str().unwrap(), "resolve", "src"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "path {}",
            repo.rev_parse("HEAD:src")
        )));
}

#[test]
fn resolve_unknown_fails() {
    let repo = TestRepo::new();
    repo.gitlink()
        .args(["resolve", "HEAD~10"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("cannot resolve 'HEAD~10'"));
}

#[test]
fn one_failure_does_not_stop_other_args() {
    let repo = TestRepo::new();
    repo.gitlink()
        .args(["resolve", "HEAD:missing.txt", "HEAD:README.md"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(repo.rev_parse("HEAD:README.md")))
        .stderr(predicate::str::contains("cannot resolve 'HEAD:missing.txt'"))
        .stderr(predicate::str::contains("1 of 2 arguments"));
}

#[test]
fn resolve_any_falls_back_to_branch() {
    let repo = TestRepo::new();
    run_git(repo.path(), &["update-ref", "refs/remotes/origin/topic/x", "HEAD"]);

    repo.gitlink()
        .args(["resolve", "--any", "topic/x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("short topic/x"));
}

#[test]
fn quiet_suppresses_output() {
    let repo = TestRepo::new();
    repo.gitlink()
        .args(["--quiet", "resolve", "HEAD"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// =============================================================================
// branch
// =============================================================================

#[test]
fn branch_remote_tracking() {
    let repo = TestRepo::new();
    repo.gitlink()
        .args(["branch", "origin/main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ref refs/remotes/origin/main"))
        .stdout(predicate::str::contains("short main"))
        .stdout(predicate::str::contains("remote origin"));
}

#[test]
fn branch_local_json() {
    let repo = TestRepo::new();
    run_git(repo.path(), &["branch", "feature-x"]);

    let output = repo
        .gitlink()
        .args(["branch", "feature-x", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["full_ref"], "refs/heads/feature-x");
    assert!(json["short_ref"].is_null());
}

#[test]
fn branch_unknown_fails() {
    let repo = TestRepo::new();
    repo.gitlink()
        .args(["branch", "no-such-branch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-branch"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn repo_config_sets_default_commitish() {
    let repo = TestRepo::new();
    repo.dir
        .child(".git/gitlink/config.toml")
        .write_str("default_commitish = \"HEAD~1\"\n")
        .unwrap();

    repo.gitlink()
        .args(["resolve", ":src/main.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "commit {}",
            repo.rev_parse("HEAD~1")
        )));

    // src/lib.txt only exists from HEAD on
    repo.gitlink()
        .args(["resolve", "src/lib.txt"])
        .assert()
        .failure();
}

#[test]
fn global_config_enables_json() {
    let repo = TestRepo::new();
    let config = repo.home.child("gitlink.toml");
    config.write_str("json = true\n").unwrap();

    repo.gitlink()
        .env("GITLINK_CONFIG", config.path())
        .args(["resolve", "HEAD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"commit\""));
}

#[test]
fn invalid_config_is_reported() {
    let repo = TestRepo::new();
    repo.dir
        .child(".git/gitlink/config.toml")
        .write_str("no_such_key = 1\n")
        .unwrap();

    repo.gitlink()
        .args(["resolve", "HEAD"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load configuration"));
}
