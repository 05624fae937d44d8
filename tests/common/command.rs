use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const METADATA_DIR: &str = "git";
pub const AUTHOR_DATE: &str = "2023-01-01 12:00:00 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with `a.txt`, `dir/b.txt` and `dir/sub/c.txt` committed once
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hi".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("dir").join("b.txt"),
        "yo".to_string(),
    ));
    write_file(FileSpec::new(
        repository_dir.path().join("dir").join("sub").join("c.txt"),
        "deep".to_string(),
    ));

    run_twig_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    twig_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_twig_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("twig").expect("Failed to find twig binary");
    cmd.env_remove("TWIG_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn twig_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_twig_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("TWIG_AUTHOR_NAME", "fake_user"),
        ("TWIG_AUTHOR_DATE", AUTHOR_DATE), // %Y-%m-%d %H:%M:%S %z
    ]);
    cmd
}

/// Current HEAD commit SHA, empty if nothing was committed yet
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_content = std::fs::read_to_string(dir.join(METADATA_DIR).join("HEAD"))?;

    Ok(head_content.trim().to_string())
}

pub fn read_index(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    Ok(std::fs::read_to_string(dir.join(METADATA_DIR).join("index"))?)
}

pub fn read_object(dir: &Path, oid: &str) -> Result<String, Box<dyn std::error::Error>> {
    Ok(std::fs::read_to_string(
        dir.join(METADATA_DIR).join("objects").join(oid),
    )?)
}

/// The `<field>: <value>` line of a stored commit
pub fn commit_field(
    dir: &Path,
    commit_id: &str,
    field: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let prefix = format!("{}: ", field);

    Ok(read_object(dir, commit_id)?
        .lines()
        .find_map(|line| line.strip_prefix(&prefix).map(str::to_string)))
}
