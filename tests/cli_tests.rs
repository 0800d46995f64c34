use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use trendboard::config::Config;

fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("trendboard-cli-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn trendboard(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_trendboard"))
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
}

#[test]
fn test_init_writes_loadable_config() {
    let dir = scratch_dir();

    let output = trendboard(&dir, &["init"]);
    assert!(output.status.success());

    let config = Config::load_from_path(&dir.join("config.toml")).unwrap();
    assert_eq!(config.server.port, 5000);
    assert!(config.validate().is_ok());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_init_ignores_broken_config() {
    let dir = scratch_dir();
    std::fs::write(dir.join("config.toml"), "general = [").unwrap();

    let output = trendboard(&dir, &["init"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("already exists"));

    // Other commands still refuse the broken file.
    let output = trendboard(&dir, &["history"]);
    assert!(!output.status.success());

    std::fs::remove_dir_all(&dir).unwrap();
}
