use filegate::config::Config;
use serial_test::serial;
use std::path::PathBuf;

fn clear_env() {
    unsafe {
        std::env::remove_var("LISTEN");
        std::env::remove_var("FILEGATE_ROOT");
    }
}

#[test]
#[serial]
fn test_config_defaults() {
    clear_env();
    let cfg = Config::load();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.server.root, PathBuf::from("."));
    assert_eq!(cfg.server.max_request_bytes, 2048);
    assert_eq!(cfg.access.list_file, PathBuf::from("./server_lists.serverconf"));
    assert!(!cfg.access.guard_put);
}

#[test]
#[serial]
fn test_config_custom_address_from_env() {
    unsafe {
        std::env::set_var("LISTEN", "0.0.0.0:3000");
    }
    let cfg = Config::load();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    clear_env();
}

#[test]
#[serial]
fn test_config_root_from_env() {
    unsafe {
        std::env::set_var("FILEGATE_ROOT", "/srv/files");
    }
    let cfg = Config::load();
    assert_eq!(cfg.server.root, PathBuf::from("/srv/files"));
    clear_env();
}

#[test]
fn test_config_from_yaml_partial() {
    let cfg = Config::from_yaml(
        "server:\n  root: /srv/files\naccess:\n  guard_put: true\n",
    )
    .unwrap();

    assert_eq!(cfg.server.root, PathBuf::from("/srv/files"));
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert!(cfg.access.guard_put);
}

#[test]
fn test_config_rejects_zero_buffer() {
    let result = Config::from_yaml("server:\n  max_request_bytes: 0\n");

    assert!(result.is_err());
}

#[test]
fn test_config_rejects_unknown_types() {
    assert!(Config::from_yaml("server:\n  max_request_bytes: lots\n").is_err());
}

#[test]
#[serial]
fn test_config_from_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filegate.yaml");
    std::fs::write(&path, "server:\n  listen_addr: \"127.0.0.1:9090\"\n").unwrap();

    let cfg = Config::from_file(&path).unwrap();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:9090");
}

#[test]
fn test_config_missing_file_is_error() {
    assert!(Config::from_file("/definitely/not/here.yaml").is_err());
}

#[test]
fn test_list_file_relative_to_root() {
    let cfg = Config::from_yaml("server:\n  root: /srv/files\n").unwrap();

    assert_eq!(
        cfg.list_file_path(),
        PathBuf::from("/srv/files/./server_lists.serverconf")
    );
}

#[test]
fn test_list_file_absolute_is_kept() {
    let cfg = Config::from_yaml(
        "server:\n  root: /srv/files\naccess:\n  list_file: /etc/filegate/lists\n",
    )
    .unwrap();

    assert_eq!(cfg.list_file_path(), PathBuf::from("/etc/filegate/lists"));
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.server.listen_addr, cfg2.server.listen_addr);
}
