//! End-to-end pipeline runs against a stubbed cross toolchain.

#![cfg(target_os = "linux")]

use osdk_core::{BuildConfig, BuildPaths, BuildSystem, CACHE_FILE_NAME};
use osdk_utils::Logger;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_GCC: &str = r#"#!/bin/sh
echo x >> "$(dirname "$0")/gcc-calls.log"
out=""
src=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift ;;
    *.c) src="$1" ;;
  esac
  shift
done
printf 'obj\n' > "$out"
printf '%s: %s\n' "$out" "$src" > "${out%.o}.d"
"#;

const FAKE_GCC_FAILING: &str = r#"#!/bin/sh
echo "fatal error: stub" >&2
exit 1
"#;

// rcs <target> <objects...>; records one line per archived object
const FAKE_AR: &str = r#"#!/bin/sh
shift
target="$1"
shift
for obj in "$@"; do
  printf '%s\n' "$obj" >> "$target"
done
"#;

fn write_executable(path: &Path, script: &str) {
    std::fs::write(path, script).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"/* stub */\n").unwrap();
}

/// Minimal SDK drop: only the JSON and key-value-store sources exist.
fn minimal_layout(root: &Path, gcc_script: &str) -> BuildPaths {
    for dir in ["toolchain", "vendor", "flags", "sdk", "port", "obj", "lib"] {
        std::fs::create_dir_all(root.join(dir)).unwrap();
    }
    for file in [
        "c_flags.txt",
        "open_sdk_includes.txt",
        "vendor_includes.txt",
        "port_includes.txt",
    ] {
        std::fs::write(root.join("flags").join(file), b"").unwrap();
    }

    write_executable(&root.join("toolchain/arm-none-eabi-gcc"), gcc_script);
    write_executable(&root.join("toolchain/arm-none-eabi-ar"), FAKE_AR);

    let src = root.join("sdk/src");
    touch(&src.join("libcjson/cJSON/cJSON.c"));
    touch(&src.join("tal_kv/littlefs/lfs_util.c"));
    touch(&src.join("tal_kv/littlefs/lfs.c"));
    touch(&src.join("tal_kv/src/tal_kv.c"));
    touch(&src.join("tal_kv/src/kv_serialize.c"));

    BuildPaths {
        compiler_path: root.join("toolchain").display().to_string(),
        vendor_path: root.join("vendor").display().to_string(),
        flags_path: root.join("flags").display().to_string(),
        open_sdk_path: root.join("sdk").display().to_string(),
        tkl_path: root.join("port").display().to_string(),
        object_output_dir: root.join("obj").display().to_string(),
        lib_output_dir: root.join("lib").display().to_string(),
        lib_output_name: "libvendor.a".to_string(),
    }
}

fn expected_objects(root: &Path) -> Vec<PathBuf> {
    let obj = root.join("obj/src");
    vec![
        obj.join("libcjson/cJSON/cJSON.o"),
        obj.join("tal_kv/littlefs/lfs_util.o"),
        obj.join("tal_kv/littlefs/lfs.o"),
        obj.join("tal_kv/src/tal_kv.o"),
        obj.join("tal_kv/src/kv_serialize.o"),
    ]
}

fn gcc_invocations(root: &Path) -> usize {
    std::fs::read_to_string(root.join("toolchain/gcc-calls.log"))
        .map(|log| log.lines().count())
        .unwrap_or(0)
}

#[test]
fn minimal_tree_builds_exactly_one_archive() {
    let tmp = TempDir::new().unwrap();
    let paths = minimal_layout(tmp.path(), FAKE_GCC);

    let config = BuildConfig::resolve(paths).unwrap();
    let build = BuildSystem::new(config, false, Logger::new()).unwrap();
    let archive = build.build(Some(2)).unwrap();

    assert_eq!(archive, tmp.path().join("lib/libvendor.a"));
    assert!(archive.exists());

    let expected = expected_objects(tmp.path());
    for object in &expected {
        assert!(object.exists(), "missing object {}", object.display());
    }

    // The stub archiver records exactly what it was fed.
    let archived: Vec<PathBuf> = std::fs::read_to_string(&archive)
        .unwrap()
        .lines()
        .map(PathBuf::from)
        .collect();
    assert_eq!(archived, expected);
}

#[test]
fn missing_include_flag_file_halts_before_any_compile() {
    let tmp = TempDir::new().unwrap();
    let paths = minimal_layout(tmp.path(), FAKE_GCC);
    std::fs::remove_file(tmp.path().join("flags/vendor_includes.txt")).unwrap();

    let err = BuildConfig::resolve(paths).unwrap_err();
    assert!(err.to_string().contains("vendor_includes.txt"));

    assert_eq!(gcc_invocations(tmp.path()), 0);
    assert!(!tmp.path().join("obj/src").exists());
    assert!(!tmp.path().join("lib/libvendor.a").exists());
}

#[test]
fn compile_failure_leaves_no_archive_behind() {
    let tmp = TempDir::new().unwrap();
    let paths = minimal_layout(tmp.path(), FAKE_GCC_FAILING);

    let config = BuildConfig::resolve(paths).unwrap();
    let build = BuildSystem::new(config, false, Logger::new()).unwrap();
    let err = build.build(Some(2)).unwrap_err();

    assert!(err.to_string().contains("Compilation failed"));
    assert!(!tmp.path().join("lib/libvendor.a").exists());
}

#[test]
fn unchanged_sources_are_not_recompiled_incrementally() {
    let tmp = TempDir::new().unwrap();
    let paths = minimal_layout(tmp.path(), FAKE_GCC);

    let config = BuildConfig::resolve(paths).unwrap();
    let build = BuildSystem::new(config, true, Logger::new()).unwrap();

    build.build(Some(2)).unwrap();
    assert_eq!(gcc_invocations(tmp.path()), 5);
    assert!(tmp.path().join("obj").join(CACHE_FILE_NAME).exists());

    // Second run: everything is cached, the archive is still rebuilt.
    build.build(Some(2)).unwrap();
    assert_eq!(gcc_invocations(tmp.path()), 5);
    assert!(tmp.path().join("lib/libvendor.a").exists());
}
