//! CLI integration tests for Ballast.
//!
//! These tests exercise source-set resolution and flag synthesis through
//! the CLI. No compiler is required; `ballast build` is only checked for
//! argument validation.

use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

/// Get the ballast binary command.
fn ballast() -> Command {
    Command::cargo_bin("ballast").unwrap()
}

// ============================================================================
// ballast sources
// ============================================================================

#[test]
fn test_sources_excludes_filesystem_on_wasi() {
    ballast()
        .args(["sources", "--target", "wasi", "--library", "c++"])
        .assert()
        .success()
        .stdout(predicate::str::contains("filesystem/").not())
        .stdout(predicate::str::contains("string.cpp"));
}

#[test]
fn test_sources_includes_filesystem_on_linux() {
    ballast()
        .args(["sources", "--target", "linux-gnu", "--library", "c++"])
        .assert()
        .success()
        .stdout(predicate::str::contains("filesystem/path.cpp"));
}

#[test]
fn test_sources_platform_subtrees() {
    ballast()
        .args(["sources", "--target", "linux-gnu", "--library", "c++"])
        .assert()
        .success()
        .stdout(predicate::str::contains("support/win32").not())
        .stdout(predicate::str::contains("support/ibm").not());

    ballast()
        .args(["sources", "--target", "windows-gnu", "--library", "c++"])
        .assert()
        .success()
        .stdout(predicate::str::contains("support/win32/locale_win32.cpp"));
}

#[test]
fn test_sources_single_threaded() {
    ballast()
        .args([
            "sources",
            "--target",
            "linux-gnu",
            "--single-threaded",
            "--library",
            "c++",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("  thread.cpp").not())
        .stdout(predicate::str::contains("shared_mutex.cpp"));
}

#[test]
fn test_sources_abi_library_on_wasi() {
    ballast()
        .args(["sources", "--target", "wasi", "--library", "c++abi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cxa_exception.cpp").not())
        .stdout(predicate::str::contains("cxa_personality.cpp").not())
        .stdout(predicate::str::contains("cxa_demangle.cpp"));
}

#[test]
fn test_sources_lists_both_libraries_by_default() {
    ballast()
        .args(["sources", "--target", "linux-gnu"])
        .assert()
        .success()
        .stdout(predicate::str::contains("c++abi sources"))
        .stdout(predicate::str::contains("cxa_virtual.cpp"))
        .stdout(predicate::str::contains("iostream.cpp"));
}

#[test]
fn test_sources_rejects_unknown_target() {
    ballast()
        .args(["sources", "--target", "plan9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown operating system"));
}

// ============================================================================
// ballast flags
// ============================================================================

#[test]
fn test_flags_contain_abi_macros() {
    ballast()
        .args(["flags", "--target", "linux-gnu", "--library", "c++"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-D_LIBCPP_ABI_VERSION=1"))
        .stdout(predicate::str::contains("-D_LIBCPP_ABI_NAMESPACE=__1"))
        .stdout(predicate::str::contains("-D_LIBCPP_BUILDING_LIBRARY"));
}

#[test]
fn test_flags_abi_version_two() {
    ballast()
        .args([
            "flags",
            "--target",
            "linux-gnu",
            "--abi-version",
            "2",
            "--library",
            "c++abi",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("-D_LIBCPP_ABI_VERSION=2"))
        .stdout(predicate::str::contains("-D_LIBCPP_ABI_NAMESPACE=__2"))
        .stdout(predicate::str::contains("-D_LIBCXXABI_BUILDING_LIBRARY"));
}

#[test]
fn test_flags_install_root_is_cache_exempt() {
    ballast()
        .args([
            "flags",
            "--target",
            "linux-gnu",
            "--install-root",
            "/opt/toolchain",
            "--library",
            "c++",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "-I/opt/toolchain/include/c++/v1    # cache-exempt",
        ))
        .stdout(predicate::str::contains(
            "-I/opt/toolchain/libcxx/src    # cache-exempt",
        ));
}

#[test]
fn test_flags_musl_macro() {
    ballast()
        .args(["flags", "--target", "linux-musl", "--library", "c++"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-D_LIBCPP_HAS_MUSL_LIBC"));
}

#[test]
fn test_flags_single_threaded_macro() {
    ballast()
        .args([
            "flags",
            "--target",
            "linux-gnu",
            "--single-threaded",
            "--library",
            "c++abi",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("-D_LIBCPP_HAS_NO_THREADS"));
}

#[test]
fn test_flags_json_output() {
    let output = ballast()
        .args([
            "flags",
            "--target",
            "linux-gnu",
            "--library",
            "c++",
            "--json",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let units: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let first = &units.as_array().unwrap()[0];
    assert!(first.get("cache_flags").is_some());
    assert!(first.get("exempt_flags").is_some());
}

#[test]
fn test_flags_rejects_bad_abi_version() {
    ballast()
        .args(["flags", "--target", "linux-gnu", "--abi-version", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown ABI version"));
}

// ============================================================================
// ballast build
// ============================================================================

#[test]
fn test_build_requires_install_root() {
    ballast().args(["build"]).assert().failure();
}
