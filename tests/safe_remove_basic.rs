use assert_fs::prelude::*;
use build_cleanup::{safe_remove_tree, RemoveOptions};
use std::fs;
use std::path::Path;

fn make_readonly(p: &Path) {
    let mut perms = fs::metadata(p).unwrap().permissions();
    perms.set_readonly(true);
    fs::set_permissions(p, perms).unwrap();
}

#[test]
fn missing_path_is_success_and_idempotent() {
    let temp = assert_fs::TempDir::new().unwrap();
    let ghost = temp.child("never-built");
    let opts = RemoveOptions::strict();

    assert!(safe_remove_tree(ghost.path(), &opts).unwrap());
    assert!(safe_remove_tree(ghost.path(), &opts).unwrap());
    assert!(temp.path().exists(), "parent must be untouched");
}

#[test]
fn removes_nested_build_tree_twice_in_a_row() {
    let temp = assert_fs::TempDir::new().unwrap();
    let build = temp.child("zlib-build");
    build.child("CMakeFiles/zlib.dir/adler32.c.o").write_str("obj").unwrap();
    build.child("lib/libz.a").write_str("ar").unwrap();
    build.child("include/zconf.h").write_str("#define Z").unwrap();
    build.child("empty/dir").create_dir_all().unwrap();

    assert!(safe_remove_tree(build.path(), &RemoveOptions::default()).unwrap());
    assert!(!build.path().exists());
    assert!(safe_remove_tree(build.path(), &RemoveOptions::default()).unwrap());
}

#[test]
fn readonly_files_do_not_block_removal() {
    let temp = assert_fs::TempDir::new().unwrap();
    let build = temp.child("boost-build");
    let a = build.child("stage/lib/libboost_system.a");
    let b = build.child("bin.v2/config.log");
    a.write_str("ar").unwrap();
    b.write_str("log").unwrap();
    make_readonly(a.path());
    make_readonly(b.path());

    let opts = RemoveOptions::strict();
    assert!(safe_remove_tree(build.path(), &opts).unwrap());
    assert!(!build.path().exists());
}

#[test]
fn vcs_checkout_inside_build_dir_is_removed() {
    let temp = assert_fs::TempDir::new().unwrap();
    let build = temp.child("luajit");
    let pack = build.child(".git/objects/pack/pack-1.pack");
    pack.write_str("pack").unwrap();
    make_readonly(pack.path());
    build.child("src/lj_api.c").write_str("c").unwrap();

    assert!(safe_remove_tree(build.path(), &RemoveOptions::strict()).unwrap());
    assert!(!build.path().exists());
}

#[test]
fn single_file_target_is_removed() {
    let temp = assert_fs::TempDir::new().unwrap();
    let log = temp.child("build.log");
    log.write_str("done").unwrap();
    assert!(safe_remove_tree(log.path(), &RemoveOptions::default()).unwrap());
    assert!(!log.path().exists());
}

#[test]
fn dry_run_leaves_tree_in_place() {
    let temp = assert_fs::TempDir::new().unwrap();
    let build = temp.child("icu-build");
    build.child("data/out/icudt.dat").write_str("dat").unwrap();
    let opts = RemoveOptions {
        dry_run: true,
        ..RemoveOptions::default()
    };
    assert!(safe_remove_tree(build.path(), &opts).unwrap());
    assert!(build.child("data/out/icudt.dat").path().exists());
}

#[cfg(unix)]
#[test]
fn symlink_target_is_unlinked_not_followed() {
    let temp = assert_fs::TempDir::new().unwrap();
    let keep = temp.child("install");
    keep.child("lib/libpng.so").write_str("so").unwrap();
    let link = temp.child("build-link");
    std::os::unix::fs::symlink(keep.path(), link.path()).unwrap();

    assert!(safe_remove_tree(link.path(), &RemoveOptions::strict()).unwrap());
    assert!(fs::symlink_metadata(link.path()).is_err());
    assert!(keep.child("lib/libpng.so").path().exists(), "link target must survive");
}
