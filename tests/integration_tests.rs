use pardu::aggregate::flatten;
use pardu::classify::classify;
use pardu::thread_pool::WorkerPool;
use pardu::{Detail, ScanConfig, scan_paths};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use walkdir::WalkDir;

fn write_bytes(path: &Path, len: usize) {
    fs::write(path, vec![b'x'; len]).expect("Failed to write file");
}

/// Builds a tree `depth` levels deep with `fan_out` files and subdirectories per level.
fn create_test_directory_structure(dir: &Path, depth: usize, fan_out: usize) {
    for i in 0..fan_out {
        write_bytes(&dir.join(format!("file_{}.txt", i)), 17 * (i + 1) + depth);
    }
    if depth == 0 {
        return;
    }
    for i in 0..fan_out {
        let subdir = dir.join(format!("subdir_{}", i));
        fs::create_dir(&subdir).expect("Failed to create subdir");
        create_test_directory_structure(&subdir, depth - 1, fan_out);
    }
}

/// Independent reference: apparent size of every regular file below `root`.
fn walkdir_total(root: &Path) -> u64 {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.metadata().expect("Failed to read metadata").len())
        .sum()
}

#[test]
fn test_file_and_nested_dir_scenario() {
    // temp/
    // ├── a      (100 bytes)
    // └── b/
    //     └── c  (50 bytes)
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    write_bytes(&root.join("a"), 100);
    fs::create_dir(root.join("b")).expect("Failed to create b");
    write_bytes(&root.join("b").join("c"), 50);

    let report = scan_paths(&[root], &ScanConfig::with_workers(4)).expect("Scan failed");
    assert!(report.failures.is_empty());
    assert_eq!(report.roots.len(), 1);

    let tree = &report.roots[0];
    assert_eq!(tree.size(), 150);
    assert_eq!(report.total(), 150);

    let b = tree
        .children()
        .iter()
        .find(|child| child.path() == root.join("b"))
        .expect("b not found");
    assert_eq!(b.size(), 50);

    let entries = flatten(tree, Detail::Full);
    let sizes: Vec<_> = entries
        .iter()
        .map(|e| (e.path.strip_prefix(root).unwrap().to_path_buf(), e.size))
        .collect();
    assert_eq!(
        sizes,
        vec![
            (Path::new("a").to_path_buf(), 100),
            (Path::new("b/c").to_path_buf(), 50),
            (Path::new("b").to_path_buf(), 50),
            (Path::new("").to_path_buf(), 150),
        ]
    );
}

#[test]
fn test_empty_directory_is_zero() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let report = scan_paths(&[temp_dir.path()], &ScanConfig::default()).expect("Scan failed");

    assert!(report.failures.is_empty());
    assert_eq!(report.roots.len(), 1);
    assert_eq!(report.total(), 0);
    assert!(report.roots[0].children().is_empty());
}

#[test]
fn test_single_file_root() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let file = temp_dir.path().join("only.bin");
    write_bytes(&file, 1234);

    let report = scan_paths(&[&file], &ScanConfig::with_workers(2)).expect("Scan failed");
    assert_eq!(report.total(), 1234);
    assert!(!report.roots[0].is_dir());
}

#[test]
fn test_worker_count_does_not_change_totals() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    create_test_directory_structure(root, 4, 4);
    let expected = walkdir_total(root);

    for workers in [1, 2, 3, 8, 32] {
        let report = scan_paths(&[root], &ScanConfig::with_workers(workers)).expect("Scan failed");
        assert_eq!(report.total(), expected, "workers = {}", workers);
    }
}

#[test]
fn test_single_worker_counts_every_job() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    create_test_directory_structure(temp_dir.path(), 2, 3);

    let report =
        scan_paths(&[temp_dir.path()], &ScanConfig::with_workers(1)).expect("Scan failed");
    // 1 root + 3 files/3 dirs per expanded level + 3 files per leaf dir
    assert_eq!(report.stats.jobs(), 1 + 6 * 4 + 3 * 9);
    assert_eq!(report.stats.omitted, 0);
}

#[test]
fn test_deep_chain_terminates() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut dir = temp_dir.path().to_path_buf();
    for _ in 0..200 {
        dir = dir.join("d");
        fs::create_dir(&dir).expect("Failed to create chain dir");
        write_bytes(&dir.join("f"), 3);
    }

    for workers in [1, 4] {
        let report =
            scan_paths(&[temp_dir.path()], &ScanConfig::with_workers(workers)).expect("Scan failed");
        assert_eq!(report.total(), 600);
    }
}

/// Path length to build up to, just under the 4096-byte Linux limit.
#[cfg(target_os = "linux")]
const PATH_BUDGET: usize = 4000;

#[cfg(target_os = "linux")]
#[test]
fn test_chain_near_path_length_limit_terminates() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut dir = temp_dir.path().to_path_buf();
    let mut depth = 0u64;
    while dir.as_os_str().len() + "/d/f".len() <= PATH_BUDGET {
        dir = dir.join("d");
        fs::create_dir(&dir).expect("Failed to create chain dir");
        write_bytes(&dir.join("f"), 1);
        depth += 1;
    }
    assert!(depth > 1000, "depth = {}", depth);

    for workers in [1, 4] {
        let report =
            scan_paths(&[temp_dir.path()], &ScanConfig::with_workers(workers)).expect("Scan failed");
        assert!(report.failures.is_empty());
        assert_eq!(report.total(), depth, "workers = {}", workers);
        assert_eq!(report.stats.omitted, 0);
        assert_eq!(
            flatten(&report.roots[0], Detail::Full).len() as u64,
            2 * depth + 1
        );
    }
}

#[cfg(target_os = "linux")]
#[test]
fn test_entry_past_path_length_limit_is_omitted() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let staging = temp_dir.path().join("staging");
    fs::create_dir(&staging).unwrap();
    write_bytes(&staging.join("short"), 7);
    write_bytes(&staging.join("n".repeat(250)), 5);

    // move the directory deep enough that only its long-named entry
    // crosses the limit: listing works, reading that entry's metadata fails
    let mut parent = temp_dir.path().join("deep");
    while parent.as_os_str().len() < PATH_BUDGET - 100 {
        parent = parent.join("d");
    }
    fs::create_dir_all(&parent).expect("Failed to create chain");
    fs::rename(&staging, parent.join("s")).expect("Failed to move staging dir");

    let report =
        scan_paths(&[temp_dir.path()], &ScanConfig::with_workers(2)).expect("Scan failed");
    assert!(report.failures.is_empty());
    assert_eq!(report.total(), 7);
    assert_eq!(report.stats.omitted, 1);
}

#[test]
fn test_wide_fan_out_terminates() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for i in 0..2000 {
        write_bytes(&temp_dir.path().join(format!("f{:04}", i)), 2);
    }

    let report =
        scan_paths(&[temp_dir.path()], &ScanConfig::with_workers(4)).expect("Scan failed");
    assert_eq!(report.total(), 4000);
    assert_eq!(report.roots[0].children().len(), 2000);
}

#[test]
fn test_counter_is_zero_after_join() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    create_test_directory_structure(temp_dir.path(), 3, 3);

    let pool = WorkerPool::new(&ScanConfig::with_workers(3)).expect("Failed to start pool");
    let root = Arc::new(classify(temp_dir.path()).unwrap().unwrap());
    pool.dispatcher().enqueue(Arc::clone(&root));
    pool.dispatcher().join();

    assert_eq!(pool.dispatcher().tracker().outstanding(), 0);
    assert_eq!(root.size(), walkdir_total(temp_dir.path()));
    pool.join();
}

#[test]
fn test_root_failure_does_not_block_siblings() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let good = temp_dir.path().join("good");
    fs::create_dir(&good).expect("Failed to create good");
    write_bytes(&good.join("x"), 10);
    let missing = temp_dir.path().join("missing");

    let report =
        scan_paths(&[missing.clone(), good.clone()], &ScanConfig::default()).expect("Scan failed");

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].kind(), "not_found");
    assert_eq!(report.failures[0].path(), Some(missing.as_path()));
    assert_eq!(report.roots.len(), 1);
    assert_eq!(report.roots[0].path(), good);
    assert_eq!(report.total(), 10);
}

#[test]
fn test_multiple_roots_total() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let one = temp_dir.path().join("one");
    let two = temp_dir.path().join("two");
    fs::create_dir(&one).unwrap();
    fs::create_dir(&two).unwrap();
    write_bytes(&one.join("a"), 300);
    write_bytes(&two.join("b"), 700);

    let report = scan_paths(&[one, two], &ScanConfig::default()).expect("Scan failed");
    assert_eq!(report.roots.len(), 2);
    assert_eq!(report.roots[0].size(), 300);
    assert_eq!(report.roots[1].size(), 700);
    assert_eq!(report.total(), 1000);
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_excluded() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().join("root");
    let outside = temp_dir.path().join("outside");
    fs::create_dir(&root).unwrap();
    fs::create_dir(&outside).unwrap();
    write_bytes(&root.join("real"), 40);
    write_bytes(&outside.join("big"), 5000);
    std::os::unix::fs::symlink(outside.join("big"), root.join("file_link")).unwrap();
    std::os::unix::fs::symlink(&outside, root.join("dir_link")).unwrap();

    let report = scan_paths(&[&root], &ScanConfig::default()).expect("Scan failed");
    assert_eq!(report.total(), 40);
    assert_eq!(report.roots[0].children().len(), 1);

    // a symlink root is skipped without an error
    let report =
        scan_paths(&[root.join("dir_link")], &ScanConfig::default()).expect("Scan failed");
    assert!(report.roots.is_empty());
    assert!(report.failures.is_empty());
    assert_eq!(report.total(), 0);
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_left_out() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    write_bytes(&root.join("visible"), 120);
    fs::create_dir(root.join("open")).unwrap();
    write_bytes(&root.join("open").join("inner"), 80);
    let locked = root.join("locked");
    fs::create_dir(&locked).unwrap();
    write_bytes(&locked.join("hidden"), 1000);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // running as root ignores permission bits; nothing to test then
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let report = scan_paths(&[root], &ScanConfig::with_workers(2)).expect("Scan failed");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(report.failures.is_empty());
    assert_eq!(report.total(), 200);
    let locked_node = report.roots[0]
        .children()
        .iter()
        .find(|child| child.path() == locked)
        .expect("locked dir should still be listed");
    assert_eq!(locked_node.size(), 0);
}

#[test]
fn test_matches_walkdir_on_mixed_tree() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    create_test_directory_structure(root, 3, 5);
    fs::create_dir_all(root.join("empty/also_empty")).unwrap();

    let report = scan_paths(&[root], &ScanConfig::default()).expect("Scan failed");
    assert_eq!(report.total(), walkdir_total(root));

    let entries = flatten(&report.roots[0], Detail::Full);
    let walked = WalkDir::new(root).into_iter().filter_map(|e| e.ok()).count();
    assert_eq!(entries.len(), walked);
}
