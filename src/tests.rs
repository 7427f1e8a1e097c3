/*!
 * End-to-end tests for digestfs ingestion
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use tempfile::{tempdir, TempDir};

use crate::config::{IngestConfig, PatternMode};
use crate::error::DigestError;
use crate::ingest::{ingest, ingest_async};
use crate::serialize;

// Helper function to create a test directory structure
fn setup_test_directory() -> io::Result<TempDir> {
    let temp_dir = tempdir()?;

    fs::create_dir(temp_dir.path().join("dir1"))?;
    fs::create_dir(temp_dir.path().join("dir1").join("subdir"))?;

    let mut file1 = File::create(temp_dir.path().join("file1.txt"))?;
    writeln!(file1, "This is a text file with content")?;

    let mut file2 = File::create(temp_dir.path().join("dir1").join("file2.txt"))?;
    writeln!(file2, "This is another text file\nwith multiple lines")?;

    let mut file3 = File::create(
        temp_dir
            .path()
            .join("dir1")
            .join("subdir")
            .join("file3.txt"),
    )?;
    writeln!(file3, "Nested file content")?;

    // Version-control metadata, excluded by default
    fs::create_dir(temp_dir.path().join(".git"))?;
    let mut git_file = File::create(temp_dir.path().join(".git").join("config"))?;
    writeln!(git_file, "[core]\n\trepositoryformatversion = 0")?;

    // A binary file
    let mut bin_file = File::create(temp_dir.path().join("binary.bin"))?;
    bin_file.write_all(&[0u8, 1u8, 2u8, 3u8])?;

    Ok(temp_dir)
}

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(content.as_bytes())
}

#[test]
fn test_basic_ingest() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let digest = ingest(temp_dir.path(), &IngestConfig::default()).unwrap();

    // Tree shows the full structure, with defaults marked excluded
    assert!(digest.tree_text.starts_with("Directory structure:\n"));
    assert!(digest.tree_text.contains("file1.txt"));
    assert!(digest.tree_text.contains("dir1/"));
    assert!(digest.tree_text.contains(".git/ (excluded)"));

    // Content carries only readable, included text files
    assert!(digest.content_text.contains("FILE: file1.txt"));
    assert!(digest.content_text.contains("This is a text file with content"));
    assert!(digest.content_text.contains("FILE: dir1/subdir/file3.txt"));
    assert!(!digest.content_text.contains("repositoryformatversion"));

    // Binary file is counted as skipped, not emitted
    assert!(!digest.content_text.contains("FILE: binary.bin"));
    assert_eq!(digest.summary.file_count, 3);
    assert_eq!(digest.summary.truncated_file_count, 1);
    assert_eq!(digest.summary.dir_count, 3);
    assert!(digest.summary.token_count > 0);

    Ok(())
}

#[test]
fn test_exclude_mode_example() -> io::Result<()> {
    let temp_dir = tempdir()?;
    write_file(&temp_dir.path().join("a.txt"), "hello")?;
    write_file(&temp_dir.path().join("b.log"), "log")?;

    let config = IngestConfig {
        max_file_size_bytes: 1000,
        pattern_mode: PatternMode::Exclude,
        patterns: vec!["*.log".to_string()],
    };
    let digest = ingest(temp_dir.path(), &config).unwrap();

    assert!(digest.tree_text.contains("a.txt"));
    assert!(digest.tree_text.contains("b.log (excluded)"));
    assert!(digest.content_text.contains("FILE: a.txt"));
    assert!(digest.content_text.contains("hello"));
    assert!(!digest.content_text.contains("FILE: b.log"));
    assert_eq!(digest.summary.file_count, 1);
    assert_eq!(digest.summary.truncated_file_count, 0);
    assert_eq!(digest.summary.total_size_bytes, 5);

    Ok(())
}

#[test]
fn test_include_mode() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;

    let config = IngestConfig {
        pattern_mode: PatternMode::Include,
        patterns: vec!["*.txt".to_string()],
        ..IngestConfig::default()
    };
    let digest = ingest(temp_dir.path(), &config).unwrap();

    assert!(digest.content_text.contains("FILE: file1.txt"));
    assert!(digest.content_text.contains("FILE: dir1/file2.txt"));
    assert!(!digest.content_text.contains("binary.bin"));
    assert!(digest.tree_text.contains("binary.bin (excluded)"));
    assert_eq!(digest.summary.file_count, 3);

    Ok(())
}

#[test]
fn test_size_cap_skips_whole_file() -> io::Result<()> {
    let temp_dir = tempdir()?;
    write_file(&temp_dir.path().join("big.txt"), &"x".repeat(2000))?;
    write_file(&temp_dir.path().join("small.txt"), "ok")?;

    let config = IngestConfig {
        max_file_size_bytes: 1000,
        ..IngestConfig::default()
    };
    let digest = ingest(temp_dir.path(), &config).unwrap();

    // Oversized file appears in the tree but never mid-truncated in content
    assert!(digest.tree_text.contains("big.txt"));
    assert!(!digest.content_text.contains("FILE: big.txt"));
    assert!(digest.content_text.contains("FILE: small.txt"));
    assert_eq!(digest.summary.truncated_file_count, 1);
    assert_eq!(digest.summary.file_count, 1);
    assert!(digest.summary.total_size_bytes <= 1000);

    Ok(())
}

#[test]
fn test_determinism() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = IngestConfig::default();

    let first = ingest(temp_dir.path(), &config).unwrap();
    let second = ingest(temp_dir.path(), &config).unwrap();

    assert_eq!(first.tree_text, second.tree_text);
    assert_eq!(first.content_text, second.content_text);
    assert_eq!(first.summary, second.summary);

    Ok(())
}

#[test]
fn test_exclusion_monotonicity() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;

    let base = ingest(temp_dir.path(), &IngestConfig::default()).unwrap();

    let config = IngestConfig {
        patterns: vec!["*.txt".to_string()],
        ..IngestConfig::default()
    };
    let narrowed = ingest(temp_dir.path(), &config).unwrap();

    assert!(narrowed.summary.file_count <= base.summary.file_count);
    assert!(narrowed.summary.total_size_bytes <= base.summary.total_size_bytes);

    Ok(())
}

#[test]
fn test_root_immunity() -> io::Result<()> {
    let temp_dir = tempdir()?;
    write_file(&temp_dir.path().join("a.txt"), "hello")?;

    let root_name = temp_dir
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    let config = IngestConfig {
        patterns: vec![root_name, "**".to_string()],
        ..IngestConfig::default()
    };
    let digest = ingest(temp_dir.path(), &config).unwrap();

    // Every child may be excluded, but the root itself never is
    assert!(digest.tree_text.contains("Directory structure:\n└── "));
    assert!(!digest.tree_text.lines().nth(1).unwrap().contains("(excluded)"));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlink_outside_root_contributes_no_bytes() -> io::Result<()> {
    let outside = tempdir()?;
    write_file(&outside.path().join("secret.txt"), "TOP-SECRET-PAYLOAD")?;

    let temp_dir = tempdir()?;
    write_file(&temp_dir.path().join("a.txt"), "hello")?;
    std::os::unix::fs::symlink(
        outside.path().join("secret.txt"),
        temp_dir.path().join("escape.txt"),
    )?;

    let digest = ingest(temp_dir.path(), &IngestConfig::default()).unwrap();

    assert!(digest.tree_text.contains("escape.txt -> "));
    assert!(!digest.content_text.contains("TOP-SECRET-PAYLOAD"));

    Ok(())
}

#[test]
fn test_invalid_root() {
    let err = ingest(Path::new("/definitely/not/here"), &IngestConfig::default());
    assert!(matches!(err, Err(DigestError::InvalidRoot(_))));
}

#[test]
fn test_pattern_syntax_error_surfaces_before_traversal() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let config = IngestConfig {
        patterns: vec!["../..".to_string()],
        ..IngestConfig::default()
    };
    let err = ingest(temp_dir.path(), &config);
    assert!(matches!(err, Err(DigestError::PatternSyntax { .. })));
    Ok(())
}

#[test]
fn test_glob_with_spaces_excludes_matching_directory() -> io::Result<()> {
    let temp_dir = tempdir()?;
    fs::create_dir(temp_dir.path().join("My Documents"))?;
    write_file(
        &temp_dir.path().join("My Documents").join("notes.txt"),
        "private",
    )?;
    write_file(&temp_dir.path().join("a.txt"), "hello")?;

    let config = IngestConfig {
        patterns: vec!["My Documents/".to_string()],
        ..IngestConfig::default()
    };
    let digest = ingest(temp_dir.path(), &config).unwrap();

    assert!(digest.tree_text.contains("My Documents/ (excluded)"));
    assert!(!digest.content_text.contains("private"));
    assert_eq!(digest.summary.file_count, 1);

    Ok(())
}

#[test]
fn test_empty_directory_yields_complete_digest() -> io::Result<()> {
    let temp_dir = tempdir()?;
    let digest = ingest(temp_dir.path(), &IngestConfig::default()).unwrap();

    assert!(digest.tree_text.starts_with("Directory structure:\n└── "));
    assert!(digest.content_text.is_empty());
    assert_eq!(digest.summary.file_count, 0);
    assert_eq!(digest.summary.token_count, 0);

    Ok(())
}

#[test]
fn test_async_wrapper_matches_blocking_call() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = IngestConfig::default();

    let blocking = ingest(temp_dir.path(), &config).unwrap();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let non_blocking = runtime
        .block_on(ingest_async(temp_dir.path().to_path_buf(), config))
        .unwrap();

    assert_eq!(blocking.tree_text, non_blocking.tree_text);
    assert_eq!(blocking.content_text, non_blocking.content_text);
    assert_eq!(blocking.summary, non_blocking.summary);

    Ok(())
}

#[test]
fn test_text_render_leads_with_directory_header() -> io::Result<()> {
    let temp_dir = tempdir()?;
    write_file(&temp_dir.path().join("a.txt"), "hello")?;

    let digest = ingest(temp_dir.path(), &IngestConfig::default()).unwrap();
    let text = serialize::to_text(&digest);

    let resolved = fs::canonicalize(temp_dir.path())?;
    assert!(text.starts_with(&format!("Directory: {}\n", resolved.display())));
    assert!(text.contains("Files analyzed: 1\n"));
    assert!(text.contains("Estimated tokens: "));

    Ok(())
}

#[test]
fn test_json_download_format() -> io::Result<()> {
    let temp_dir = tempdir()?;
    write_file(&temp_dir.path().join("a.txt"), "hello")?;

    let digest = ingest(temp_dir.path(), &IngestConfig::default()).unwrap();
    let json = serialize::render(&digest, serialize::DownloadFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["summary"]["file_count"], 1);
    assert!(value["content_text"]
        .as_str()
        .unwrap()
        .contains("hello"));

    Ok(())
}
