//! Copy and move primitives for files and directory trees

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Final path component of `path`, resolving `.`-style paths first
pub(crate) fn entry_name(path: &Path) -> Result<OsString> {
    if let Some(name) = path.file_name() {
        return Ok(name.to_os_string());
    }

    let resolved = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve {:?}", path))?;
    resolved
        .file_name()
        .map(|name| name.to_os_string())
        .with_context(|| format!("{:?} has no file name", path))
}

/// Absolute form of `path` with symlinks resolved, even if its tail does not exist yet
///
/// The longest existing ancestor is canonicalized and the missing components
/// are appended to it unchanged.
pub(crate) fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .context("Failed to read current directory")?
            .join(path)
    };

    let mut existing = absolute.as_path();
    let mut missing = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => break,
        }
    }

    let mut resolved = existing
        .canonicalize()
        .with_context(|| format!("Failed to resolve {:?}", existing))?;
    for name in missing.into_iter().rev() {
        resolved.push(name);
    }
    Ok(resolved)
}

/// Copy a file or directory into `dest_dir`, keeping its name
///
/// Files overwrite an existing copy. Directories are merged into an existing
/// tree of the same name. Returns the path of the copy.
pub fn copy_into(source: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let target = dest_dir.join(entry_name(source)?);
    copy_entry(source, &target)?;
    Ok(target)
}

fn copy_entry(source: &Path, target: &Path) -> Result<()> {
    if source.is_dir() {
        copy_dir(source, target)
    } else {
        // fs::copy carries the permission bits over
        fs::copy(source, target)
            .with_context(|| format!("Failed to copy {:?} to {:?}", source, target))?;
        Ok(())
    }
}

fn copy_dir(source: &Path, target: &Path) -> Result<()> {
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", source))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("{:?} is outside {:?}", entry.path(), source))?;
        let dest = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)
                .with_context(|| format!("Failed to create directory {:?}", dest))?;
        } else {
            fs::copy(entry.path(), &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", entry.path(), dest))?;
        }
    }

    log::debug!("Copied directory tree {:?} to {:?}", source, target);
    Ok(())
}

/// Move a file or directory to `dest`
///
/// If `dest` is an existing directory the entry is moved inside it. Missing
/// parent directories are created. A rename that would cross filesystems is
/// replaced by copy-then-delete. Returns the final path of the entry.
pub fn move_path(source: &Path, dest: &Path) -> Result<PathBuf> {
    let target = if dest.is_dir() {
        dest.join(entry_name(source)?)
    } else {
        dest.to_path_buf()
    };

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
    }

    match fs::rename(source, &target) {
        Ok(()) => Ok(target),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!(
                "{:?} and {:?} are on different filesystems; copying instead",
                source,
                target
            );
            copy_then_remove(source, &target)?;
            Ok(target)
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to move {:?} to {:?}", source, target))
        }
    }
}

/// Stand-in for a rename: copy `source` to `target`, then delete `source`
///
/// A directory merges into an existing `target` directory. The source is only
/// removed once the copy has fully succeeded.
pub(crate) fn copy_then_remove(source: &Path, target: &Path) -> Result<()> {
    copy_entry(source, target)?;
    remove_entry(source)
}

fn remove_entry(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
    .with_context(|| format!("Failed to remove {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_file_into_directory() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("out.bin");
        fs::write(&source, [1u8, 2, 3]).unwrap();
        let dest_dir = temp.path().join("staging");
        fs::create_dir(&dest_dir).unwrap();

        let copied = copy_into(&source, &dest_dir).unwrap();

        assert_eq!(copied, dest_dir.join("out.bin"));
        assert_eq!(fs::read(&copied).unwrap(), vec![1, 2, 3]);
        assert!(source.exists());
    }

    #[test]
    fn test_copy_file_overwrites() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("out.bin");
        fs::write(&source, b"new").unwrap();
        let dest_dir = temp.path().join("staging");
        fs::create_dir(&dest_dir).unwrap();
        fs::write(dest_dir.join("out.bin"), b"old contents").unwrap();

        copy_into(&source, &dest_dir).unwrap();

        assert_eq!(fs::read(dest_dir.join("out.bin")).unwrap(), b"new");
    }

    #[test]
    fn test_copy_directory_recursively() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("reports");
        fs::create_dir_all(source.join("nested/deeper")).unwrap();
        fs::write(source.join("top.txt"), b"top").unwrap();
        fs::write(source.join("nested/deeper/leaf.txt"), b"leaf").unwrap();
        fs::create_dir(source.join("empty")).unwrap();
        let dest_dir = temp.path().join("staging");
        fs::create_dir(&dest_dir).unwrap();

        let copied = copy_into(&source, &dest_dir).unwrap();

        assert_eq!(copied, dest_dir.join("reports"));
        assert_eq!(fs::read(copied.join("top.txt")).unwrap(), b"top");
        assert_eq!(fs::read(copied.join("nested/deeper/leaf.txt")).unwrap(), b"leaf");
        assert!(copied.join("empty").is_dir());
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let result = copy_into(&temp.path().join("nope"), temp.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_move_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("out.bin");
        fs::write(&source, [9u8]).unwrap();
        let dest = temp.path().join("a/b/out.bin");

        let moved = move_path(&source, &dest).unwrap();

        assert_eq!(moved, dest);
        assert!(!source.exists());
        assert_eq!(fs::read(&dest).unwrap(), vec![9]);
    }

    #[test]
    fn test_move_into_existing_directory() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("out.bin");
        fs::write(&source, b"x").unwrap();
        let dest = temp.path().join("inbox");
        fs::create_dir(&dest).unwrap();

        let moved = move_path(&source, &dest).unwrap();

        assert_eq!(moved, dest.join("out.bin"));
        assert!(moved.is_file());
        assert!(!source.exists());
    }

    #[test]
    fn test_move_overwrites_file() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src.txt");
        let dest = temp.path().join("dst.txt");
        fs::write(&source, b"fresh").unwrap();
        fs::write(&dest, b"stale").unwrap();

        move_path(&source, &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"fresh");
        assert!(!source.exists());
    }

    #[test]
    fn test_move_directory() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("tree");
        fs::create_dir_all(source.join("sub")).unwrap();
        fs::write(source.join("sub/f.txt"), b"f").unwrap();
        let dest = temp.path().join("elsewhere/tree");

        move_path(&source, &dest).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read(dest.join("sub/f.txt")).unwrap(), b"f");
    }

    #[test]
    fn test_copy_then_remove_file() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("out.bin");
        fs::write(&source, [0u8, 1, 254, 255]).unwrap();
        let target = temp.path().join("moved.bin");

        copy_then_remove(&source, &target).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read(&target).unwrap(), vec![0, 1, 254, 255]);
    }

    #[test]
    fn test_copy_then_remove_tree() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("tree");
        fs::create_dir_all(source.join("a/b")).unwrap();
        fs::write(source.join("root.txt"), b"root").unwrap();
        fs::write(source.join("a/b/leaf.bin"), [7u8; 64]).unwrap();
        let target = temp.path().join("other/tree");

        copy_then_remove(&source, &target).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read(target.join("root.txt")).unwrap(), b"root");
        assert_eq!(fs::read(target.join("a/b/leaf.bin")).unwrap(), vec![7u8; 64]);
    }

    #[test]
    fn test_copy_then_remove_merges_into_existing_directory() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("tree");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("new.txt"), b"new").unwrap();
        fs::write(source.join("shared.txt"), b"from source").unwrap();
        let target = temp.path().join("existing");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("kept.txt"), b"kept").unwrap();
        fs::write(target.join("shared.txt"), b"stale").unwrap();

        copy_then_remove(&source, &target).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read(target.join("new.txt")).unwrap(), b"new");
        assert_eq!(fs::read(target.join("shared.txt")).unwrap(), b"from source");
        assert_eq!(fs::read(target.join("kept.txt")).unwrap(), b"kept");
    }

    #[test]
    fn test_copy_then_remove_keeps_source_on_failure() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("out.bin");
        fs::write(&source, b"x").unwrap();
        let target = temp.path().join("dir-in-the-way");
        fs::create_dir(&target).unwrap();

        assert!(copy_then_remove(&source, &target).is_err());
        assert!(source.exists());
    }

    #[test]
    fn test_resolve_path_with_missing_tail() {
        let temp = TempDir::new().unwrap();
        let base = temp.path().canonicalize().unwrap();

        let resolved = resolve_path(&temp.path().join("not/yet/here")).unwrap();

        assert_eq!(resolved, base.join("not/yet/here"));
    }
}
