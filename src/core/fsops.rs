//! Filesystem mutation primitives for faro.
//!
//! Thin, guarded wrappers over std::fs used by the register and the view
//! controller: every destination is checked for a name conflict before any
//! write, and the error carries the offending name so the prompt can be
//! retried.

use std::fs;
use std::io;
use std::path::Path;

use crate::core::error::OpError;

fn exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Creates an empty file, failing when the name is taken.
pub fn new_file(path: &Path) -> Result<(), OpError> {
    if exists(path) {
        return Err(OpError::AlreadyExists(display_name(path)));
    }
    fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map(|_| ())
        .map_err(OpError::from)
}

/// Creates a single directory, failing when the name is taken.
pub fn new_dir(path: &Path) -> Result<(), OpError> {
    if exists(path) {
        return Err(OpError::AlreadyExists(display_name(path)));
    }
    fs::create_dir(path).map_err(OpError::from)
}

/// Renames `old` to `new`. Also the implementation of a move-paste; a rename
/// across filesystem boundaries is reported verbatim.
pub fn rename(old: &Path, new: &Path) -> Result<(), OpError> {
    if !exists(old) {
        return Err(OpError::NotFound(display_name(old)));
    }
    if exists(new) {
        return Err(OpError::AlreadyExists(display_name(new)));
    }
    fs::rename(old, new).map_err(OpError::from)
}

/// Removes a file, or a directory with everything under it.
pub fn remove(path: &Path) -> Result<(), OpError> {
    if !exists(path) {
        return Err(OpError::NotFound(display_name(path)));
    }
    let res = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    res.map_err(OpError::from)
}

/// Copies a file or a whole directory tree to `dest`, failing up front when
/// `dest` already exists.
pub fn copy_any(src: &Path, dest: &Path) -> Result<(), OpError> {
    if !exists(src) {
        return Err(OpError::NotFound(display_name(src)));
    }
    if exists(dest) {
        return Err(OpError::AlreadyExists(display_name(dest)));
    }
    copy_recursive(src, dest).map_err(OpError::from)
}

fn copy_recursive(src: &Path, dest: &Path) -> io::Result<()> {
    if src.is_dir() {
        fs::create_dir_all(dest)?;
        for entry in fs::read_dir(src)? {
            let entry = entry?;
            copy_recursive(&entry.path(), &dest.join(entry.file_name()))?;
        }
    } else {
        fs::copy(src, dest)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn create_file_then_conflict() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        let target = tmp.path().join("new.txt");

        new_file(&target)?;
        assert!(target.exists());

        match new_file(&target) {
            Err(OpError::AlreadyExists(name)) => assert_eq!(name, "new.txt"),
            other => panic!("expected AlreadyExists, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn create_dir_then_conflict() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        let target = tmp.path().join("sub");

        new_dir(&target)?;
        assert!(target.is_dir());
        assert!(matches!(new_dir(&target), Err(OpError::AlreadyExists(_))));
        Ok(())
    }

    #[test]
    fn rename_guards() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        let a = tmp.path().join("a.txt");
        let b = tmp.path().join("b.txt");
        File::create(&a)?;

        assert!(matches!(
            rename(&tmp.path().join("ghost"), &b),
            Err(OpError::NotFound(_))
        ));

        rename(&a, &b)?;
        assert!(!a.exists());
        assert!(b.exists());

        File::create(&a)?;
        assert!(matches!(rename(&a, &b), Err(OpError::AlreadyExists(_))));
        Ok(())
    }

    #[test]
    fn remove_file_and_dir_tree() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        let dir = tmp.path().join("nest");
        fs::create_dir_all(dir.join("deep"))?;
        File::create(dir.join("deep").join("x.txt"))?;

        remove(&dir)?;
        assert!(!dir.exists());
        assert!(matches!(remove(&dir), Err(OpError::NotFound(_))));
        Ok(())
    }

    #[test]
    fn copy_tree_recursively() -> Result<(), Box<dyn std::error::Error>> {
        let tmp = tempdir()?;
        let src = tmp.path().join("src");
        fs::create_dir_all(src.join("inner"))?;
        let mut f = File::create(src.join("inner").join("data.txt"))?;
        writeln!(f, "payload")?;

        let dest = tmp.path().join("dest");
        copy_any(&src, &dest)?;
        assert!(dest.join("inner").join("data.txt").exists());

        // existing destination aborts before writing anything
        assert!(matches!(
            copy_any(&src, &dest),
            Err(OpError::AlreadyExists(_))
        ));
        Ok(())
    }
}
