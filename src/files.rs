use std::fs;
use std::io;
use std::path::Path;

/// Creates the directory that will hold `path`.
/// Paths with an extension are treated as files and their parent is created.
pub fn with_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
    let path = path.as_ref();
    let dir = if path.extension().is_some() {
        path.parent().unwrap_or_else(|| Path::new("/"))
    } else {
        path
    };

    if dir.as_os_str().is_empty() || dir.exists() {
        return Ok(());
    }
    fs::create_dir_all(dir)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_with_dir_creates_parent() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("a/b/song.wav");
        with_dir(&target).unwrap();
        assert!(tmp.path().join("a/b").is_dir());
        assert!(!target.exists());
    }

    #[test]
    fn test_with_dir_bare_file_name() {
        assert!(with_dir("song.wav").is_ok());
    }
}
