//! Local puzzle input files

use crate::cli::InputSource;
use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Directory of puzzle inputs
///
/// Layout: `{dir}/{year}_day{day:02}.txt` for the personal input and
/// `{dir}/{year}_day{day:02}_example.txt` for the worked example.
pub struct InputStore {
    dir: PathBuf,
}

impl InputStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the input file for a year/day
    pub fn path(&self, year: u16, day: u8, source: InputSource) -> PathBuf {
        let suffix = match source {
            InputSource::User => "",
            InputSource::Example => "_example",
        };
        self.dir.join(format!("{}_day{:02}{}.txt", year, day, suffix))
    }

    /// Check if the input file exists
    pub fn contains(&self, year: u16, day: u8, source: InputSource) -> bool {
        self.path(year, day, source).is_file()
    }

    /// Read an input file
    pub fn read(&self, year: u16, day: u8, source: InputSource) -> Result<String, InputError> {
        let path = self.path(year, day, source);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::NotFound(path),
            _ => InputError::Io { path, source },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_path_format() {
        let store = InputStore::new(PathBuf::from("/inputs"));
        assert_eq!(
            store.path(2023, 7, InputSource::User),
            PathBuf::from("/inputs/2023_day07.txt")
        );
        assert_eq!(
            store.path(2023, 17, InputSource::Example),
            PathBuf::from("/inputs/2023_day17_example.txt")
        );
    }

    #[test]
    fn test_read_existing_input() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("2023_day16_example.txt"), ".|.\n...").unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(store.contains(2023, 16, InputSource::Example));
        assert!(!store.contains(2023, 16, InputSource::User));
        assert_eq!(
            store.read(2023, 16, InputSource::Example).unwrap(),
            ".|.\n..."
        );
    }

    #[test]
    fn test_missing_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        match store.read(2023, 21, InputSource::User) {
            Err(InputError::NotFound(path)) => assert!(path.ends_with("2023_day21.txt")),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_is_not_an_input() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("2023_day10.txt")).unwrap();
        let store = InputStore::new(temp.path().to_path_buf());

        assert!(!store.contains(2023, 10, InputSource::User));
        assert!(matches!(
            store.read(2023, 10, InputSource::User),
            Err(InputError::Io { .. })
        ));
    }
}
