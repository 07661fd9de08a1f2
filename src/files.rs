//! File collection the decoder consults to attach file handles to decoded
//! file references. Absence of a collection is fine; references then stay
//! path-only.

use std::rc::Rc;

use hashbrown::HashMap;

/// Cheap handle to a file known to the surrounding build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    path: Rc<str>,
}

impl FileHandle {
    pub fn new(path: impl Into<Rc<str>>) -> Self {
        FileHandle { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

pub trait FileCollection {
    fn find(&self, path: &str) -> Option<FileHandle>;
}

/// Map-backed collection for callers that assemble their inputs up front.
#[derive(Debug, Default)]
pub struct InMemoryFileCollection {
    files: HashMap<String, FileHandle>,
}

impl InMemoryFileCollection {
    pub fn new() -> Self {
        InMemoryFileCollection::default()
    }

    pub fn insert(&mut self, path: &str) -> FileHandle {
        self.files
            .entry(path.to_owned())
            .or_insert_with(|| FileHandle::new(path))
            .clone()
    }
}

impl FileCollection for InMemoryFileCollection {
    fn find(&self, path: &str) -> Option<FileHandle> {
        self.files.get(path).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_inserted_files() {
        let mut files = InMemoryFileCollection::new();
        let handle = files.insert("res/drawable/icon.png");

        let found = files.find("res/drawable/icon.png").unwrap();
        assert_eq!(found, handle);
        assert_eq!(found.path(), "res/drawable/icon.png");
        assert!(files.find("res/drawable/missing.png").is_none());
    }
}
