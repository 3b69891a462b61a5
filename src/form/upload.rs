/// Selected photos and their validation
///
/// The selection list lives here rather than in the native picker, so
/// files can be added across several picks and removed one at a time.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default size cap for a single photo (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Media types accepted by default
pub const DEFAULT_ALLOWED_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];

/// What a photo must satisfy to be accepted
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_file_size: u64,
    pub allowed_types: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl UploadLimits {
    /// A file passes when its declared type is allowed and it fits the size cap
    pub fn validate_file(&self, file: &FileInfo) -> bool {
        self.check_file(file).is_ok()
    }

    /// Same as `validate_file`, naming the first rule the file breaks
    pub fn check_file(&self, file: &FileInfo) -> Result<(), RejectReason> {
        if !self.allowed_types.iter().any(|t| t == &file.media_type) {
            return Err(RejectReason::Type);
        }
        if file.size > self.max_file_size {
            return Err(RejectReason::TooLarge);
        }
        Ok(())
    }
}

/// Which rule a refused file broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Declared media type not in the allow-list
    Type,
    /// Bigger than the size cap
    TooLarge,
}

/// A file as reported by the picker, before it joins the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub path: PathBuf,
    /// Declared media type, e.g. `image/png`
    pub media_type: String,
    /// Size in bytes
    pub size: u64,
}

/// An entry of the selection list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Unique for the lifetime of the selection; tags thumbnail jobs
    pub id: u64,
    pub info: FileInfo,
}

/// A file refused by validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub name: String,
    pub reason: RejectReason,
}

impl Rejection {
    /// Text of the alert shown to the user
    pub fn message(&self) -> String {
        let detail = match self.reason {
            RejectReason::Type => "only JPEG and PNG images are accepted",
            RejectReason::TooLarge => "the file is too large",
        };
        format!("File {} does not meet the requirements: {}", self.name, detail)
    }
}

/// Ordered list of selected photos
#[derive(Debug, Default)]
pub struct FileSelection {
    files: Vec<SelectedFile>,
    /// Paths the native picker last reported
    retained_input: Vec<PathBuf>,
    next_id: u64,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add newly picked files, returning the ones refused by `limits`
    ///
    /// Accepted files are appended in pick order; every accepted file gets
    /// a fresh id.
    pub fn on_files_selected(
        &mut self,
        picked: Vec<FileInfo>,
        limits: &UploadLimits,
    ) -> (Vec<SelectedFile>, Vec<Rejection>) {
        self.retained_input = picked.iter().map(|file| file.path.clone()).collect();

        let mut added = Vec::new();
        let mut rejected = Vec::new();
        for info in picked {
            if let Err(reason) = limits.check_file(&info) {
                rejected.push(Rejection { name: info.name, reason });
                continue;
            }

            let file = SelectedFile { id: self.next_id, info };
            self.next_id += 1;
            self.files.push(file.clone());
            added.push(file);
        }

        (added, rejected)
    }

    /// Remove the entry at `index`; out-of-range indices are ignored
    ///
    /// Emptying the list also drops whatever the native input retained.
    pub fn remove(&mut self, index: usize) -> Option<SelectedFile> {
        if index >= self.files.len() {
            return None;
        }

        let removed = self.files.remove(index);
        if self.files.is_empty() {
            self.retained_input.clear();
        }
        Some(removed)
    }

    /// Empty the list and the native input value
    pub fn clear(&mut self) {
        self.files.clear();
        self.retained_input.clear();
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn first(&self) -> Option<&SelectedFile> {
        self.files.first()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Drives the "has files" styling of the upload wrapper
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.files.iter().any(|file| file.id == id)
    }

    /// What the native file input still holds
    pub fn retained_input(&self) -> &[PathBuf] {
        &self.retained_input
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn file(name: &str, media_type: &str, size: u64) -> FileInfo {
        FileInfo {
            name: name.to_string(),
            path: PathBuf::from("/photos").join(name),
            media_type: media_type.to_string(),
            size,
        }
    }

    fn names(selection: &FileSelection) -> Vec<&str> {
        selection.files().iter().map(|f| f.info.name.as_str()).collect()
    }

    #[test]
    fn test_validate_file_types() {
        let limits = UploadLimits::default();
        assert!(limits.validate_file(&file("a.jpg", "image/jpeg", 100)));
        assert!(limits.validate_file(&file("a.jpg", "image/jpg", 100)));
        assert!(limits.validate_file(&file("a.png", "image/png", 100)));
        assert!(!limits.validate_file(&file("a.gif", "image/gif", 100)));
        assert!(!limits.validate_file(&file("a.pdf", "application/pdf", 100)));
        assert!(!limits.validate_file(&file("a", "", 0)));
    }

    #[test]
    fn test_validate_file_size_boundary() {
        let limits = UploadLimits::default();
        let cap = 10 * 1024 * 1024;
        assert!(limits.validate_file(&file("a.png", "image/png", cap)));
        assert!(!limits.validate_file(&file("a.png", "image/png", cap + 1)));
        assert!(!limits.validate_file(&file("a.gif", "image/gif", cap)));
    }

    #[test]
    fn test_selection_accumulates_and_rejects() {
        let limits = UploadLimits::default();
        let mut selection = FileSelection::new();

        let (added, rejected) = selection.on_files_selected(
            vec![file("one.jpg", "image/jpeg", 10), file("doc.pdf", "application/pdf", 10)],
            &limits,
        );
        assert_eq!(added.len(), 1);
        assert_eq!(
            rejected,
            vec![Rejection { name: "doc.pdf".to_string(), reason: RejectReason::Type }]
        );
        assert_eq!(
            rejected[0].message(),
            "File doc.pdf does not meet the requirements: only JPEG and PNG images are accepted"
        );

        selection.on_files_selected(vec![file("two.png", "image/png", 10)], &limits);
        assert_eq!(names(&selection), vec!["one.jpg", "two.png"]);
        assert!(selection.has_files());
    }

    #[test]
    fn test_rejection_names_the_broken_rule() {
        let limits = UploadLimits::default();
        let mut selection = FileSelection::new();

        let (_, rejected) = selection.on_files_selected(
            vec![
                file("huge.png", "image/png", DEFAULT_MAX_FILE_SIZE + 1),
                file("anim.gif", "image/gif", DEFAULT_MAX_FILE_SIZE + 1),
            ],
            &limits,
        );

        let reasons: Vec<_> = rejected.iter().map(|r| r.reason).collect();
        assert_eq!(reasons, vec![RejectReason::TooLarge, RejectReason::Type]);
        assert!(rejected[0].message().contains("too large"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let limits = UploadLimits::default();
        let mut selection = FileSelection::new();
        selection.on_files_selected(vec![file("a.jpg", "image/jpeg", 1)], &limits);
        selection.remove(0);
        let (added, _) = selection.on_files_selected(vec![file("a.jpg", "image/jpeg", 1)], &limits);
        assert_eq!(added[0].id, 1);
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let limits = UploadLimits::default();
        let picked: Vec<FileInfo> = ["a.jpg", "b.jpg", "c.jpg", "d.jpg"]
            .iter()
            .map(|name| file(name, "image/jpeg", 1))
            .collect();

        for index in 0..4 {
            let mut selection = FileSelection::new();
            selection.on_files_selected(picked.clone(), &limits);
            let removed = selection.remove(index).unwrap();

            let mut expected = vec!["a.jpg", "b.jpg", "c.jpg", "d.jpg"];
            expected.remove(index);
            assert_eq!(names(&selection), expected);
            assert!(!selection.contains(removed.id));
        }
    }

    #[test]
    fn test_remove_last_resets_input() {
        let limits = UploadLimits::default();
        let mut selection = FileSelection::new();
        selection.on_files_selected(vec![file("a.jpg", "image/jpeg", 1)], &limits);
        assert_eq!(selection.retained_input().len(), 1);

        assert!(selection.remove(3).is_none());
        assert!(selection.has_files());

        selection.remove(0);
        assert!(!selection.has_files());
        assert!(selection.retained_input().is_empty());
    }
}
