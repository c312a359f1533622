// Screenshot discovery

use crate::model::LogFile;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const FAILED_MARKER: &str = "(failed)";

/// Finds the screenshots belonging to a finished item
pub trait ScreenshotLocator: Send + Sync {
    /// Screenshot captured on failure, if any
    fn failed_screenshot(&self, title: &str) -> Option<LogFile>;

    /// Screenshots captured for the item that are not failure captures
    fn passed_screenshots(&self, title: &str) -> Vec<LogFile>;

    /// Files for screenshot names the test registered explicitly
    fn custom_screenshots(&self, names: &[String], test_file_name: Option<&str>) -> Vec<LogFile>;
}

/// Locator for runs that produce no screenshots
pub struct NoScreenshots;

impl ScreenshotLocator for NoScreenshots {
    fn failed_screenshot(&self, _title: &str) -> Option<LogFile> {
        None
    }

    fn passed_screenshots(&self, _title: &str) -> Vec<LogFile> {
        Vec::new()
    }

    fn custom_screenshots(&self, _names: &[String], _test_file_name: Option<&str>) -> Vec<LogFile> {
        Vec::new()
    }
}

/// Looks for `.png` files under a screenshots directory
pub struct FsScreenshotLocator {
    root: PathBuf,
}

impl FsScreenshotLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn pngs(&self) -> impl Iterator<Item = PathBuf> {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .flatten()
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl ScreenshotLocator for FsScreenshotLocator {
    fn failed_screenshot(&self, title: &str) -> Option<LogFile> {
        let wanted = format!("{} {}", title, FAILED_MARKER);
        self.pngs()
            .find(|path| file_stem(path) == wanted)
            .map(LogFile::png)
    }

    fn passed_screenshots(&self, title: &str) -> Vec<LogFile> {
        // An empty title would match every capture in the tree
        if title.is_empty() {
            return Vec::new();
        }
        self.pngs()
            .filter(|path| {
                let stem = file_stem(path);
                stem.contains(title) && !stem.contains(FAILED_MARKER)
            })
            .map(LogFile::png)
            .collect()
    }

    fn custom_screenshots(&self, names: &[String], test_file_name: Option<&str>) -> Vec<LogFile> {
        let spec_dir = test_file_name
            .and_then(|f| Path::new(f).file_name())
            .map(|f| self.root.join(f));

        names
            .iter()
            .filter_map(|name| {
                let file = if name.ends_with(".png") {
                    name.clone()
                } else {
                    format!("{}.png", name)
                };
                spec_dir
                    .iter()
                    .map(|dir| dir.join(&file))
                    .chain(std::iter::once(self.root.join(&file)))
                    .find(|candidate| candidate.is_file())
            })
            .map(LogFile::png)
            .collect()
    }
}
