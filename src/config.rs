//! The fixed configuration for a build: which template to use, which pages
//! to stamp, and the directory both are resolved in.

use std::path::{Path, PathBuf};

/// The template shared by every page, relative to the build directory.
pub const TEMPLATE_FILE: &str = "_template.html";

/// The pages stamped by a build, in the order they're written.
pub const PAGES: &[&str] = &[
    "index",
    "Features",
    "Download",
    "Roadmap",
    "codecompletion",
    "codecompletionsnapshots",
    "contentassist",
    "refactoring",
    "Faq",
    "Credits",
    "codecoverage",
    "run",
    "debug",
    "debug_prefs",
    "editor_prefs",
    "pylint",
    "pychecker",
    "tasks",
];

/// Where a build reads its inputs and which pages it stamps.
#[derive(Debug, Clone)]
pub struct Config {
    /// The directory holding the template and content fragments. Output
    /// pages are written here too.
    pub directory: PathBuf,

    /// The template path, relative to `directory`.
    pub template: PathBuf,

    /// The page names to stamp.
    pub pages: Vec<String>,
}

impl Config {
    /// Builds the configuration for `directory` with the fixed template and
    /// page list.
    pub fn new(directory: &Path) -> Config {
        Config {
            directory: directory.to_owned(),
            template: PathBuf::from(TEMPLATE_FILE),
            pages: PAGES.iter().map(|page| (*page).to_owned()).collect(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(Path::new("."))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(PathBuf::from("."), config.directory);
        assert_eq!(PathBuf::from("_template.html"), config.template);
        assert_eq!(18, config.pages.len());
        assert_eq!(Some("index"), config.pages.first().map(String::as_str));
        assert_eq!(Some("tasks"), config.pages.last().map(String::as_str));
    }
}
