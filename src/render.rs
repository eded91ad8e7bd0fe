//! Renders a single page: reads the page's content fragment and the shared
//! template, fills the template's `title` and `contents` placeholders, and
//! writes the result next to the fragment.

use crate::template::{self, Mapping};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The files involved in rendering one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePaths {
    /// `{directory}/_{page_name}.contents.html`
    pub contents: PathBuf,

    /// `{directory}/{page_name}.html`
    pub output: PathBuf,
}

impl PagePaths {
    /// Derives the content fragment and output paths for `page_name`.
    pub fn new(directory: &Path, page_name: &str) -> PagePaths {
        PagePaths {
            contents: directory.join(format!("_{}.contents.html", page_name)),
            output: directory.join(format!("{}.html", page_name)),
        }
    }
}

/// Renders `page_name` against the template at `template_path` (relative to
/// `directory`) and writes `{directory}/{page_name}.html`, overwriting any
/// existing file. Nothing is written unless both inputs are read and the
/// template renders.
pub fn render_page(directory: &Path, template_path: &Path, page_name: &str) -> Result<()> {
    let paths = PagePaths::new(directory, page_name);
    let template_path = directory.join(template_path);
    debug!(
        page = page_name,
        contents = %paths.contents.display(),
        template = %template_path.display(),
        output = %paths.output.display(),
        "resolved page paths"
    );

    let contents = std::fs::read_to_string(&paths.contents).map_err(|err| Error::ReadContents {
        path: paths.contents.clone(),
        err,
    })?;
    let template = std::fs::read_to_string(&template_path).map_err(|err| Error::ReadTemplate {
        path: template_path.clone(),
        err,
    })?;

    let mut mapping = Mapping::new();
    mapping.insert("title", page_name);
    mapping.insert("contents", &contents);
    let rendered = template::substitute(&template, &mapping).map_err(|err| Error::Template {
        path: template_path.clone(),
        err,
    })?;

    std::fs::write(&paths.output, rendered).map_err(|err| Error::WriteOutput {
        path: paths.output,
        err,
    })
}

/// The result of a fallible page-rendering operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error rendering a page.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems reading the template file.
    ReadTemplate { path: PathBuf, err: io::Error },

    /// Returned for I/O problems reading a page's content fragment.
    ReadContents { path: PathBuf, err: io::Error },

    /// Returned for I/O problems writing the output page.
    WriteOutput { path: PathBuf, err: io::Error },

    /// Returned when the template is malformed or references an unknown
    /// placeholder.
    Template { path: PathBuf, err: template::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ReadTemplate { path, err } => {
                write!(f, "Reading template file '{}': {}", path.display(), err)
            }
            Error::ReadContents { path, err } => {
                write!(f, "Reading content fragment '{}': {}", path.display(), err)
            }
            Error::WriteOutput { path, err } => {
                write!(f, "Writing page '{}': {}", path.display(), err)
            }
            Error::Template { path, err } => {
                write!(f, "Rendering template '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ReadTemplate { path: _, err } => Some(err),
            Error::ReadContents { path: _, err } => Some(err),
            Error::WriteOutput { path: _, err } => Some(err),
            Error::Template { path: _, err } => Some(err),
        }
    }
}
