//! Exports the [`build_site`] function which stamps every configured page
//! ([`crate::render`]) in order, stopping at the first page that fails.

use crate::config::Config;
use crate::render::{render_page, Error as RenderError};
use std::fmt;
use tracing::info;

/// Builds the site from a [`Config`] object. Pages are rendered one at a
/// time in configuration order; pages written before a failure are left in
/// place.
pub fn build_site(config: &Config) -> Result<()> {
    for page in &config.pages {
        render_page(&config.directory, &config.template, page).map_err(|err| Error::Page {
            page: page.clone(),
            err,
        })?;
        info!(page = page.as_str(), "wrote page");
    }
    info!(pages = config.pages.len(), "build complete");
    Ok(())
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site.
#[derive(Debug)]
pub enum Error {
    /// Returned when rendering a page fails; `page` names the page.
    Page { page: String, err: RenderError },
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Page { page, err } => write!(f, "Building page `{}`: {}", page, err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Page { page: _, err } => Some(err),
        }
    }
}
