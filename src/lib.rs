//! The library code for the `pagestamp` page generator. A build stamps a fixed
//! list of pages out of one shared template:
//!
//! 1. For each page name, read its content fragment
//!    (`_{page}.contents.html`) and the template ([`crate::render`])
//! 2. Fill the template's `%(title)s` and `%(contents)s` placeholders
//!    ([`crate::template`])
//! 3. Write the result to `{page}.html`
//!
//! [`crate::build`] runs those steps for every page in [`crate::config`],
//! halting at the first failure.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod render;
pub mod template;
