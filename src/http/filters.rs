#![allow(clippy::unnecessary_wraps)]

use askama::Result;
use std::fmt::Display;

/// Render loosely structured text as HTML
/// The output is already escaped, so templates must pipe it through `safe`.
pub fn richtext<T: Display>(text: T) -> Result<String> {
    Ok(crate::richtext::render(&text.to_string()))
}
