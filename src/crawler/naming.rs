//! Crawler naming convention
//!
//! A crawler type `T` lives at `<search location>/<lower(T)>_crawler` and is exported
//! as `<Capitalize(T)>Crawler`. The registry uses this as its only addressing scheme.

use std::fmt;

/// Suffix carried by every crawler class name
pub const CLASS_SUFFIX: &str = "Crawler";

/// Suffix carried by every crawler module name
pub const MODULE_SUFFIX: &str = "_crawler";

/// Capitalizes a word: first character upper-case, the rest lower-case
///
/// # Example
///
/// ```
/// use vectara_ingest::crawler::capitalize;
///
/// assert_eq!(capitalize("website"), "Website");
/// assert_eq!(capitalize("HUBSPOT"), "Hubspot");
/// ```
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Module path and class name derived from a crawler identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PluginPath {
    /// e.g. `crawlers/website_crawler`
    pub module: String,
    /// e.g. `WebsiteCrawler`
    pub class: String,
}

impl PluginPath {
    /// Derives the path from a class-style identifier such as `WebsiteCrawler`
    ///
    /// A trailing `Crawler` (any casing) is stripped and re-appended in canonical
    /// casing, so `WebsiteCrawler`, `websitecrawler` and `website` all agree.
    pub fn from_identifier(search_location: &str, identifier: &str) -> Self {
        let stem = strip_class_suffix(identifier);
        let stem = capitalize(stem);

        Self {
            module: format!(
                "{}/{}{}",
                search_location.trim_end_matches('/'),
                stem.to_lowercase(),
                MODULE_SUFFIX
            ),
            class: format!("{}{}", stem, CLASS_SUFFIX),
        }
    }

    /// Derives the path for a configured crawler type such as `website`
    pub fn for_crawler_type(search_location: &str, crawler_type: &str) -> Self {
        Self::from_identifier(
            search_location,
            &format!("{}{}", capitalize(crawler_type), CLASS_SUFFIX),
        )
    }
}

impl fmt::Display for PluginPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.class)
    }
}

fn strip_class_suffix(identifier: &str) -> &str {
    let split = identifier.len().saturating_sub(CLASS_SUFFIX.len());
    match identifier.get(split..) {
        Some(tail) if split > 0 && tail.eq_ignore_ascii_case(CLASS_SUFFIX) => &identifier[..split],
        _ => identifier,
    }
}
