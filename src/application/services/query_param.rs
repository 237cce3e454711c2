//! Reads and rewrites the deep-link query parameter of the page URL.

use url::Url;

use crate::domain::entities::AttachmentId;

/// Default name of the query parameter holding the open attachment id.
pub const DEFAULT_QUERY_PARAM: &str = "glightbox";

/// Raw value of `name` in the query string of `location`.
#[must_use]
pub fn read_param(location: &str, name: &str) -> Option<String> {
    let url = Url::parse(location).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Attachment id named by `name` in `location`, if it parses as one.
#[must_use]
pub fn read_attachment_param(location: &str, name: &str) -> Option<AttachmentId> {
    read_param(location, name)?.parse().ok()
}

/// Returns `location` with `name` set to `id`, or removed when `id` is `None`.
///
/// Other query pairs keep their order. Unparseable locations are returned
/// unchanged.
#[must_use]
pub fn with_attachment_param(location: &str, name: &str, id: Option<AttachmentId>) -> String {
    let Ok(mut url) = Url::parse(location) else {
        return location.to_string();
    };

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != name)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if let Some(id) = id {
        pairs.push((name.to_string(), id.to_string()));
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    url.to_string()
}
