//! Field projections.

use bson::{Bson, Document};

/// Build a driver projection including each of `keys`.
///
/// # Examples
///
/// ```
/// use zbot_database::projection_document;
///
/// let projection = projection_document(["message", "channel_id"]);
/// assert_eq!(projection.get_i32("message").unwrap(), 1);
/// assert_eq!(projection.len(), 2);
/// ```
pub fn projection_document<I, S>(keys: I) -> Document
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keys.into_iter()
        .map(|key| (key.as_ref().to_string(), Bson::Int32(1)))
        .collect()
}

/// Drop every field of `document` that is not in `keys`.
///
/// The driver always returns `_id` unless excluded, so loads reduce the
/// returned documents again on the client side.
pub fn retain_fields<S: AsRef<str>>(mut document: Document, keys: &[S]) -> Document {
    let drop: Vec<String> = document
        .keys()
        .filter(|k| !keys.iter().any(|wanted| wanted.as_ref() == k.as_str()))
        .cloned()
        .collect();
    for key in drop {
        document.remove(&key);
    }
    document
}
