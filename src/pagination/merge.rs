//! Page merge policy

use super::types::{Accumulator, Page};
use crate::types::{JsonObject, JsonValue};
use tracing::warn;

/// Fold `page` into `acc`.
///
/// - List accumulator: the page's records are appended in order.
/// - Envelope accumulator, per field of the page:
///   - field not yet present: adopted verbatim
///   - present and a nested object: left as the first page had it
///   - present and a list: extended with the page's value (a list is
///     spliced in, anything else is pushed as one element)
///   - present and a scalar: left as the first page had it
///
/// Fields missing from `page` are untouched. Never fails: a page whose shape
/// differs from the accumulator is folded in as well as it can be.
pub fn merge(mut acc: Accumulator, page: Page) -> Accumulator {
    let (data, pages) = acc.parts_mut();
    match (data, page) {
        (Page::Sequence(items), Page::Sequence(more)) => items.extend(more),
        (Page::Envelope(fields), Page::Envelope(more)) => merge_fields(fields, more),
        (Page::Sequence(items), Page::Envelope(obj)) => {
            warn!("object page merged into list result as a single record");
            items.push(JsonValue::Object(obj));
        }
        (Page::Envelope(_), Page::Sequence(more)) => {
            warn!("dropping list page of {} records: result is an object", more.len());
        }
    }
    *pages += 1;
    acc
}

fn merge_fields(fields: &mut JsonObject, more: JsonObject) {
    for (key, value) in more {
        match fields.get_mut(&key) {
            None => {
                fields.insert(key, value);
            }
            Some(JsonValue::Array(existing)) => match value {
                JsonValue::Array(items) => existing.extend(items),
                single => existing.push(single),
            },
            // Nested objects (links, meta) and scalars keep their first-page value
            Some(_) => {}
        }
    }
}
