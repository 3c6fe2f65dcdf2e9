//! Playlist item ordering.

use std::cmp::Ordering;

use crate::domain::entities::{PlaylistItem, SortKey};

/// Sorts items in place by `key`.
///
/// The sort is stable. Text compares case-insensitively, track numbers
/// numerically, and items missing the field go last.
pub fn sort_items(items: &mut [PlaylistItem], key: SortKey) {
    items.sort_by(|a, b| compare_items(a, b, key));
}

/// Compares two items by `key`.
#[must_use]
pub fn compare_items(a: &PlaylistItem, b: &PlaylistItem, key: SortKey) -> Ordering {
    match key {
        SortKey::Artist => compare_text(a.artist.as_deref(), b.artist.as_deref()),
        SortKey::Album => compare_text(a.album.as_deref(), b.album.as_deref()),
        SortKey::Date => compare_text(a.date.as_deref(), b.date.as_deref()),
        SortKey::TrackNumber => missing_last(a.track_number, b.track_number),
        SortKey::Title => compare_text(Some(a.display_title()), Some(b.display_title())),
        SortKey::Path => compare_text(Some(a.url.as_str()), Some(b.url.as_str())),
    }
}

fn compare_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    let normalize = |s: &str| {
        let trimmed = s.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    };

    missing_last(a.and_then(normalize), b.and_then(normalize))
}

fn missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
