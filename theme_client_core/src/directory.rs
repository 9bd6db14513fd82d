//! Theme directory: live-theme lookup and display ordering

use crate::error::{Error, Result};
use crate::theme::Theme;
use std::cmp::Ordering;

/// Return the unique live theme of a fetched set
///
/// Zero or several themes with role `live` both mean the remote data is
/// inconsistent and yield [`Error::NoLiveTheme`].
pub fn identify_live(themes: &[Theme]) -> Result<&Theme> {
    let mut live = themes.iter().filter(|t| t.is_live());

    match (live.next(), live.next()) {
        (Some(theme), None) => Ok(theme),
        (None, _) => Err(Error::NoLiveTheme { found: 0 }),
        (Some(_), Some(_)) => Err(Error::NoLiveTheme {
            found: 2 + live.count(),
        }),
    }
}

/// Display order: the live theme first, then everything else by id
/// descending (newest first)
fn display_order(a: &Theme, b: &Theme) -> Ordering {
    b.is_live().cmp(&a.is_live()).then_with(|| b.id.cmp(&a.id))
}

/// Sort themes for display
///
/// Stable, so themes sharing an id keep their fetched order.
pub fn sort_for_display(themes: &[Theme]) -> Vec<Theme> {
    let mut sorted = themes.to_vec();
    sorted.sort_by(display_order);
    sorted
}

/// Selection menu entries: every non-live theme, newest first
///
/// This filter is a convenience only. The authoritative check is
/// [`crate::safety::verify`], applied again after the user picks.
pub fn development_themes(themes: &[Theme]) -> Vec<Theme> {
    let candidates: Vec<Theme> = themes.iter().filter(|t| !t.is_live()).cloned().collect();
    sort_for_display(&candidates)
}
