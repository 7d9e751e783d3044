//! Search-as-you-type suggestions

use inkdex_core::{Catalog, RecordId, RecordKind};
use serde::{Deserialize, Serialize};

/// Queries shorter than this produce no suggestions
pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// A single completion offered to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,

    #[serde(rename = "type")]
    pub kind: RecordKind,

    pub id: RecordId,
}

/// Suggestions for a partial query
///
/// Candidates are gathered artists first, then studios, then styles (exact
/// name matches ahead of substring matches within each group) and cut to
/// `limit`. The kept suggestions are then returned in alphabetical order of
/// their text, not in relevance order.
pub fn suggestions(catalog: &Catalog, query: &str, limit: usize) -> Vec<Suggestion> {
    let needle = query.trim().to_lowercase();
    if needle.chars().count() < MIN_SUGGESTION_QUERY_LEN {
        return Vec::new();
    }

    let mut candidates: Vec<Suggestion> = Vec::new();

    let artists = catalog
        .artists
        .iter()
        .map(|a| (a.name.as_str(), a.id.clone(), false));
    push_group(&mut candidates, artists, RecordKind::Artist, &needle);

    let studios = catalog
        .studios
        .iter()
        .map(|s| (s.name.as_str(), s.id.clone(), false));
    push_group(&mut candidates, studios, RecordKind::Studio, &needle);

    let styles = catalog.styles.iter().map(|s| {
        let alias_hit = s.aliases.iter().any(|a| a.to_lowercase().contains(&needle));
        (s.name.as_str(), s.id.clone(), alias_hit)
    });
    push_group(&mut candidates, styles, RecordKind::Style, &needle);

    candidates.truncate(limit);
    candidates.sort_by(|a, b| {
        a.text
            .to_lowercase()
            .cmp(&b.text.to_lowercase())
            .then_with(|| a.text.cmp(&b.text))
    });
    candidates
}

/// Append one group's matches, exact names first
fn push_group<'a>(
    out: &mut Vec<Suggestion>,
    entries: impl Iterator<Item = (&'a str, RecordId, bool)>,
    kind: RecordKind,
    needle: &str,
) {
    let mut exact = Vec::new();
    let mut partial = Vec::new();

    for (name, id, extra_hit) in entries {
        let lowered = name.to_lowercase();
        if lowered == needle {
            exact.push((name, id));
        } else if lowered.contains(needle) || extra_hit {
            partial.push((name, id));
        }
    }

    for (name, id) in exact.into_iter().chain(partial) {
        if out.iter().any(|s| s.kind == kind && s.text == name) {
            continue;
        }
        out.push(Suggestion {
            text: name.to_string(),
            kind,
            id,
        });
    }
}
