use std::cmp::Ordering;

use crate::domain::{Contribution, Person};

/// Orders the store can list people in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeopleOrder {
    /// Ascending by name under Spanish-aware collation (aggregate report).
    #[default]
    NameAsc,
    /// Newest registrations first (admin roster).
    CreatedDesc,
}

/// Builds a primary collation key: case-insensitive, accents folded onto their
/// base letter, and `ñ` placed after every other `n` sequence.
pub fn collation_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    for ch in name.trim().chars().flat_map(char::to_lowercase) {
        match ch {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => key.push('a'),
            'é' | 'è' | 'ê' | 'ë' => key.push('e'),
            'í' | 'ì' | 'î' | 'ï' => key.push('i'),
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' => key.push('o'),
            'ú' | 'ù' | 'û' | 'ü' => key.push('u'),
            'ç' => key.push('c'),
            'ñ' => key.push_str("n\u{10FFFF}"),
            other => key.push(other),
        }
    }
    key
}

/// Locale-aware name comparison; ties fall back to the raw text so that
/// differently-accented names still get a deterministic order.
pub fn compare_names(left: &str, right: &str) -> Ordering {
    collation_key(left)
        .cmp(&collation_key(right))
        .then_with(|| left.cmp(right))
}

pub fn sort_people(people: &mut [Person], order: PeopleOrder) {
    match order {
        PeopleOrder::NameAsc => people.sort_by(|a, b| compare_names(&a.name, &b.name)),
        PeopleOrder::CreatedDesc => people.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

/// Most recent period first.
pub fn sort_history(history: &mut [Contribution]) {
    history.sort_by(|a, b| b.period.cmp(&a.period));
}
