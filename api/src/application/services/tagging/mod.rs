use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::domain::notes::tag::TagToken;

// lowercase v4 text form: version nibble 4, variant 8|9|a|b (either case)
static UUID_V4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-f0-9]{8}-[a-f0-9]{4}-4[a-f0-9]{3}-[89aAbB][a-f0-9]{3}-[a-f0-9]{12}$")
        .expect("static uuid pattern")
});

impl TagToken {
    pub fn classify(raw: &str) -> Self {
        let id = if UUID_V4_RE.is_match(raw) {
            Uuid::parse_str(raw).ok()
        } else {
            None
        };
        TagToken {
            raw: raw.to_string(),
            id,
        }
    }
}

/// Lookup keys for a batch of tokens: ids from the UUID-shaped ones, names
/// from all of them. Duplicates are collapsed, first occurrence wins.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TagLookup {
    pub ids: Vec<Uuid>,
    pub names: Vec<String>,
}

pub fn partition_tokens(raw: &[String]) -> TagLookup {
    let mut lookup = TagLookup::default();
    for token in raw.iter().map(|t| TagToken::classify(t)) {
        if let Some(id) = token.id {
            if !lookup.ids.contains(&id) {
                lookup.ids.push(id);
            }
        }
        if !lookup.names.contains(&token.raw) {
            lookup.names.push(token.raw);
        }
    }
    lookup
}
