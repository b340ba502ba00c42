use crate::EntityKind;

/// How a field of a summary/detail entity is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldRule {
    /// Always part of the summary: read whatever representation is at hand.
    Summary,
    /// Only part of the detail, fetched when the entity is a summary.
    Detail,
    /// Only part of the detail, stored under another property.
    DetailRenamed(&'static str),
    /// Read directly, `[]` when absent.
    DefaultEmptyList,
    /// Summaries carry `directors`, details carry them among `contributions`.
    Directors,
    /// The detail `contributions`, narrowed by the `type` argument.
    Contributions,
    /// Meaningful on summaries only, always `null` on details.
    SummaryOnly,
}

impl FieldRule {
    pub fn of(kind: EntityKind, field: &str) -> FieldRule {
        match (kind, field) {
            (EntityKind::Film, "alternativeNames") => FieldRule::DefaultEmptyList,
            (EntityKind::Film, "directors") => FieldRule::Directors,
            (EntityKind::Film, "contributions") => FieldRule::Contributions,
            (
                EntityKind::Film,
                "backdropFocalPoint" | "description" | "tagline" | "genres" | "trailer" | "backdrop",
            ) => FieldRule::Detail,

            (EntityKind::List, "tags") => FieldRule::DetailRenamed("tags2"),
            (
                EntityKind::List,
                "hasEntriesWithNotes" | "links" | "canShareOn" | "sharedOn" | "whenCreated" | "whenPublished",
            ) => FieldRule::Detail,

            (
                EntityKind::Member,
                "backdrop" | "bio" | "bioLbml" | "location" | "website" | "twitterUsername" | "favoriteFilms"
                | "pinnedReviews" | "links",
            ) => FieldRule::Detail,

            (EntityKind::Contributor, "characterName") => FieldRule::SummaryOnly,
            (EntityKind::Contributor, "statistics" | "links") => FieldRule::Detail,

            _ => FieldRule::Summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlisted_fields_are_summary_fields() {
        assert_eq!(FieldRule::Summary, FieldRule::of(EntityKind::Film, "name"));
        assert_eq!(FieldRule::Summary, FieldRule::of(EntityKind::Member, "username"));
        assert_eq!(FieldRule::Summary, FieldRule::of(EntityKind::Contributor, "name"));
    }

    #[test]
    fn sentinels_are_detail_fields() {
        assert_eq!(FieldRule::Detail, FieldRule::of(EntityKind::Film, "trailer"));
        assert_eq!(FieldRule::Detail, FieldRule::of(EntityKind::List, "links"));
        assert_eq!(FieldRule::Detail, FieldRule::of(EntityKind::Member, "links"));
        assert_eq!(FieldRule::Detail, FieldRule::of(EntityKind::Contributor, "links"));
    }

    #[test]
    fn film_links_are_in_summaries() {
        assert_eq!(FieldRule::Summary, FieldRule::of(EntityKind::Film, "links"));
    }
}
