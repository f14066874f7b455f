//! Compiled-in descriptors for every relation a work participates in.
//!
//! Table and column names are interpolated into SQL text, so they must never
//! come from request data. The only way to name a relation is through these
//! closed enums, whose accessors return `&'static str` literals.

/// Owner column shared by every work join table.
pub const WORK_COLUMN: &str = "work_id";

/// Identity column on every linking table, increasing in insertion order.
pub const LINK_ORDER_COLUMN: &str = "link_order";

/// A pure linking relation: the join row is the relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkRelation {
    Skills,
    Profiles,
    Events,
}

impl WorkRelation {
    pub const ALL: [WorkRelation; 3] = [Self::Skills, Self::Profiles, Self::Events];

    pub fn table(self) -> &'static str {
        match self {
            Self::Skills => "work_skills",
            Self::Profiles => "work_profiles",
            Self::Events => "work_events",
        }
    }

    pub fn owner_column(self) -> &'static str {
        WORK_COLUMN
    }

    pub fn related_column(self) -> &'static str {
        match self {
            Self::Skills => "skill_id",
            Self::Profiles => "profile_id",
            Self::Events => "event_id",
        }
    }
}

/// A media entity whose rows are owned by the work that links them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnedMedia {
    Images,
    DiagramImages,
}

impl OwnedMedia {
    pub const ALL: [OwnedMedia; 2] = [Self::Images, Self::DiagramImages];

    pub fn entity_table(self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::DiagramImages => "diagram_images",
        }
    }

    pub fn join_table(self) -> &'static str {
        match self {
            Self::Images => "work_images",
            Self::DiagramImages => "work_diagram_images",
        }
    }

    pub fn join_related_column(self) -> &'static str {
        match self {
            Self::Images => "image_id",
            Self::DiagramImages => "diagram_image_id",
        }
    }
}
