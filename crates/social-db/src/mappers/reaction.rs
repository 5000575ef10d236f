//! Reaction entity <-> model mapper

use social_core::entities::{LikeSummary, Reaction};
use social_core::value_objects::{PostKind, Snowflake};

use crate::models::{LikeSummaryModel, ReactionModel};

impl ReactionModel {
    /// Convert a row read from the reaction table of `kind`
    pub fn into_reaction(self, kind: PostKind) -> Reaction {
        Reaction {
            kind,
            post_id: Snowflake::new(self.post_id),
            user_id: Snowflake::new(self.user_id),
            emoji: self.emoji,
            updated_at: self.updated_at,
        }
    }
}

impl From<LikeSummaryModel> for LikeSummary {
    fn from(model: LikeSummaryModel) -> Self {
        LikeSummary {
            comment_id: Snowflake::new(model.comment_id),
            count: model.count,
            me: model.me,
        }
    }
}
