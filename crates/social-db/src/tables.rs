//! Table adapter for global and group content
//!
//! Global and group posts live in parallel tables whose post foreign key
//! columns differ (`post_id` vs `group_post_id`). Repositories build their SQL
//! from a [`TableSet`] so one implementation serves both kinds. Every name
//! here is a compile-time constant; no caller input reaches the SQL text.

use social_core::{MediaOwner, PostKind};

/// Table and column names for one kind of post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSet {
    pub posts: &'static str,
    pub post_media: &'static str,
    pub comments: &'static str,
    pub comment_media: &'static str,
    pub reactions: &'static str,
    pub likes: &'static str,
    /// Column referencing the post from comments, post media and reactions
    pub post_fk: &'static str,
    /// Whether posts carry a `group_id` column
    pub grouped: bool,
}

const GLOBAL: TableSet = TableSet {
    posts: "posts",
    post_media: "post_media",
    comments: "comments",
    comment_media: "comment_media",
    reactions: "post_reactions",
    likes: "comment_likes",
    post_fk: "post_id",
    grouped: false,
};

const GROUP: TableSet = TableSet {
    posts: "group_posts",
    post_media: "group_post_media",
    comments: "group_comments",
    comment_media: "group_comment_media",
    reactions: "group_post_reactions",
    likes: "group_comment_likes",
    post_fk: "group_post_id",
    grouped: true,
};

impl TableSet {
    /// Resolve the tables for a post kind
    pub const fn for_kind(kind: PostKind) -> &'static TableSet {
        match kind {
            PostKind::Global => &GLOBAL,
            PostKind::Group(_) => &GROUP,
        }
    }

    /// Media table and its owner column
    pub const fn media(&self, owner: MediaOwner) -> (&'static str, &'static str) {
        match owner {
            MediaOwner::Post => (self.post_media, self.post_fk),
            MediaOwner::Comment => (self.comment_media, "comment_id"),
        }
    }

    /// Expression selecting the post's group id (NULL for global posts)
    pub const fn group_select(&self) -> &'static str {
        if self.grouped {
            "group_id"
        } else {
            "NULL::BIGINT AS group_id"
        }
    }

    /// `AND group_id = $n` for group posts; empty for global posts.
    ///
    /// Callers bind the group id only when this is non-empty.
    pub fn group_filter(&self, placeholder: usize) -> String {
        if self.grouped {
            format!(" AND group_id = ${placeholder}")
        } else {
            String::new()
        }
    }
}
