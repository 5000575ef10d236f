//! Model to entity mappers
//!
//! - `From<Model> for Entity` where the row carries everything the entity needs
//! - `into_*(kind)` where the post kind comes from the query, not the row

mod comment;
mod group;
mod media;
mod post;
mod reaction;
mod user;
