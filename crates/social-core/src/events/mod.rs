//! Domain events

mod domain_event;

pub use domain_event::{
    CommentCreatedEvent, CommentDeletedEvent, CommentUpdatedEvent, DomainEvent, DomainEventKind,
    PostDeletedEvent,
};
