use tw_core::{CoreError, EntityId};

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Alias for `Result<T, HandlerError>`.
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Errors that can occur when reading or mutating a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The requested entity does not exist.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// A move named a destination that does not exist.
    #[error("destination not found: {0}")]
    DestinationNotFound(EntityId),

    /// A move would place an entity inside itself.
    #[error("moving {entity} into {destination} would create a containment loop")]
    WouldCreateLoop {
        /// The entity being moved.
        entity: EntityId,
        /// Where it was being moved to.
        destination: EntityId,
    },

    /// An entity with the same id already exists.
    #[error("entity already exists: {0}")]
    DuplicateEntity(EntityId),

    /// A handler needed trait data the entity does not carry.
    #[error("{entity} is not {trait_name}")]
    MissingTrait {
        /// The entity lacking the trait.
        entity: EntityId,
        /// Human-readable trait name, e.g. "openable".
        trait_name: &'static str,
    },

    /// An event payload could not be read.
    #[error(transparent)]
    InvalidEventData(#[from] CoreError),

    /// A standard handler refused to apply an event.
    #[error("{0}")]
    Rejected(String),
}

/// Errors returned by entity-level and story-level reaction handlers.
///
/// These never fail the triggering event; the processor logs them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// Free-form failure from story content.
    #[error("{0}")]
    Message(String),

    /// The handler hit a world error.
    #[error(transparent)]
    World(#[from] WorldError),

    /// The handler could not read the event it was given.
    #[error(transparent)]
    Event(#[from] CoreError),
}

impl HandlerError {
    /// Build a free-form handler error.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}
