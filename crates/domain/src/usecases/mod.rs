//! Application use cases / business logic

pub mod batch;
pub mod collection;
pub mod listing;
pub mod naming;
pub mod publish;

pub use batch::BatchPublishUseCase;
pub use collection::{CollectionPublishError, CollectionPublishUseCase};
pub use listing::{ListingPublishError, ListingPublishUseCase};
pub use naming::{ARTICLE_KEY_PREFIX, COLLECTION_KEY_PREFIX, DEFAULT_LISTING_KEY};
pub use publish::{PublishError, PublishUseCase};
