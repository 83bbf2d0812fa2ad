// Service exports
pub mod cache;
pub mod content;
pub mod datastore;
pub mod directory;
pub mod notifier;
pub mod postgres;
pub mod traits;

pub use cache::{CacheError, CacheKey, CacheManager, CacheStats};
pub use content::{ContentError, ContentPolicy, ContentService, GenerationClient};
pub use datastore::{DatastoreClient, DatastoreError, DatastoreTables};
pub use directory::DirectoryService;
pub use notifier::{EmailFunctionClient, LogNotifier, NotifyError, OutboundMessage};
pub use postgres::{PostgresClient, RevealStats, StoreError};
pub use traits::{ContentGenerator, ContentStore, InquiryStore, Notifier, ProfileSource};
