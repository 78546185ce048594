pub mod cache;
pub mod create;
pub mod delete;
pub mod inspect;
pub mod query;

pub use cache::{CacheCommands, CacheSubcommands};
pub use create::CreateArgs;
pub use delete::DeleteArgs;
pub use inspect::InspectArgs;
pub use query::QueryArgs;
