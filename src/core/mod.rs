pub mod front_matter;
pub mod query;
pub mod record;
pub mod value;

pub use front_matter::split;
pub use query::{project, scalar_to_text, JqQuery};
pub use record::{assemble, warn_conflicts, RESERVED_FIELDS};
pub use value::{Metadata, MetadataDecoder, YamlDecoder, YamlJsonConverter};
