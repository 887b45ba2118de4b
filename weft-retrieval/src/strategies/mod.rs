mod compression;
mod multi_query;
mod multi_vector;
mod parent_document;
mod score_threshold;
mod self_query;
mod time_weighted;

pub use compression::ContextualCompressionRetriever;
pub use multi_query::MultiQueryRetriever;
pub use multi_vector::{MultiVectorRetriever, DEFAULT_ID_KEY};
pub use parent_document::ParentDocumentRetriever;
pub use score_threshold::{ScoreThresholdConfig, ScoreThresholdRetriever};
pub use self_query::{AttributeInfo, SelfQueryRetriever};
pub use time_weighted::TimeWeightedRetriever;
