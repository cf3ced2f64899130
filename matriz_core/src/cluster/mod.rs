//! Centroid clustering, diagnostic projection and cluster summaries.

pub mod kmeans;
pub mod projection;
pub mod summary;

pub use kmeans::{fit, ClusterAssignment, KMeansParams};
pub use projection::{project, Projection};
pub use summary::{summarize, ChannelMeans, ClusterSummaries, ClusterSummary};
