/// Canonical re-encoding command.
pub mod normalize;
/// Tag usage statistics command.
pub mod stats;
/// Stream validation command.
pub mod validate;

pub(crate) mod util;
