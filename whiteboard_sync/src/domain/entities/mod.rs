pub mod fetch_outcome;
pub mod group;
pub mod local_anchor;
pub mod post_it;
