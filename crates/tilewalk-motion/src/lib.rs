//! Moving along exploration paths.
//!
//! [`PathFollower`] is the per-tick consumer of a
//! [`Path`](tilewalk_paths::Path): it keeps the cursor, converts tiles to
//! pixel centers with [`FollowConfig`], and tells the caller which velocity
//! to use. It holds no global state; call [`PathFollower::step`] (or
//! [`PathFollower::drive`]) once per frame.

pub mod follower;

pub use follower::{Body, FollowConfig, FollowStep, PathFollower, fuzzy_eq};
