//! Minimal client for the GitHub REST contributors listing.
//!
//! - `GET {base}/repos/{owner}/{repo}/contributors`
//! - Returns the raw status and body; callers decide what a failure means.

pub mod index;
