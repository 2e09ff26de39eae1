//! Vision-based counting assist.
//!
//! A cleaner photographs a shelf and gets back an estimated count to speed
//! up data entry. The vision model is an external service; this crate wraps
//! it behind [`CountingAssist`] so callers only ever see a [`CountEstimate`]
//! or an [`AssistError`].

mod client;
mod error;
mod request;

pub use client::{
    AssistConfig, CountEstimate, CountingAssist, HttpCountingAssist, UnavailableCountingAssist,
    DEFAULT_TIMEOUT_SECS,
};
pub use error::AssistError;
pub use request::{EstimateRequest, DEFAULT_MIME_TYPE};
