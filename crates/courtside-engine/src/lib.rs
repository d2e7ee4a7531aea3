#![forbid(unsafe_code)]

pub mod cache;
pub mod eligibility;
pub mod report;
