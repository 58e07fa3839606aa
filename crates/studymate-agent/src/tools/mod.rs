//! Agent tools — trait, registry, and the study tool set.

pub mod base;
pub mod registry;
pub mod study;
