// Request context modeling and template content checks.

pub mod builder;
pub mod validation;
