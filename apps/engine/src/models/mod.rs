pub mod outcome;
pub mod template;
