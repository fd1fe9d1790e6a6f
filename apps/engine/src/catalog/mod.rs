// Template discovery and management flows. Independent of the generation path.

pub mod custom;
pub mod suggestions;
