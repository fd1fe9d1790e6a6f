// Prompt generation pipeline.
// Implements: content resolution, personalization, assembly, optimization, fallback.
// `generator` is the only entry point; the other modules are its stages.

pub mod assembler;
pub mod fallback;
pub mod generator;
pub mod optimizer;
pub mod personalizer;
pub mod prompts;
pub mod resolver;
