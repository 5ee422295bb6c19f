pub mod analysis;
pub mod incident;
pub mod prompt;
pub mod sectionizer;
pub mod synthesize;

pub use analysis::{AnalysisResult, Sections};
pub use incident::IncidentRequest;
pub use prompt::build_prompt;
pub use sectionizer::{sectionize, Section, SectionRules, Sectionizer};
pub use synthesize::{synthesize_analysis, SynthesisOverrides};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
