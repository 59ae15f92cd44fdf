//! Phishing detection: text features, the rule-based classifier and raw
//! message preprocessing.

pub mod classifier;
pub mod features;
pub mod preprocess;

pub use classifier::*;
pub use features::*;
pub use preprocess::*;
