pub mod explainer;
pub mod muxer;
pub mod narrator;

pub use explainer::ExplainerService;
pub use muxer::Muxer;
pub use narrator::NarratorService;
