pub mod step;

pub use step::{narration_script, Step, StepSequence};
