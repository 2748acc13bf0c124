//! Questionnaire state module

mod forms;
mod steps;

pub use forms::*;
pub use steps::*;
