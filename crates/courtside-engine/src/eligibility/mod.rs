pub mod classifier;

pub use classifier::{check_inputs, classify, eligibility_status, evaluate_category, DefaultClassifier};
