pub mod data;
pub mod labels;

pub use data::*;
pub use labels::{is_label, labels_for, Label, ALL_LABELS};
