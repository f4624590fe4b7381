/// Text Classification
pub mod text_classification;

/// The unique string token that identifies the text classification pipeline
pub static TEXT_CLASSIFICATION: &str = "text-classification";
