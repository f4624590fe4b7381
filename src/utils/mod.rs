/// File utilities
pub mod files;

/// Archive download and extraction
pub mod download;

/// Tensor Utilities
pub mod tensors;

/// Utilities for classification tasks
pub mod classes;

/// Training curve plots
pub mod plot;
