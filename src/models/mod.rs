/// Averaged word embeddings with a single logit output
pub mod pooled_embedding;
