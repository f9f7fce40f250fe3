//! Project pipeline tests
//!
//! - Condense over files on disk
//! - Bundle builds feeding condense

pub mod tests_pipelines;
