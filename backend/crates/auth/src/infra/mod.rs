//! Infrastructure Layer
//!
//! Flat-file implementation of the credential repository.

pub mod yaml_file;

pub use yaml_file::YamlCredentialFile;
