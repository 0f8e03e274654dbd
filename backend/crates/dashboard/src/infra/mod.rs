//! Infrastructure Layer
//!
//! Flat-file implementation of the favourites repository.

pub mod json_file;

pub use json_file::JsonFavouritesDir;
