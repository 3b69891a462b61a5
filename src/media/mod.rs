/// Photo handling module
///
/// This module handles:
/// - Reading name, declared type and size of picked files
/// - Generating in-memory preview thumbnails

pub mod inspect;
pub mod thumbnail;
