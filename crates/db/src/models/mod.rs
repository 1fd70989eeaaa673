//! Row structs mapped with `FromRow`.

pub mod project;
