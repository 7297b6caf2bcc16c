/// Build planning core
///
/// Pure logic for ordering a recipe collection and culling it against a
/// channel. Nothing in here performs I/O.
pub mod domain;
pub mod services;
