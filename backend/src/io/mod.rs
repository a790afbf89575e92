//! IO layer: the HTTP surface wrapping the domain services.

pub mod rest;
