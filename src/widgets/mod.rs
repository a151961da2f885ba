//! UI widgets - self-contained visual components

pub mod bar;
pub mod stripes;
