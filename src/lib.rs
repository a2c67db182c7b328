//! Calendar heat maps: per-day values laid out on a week-by-weekday grid, one
//! grid per year, colored through a quantizing scale.
//!
//! The pieces, leaf-first: [`calendar`] maps dates onto grid cells,
//! [`data`] holds the input, [`rollup`] discovers and resolves record fields,
//! [`summary`] averages values per week, and [`heatmap`] drives a
//! [`surface::Surface`] to draw everything.
pub mod calendar;
pub mod config;
pub mod data;
pub mod heatmap;
pub mod rollup;
pub mod scale;
pub mod summary;
pub mod surface;
pub mod svg;
