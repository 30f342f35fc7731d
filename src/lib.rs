//! Relief maps around a point.
//!
//! `topomap` turns a center coordinate and a radius in kilometers into the map region a relief
//! dataset is requested for, then describes the contour figures to draw over it. Loading the
//! elevation grid and drawing it belong to an external plotting library, reached through the
//! `ReliefSource` and `Figure` traits. `RemoteDataset` and `Script` implement them by naming the
//! remote grid and writing the GMT commands that would draw each figure.

mod error;
pub use error::{Error, Result};
mod types;
pub use types::*;
pub mod bbox;
pub use bbox::{compute, compute_with, DegreeModel};
pub mod figure;
pub use figure::{ContourOptions, Figure, ImageOptions, Script, TextOptions};
pub mod job;
pub use job::{run, FigureSpec, Layer, MapJob};
pub mod relief;
pub use relief::{ReliefRequest, ReliefSource, RemoteDataset, RemoteGrid, Resolution};
pub mod util;
