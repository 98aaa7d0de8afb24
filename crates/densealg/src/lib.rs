//! Dense vectors and matrices over `f32`, `f64`, `Complex32` and `Complex64`.
//!
//! This crate provides:
//! - [`Element`]: the closed set of element kinds and their operation tables
//! - [`Container`]: the operation set shared by [`Vector`] and [`Matrix`]
//! - [`conform`]: broadcasting and the five-way conditional select [`cond`]
//! - [`product`]: matrix products, Kronecker products and norms
//! - [`convert`]: real/complex and single/double conversions
//! - [`config`]: global defaults and tolerance-based comparison
//!
//! ```
//! use densealg::prelude::*;
//! use densealg::product::outer;
//!
//! let u = Vector::from_vec(vec![1.0, 2.0, 3.0]);
//! let v = Vector::from_vec(vec![5.0, 2.0, 3.0]);
//! let o = outer(&u, &v);
//! assert_eq!(o.shape(), (3, 3));
//! assert_eq!(o.at_index((2, 0)).unwrap(), 15.0);
//! ```

pub mod config;
pub mod conform;
pub mod container;
pub mod convert;
pub mod element;
pub mod error;
pub mod matrix;
pub mod product;
pub mod vector;

pub use config::{approx_equal, ApproxOptions, InvalidRtolError};
pub use conform::{cond, conform_matrix_to, conform_vector_to, Conform};
pub use container::Container;
pub use element::{Element, ElementKind, RealElement, UnaryFn};
pub use error::{ContainerError, Result};
pub use matrix::Matrix;
pub use vector::Vector;

// Re-export the backend for storage-level access
pub use densealg_backend;

/// Common imports.
pub mod prelude {
    pub use crate::conform::{cond, Conform};
    pub use crate::container::Container;
    pub use crate::element::{Element, ElementKind, RealElement, UnaryFn};
    pub use crate::error::ContainerError;
    pub use crate::matrix::Matrix;
    pub use crate::vector::Vector;
}
