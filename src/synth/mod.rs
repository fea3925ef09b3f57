//! Folding many invocations into one CMake target.
//!
//! - [`synthesize`] builds a [`TargetDescription`] from the ordered log
//! - [`render`] turns it into CMakeLists.txt text

mod render;
mod standard;
mod target;

pub use render::{DEFAULT_CMAKE_MINIMUM, RenderOptions, render};
pub use standard::{Language, LanguageStandard};
pub use target::{
    DEFAULT_TARGET_NAME, ShadowedSource, THREADS_LIBRARY, TargetDescription, basename, synthesize,
};

