//! # cmakegen - CMakeLists.txt from an observed build
//!
//! cmakegen watches a native build through compiler proxies and turns the
//! compile and link commands it saw into a CMakeLists.txt.
//!
//! ## Quick Start
//!
//! ```bash
//! # Build once through the proxies
//! make CC=cmakegen-cc CXX=cmakegen-cxx
//!
//! # Turn the recorded calls into a CMakeLists.txt
//! cmakegen generate -o CMakeLists.txt
//! ```
//!
//! ## Module Organization
//!
//! - [`parser`] - compiler argument list -> [`invocation::InvocationRecord`]
//! - [`store`] - append-only JSON-lines log of records
//! - [`synth`] - fold records into a target and render CMake
//! - [`proxy`] - compiler stand-in used by the proxy binaries
//! - [`commands`] - CLI command handlers

/// CLI command handlers extracted from main.
pub mod commands;

/// Settings from the environment and `cmakegen.toml`.
pub mod config;

/// The structured form of one compiler/linker call.
pub mod invocation;

/// Compiler argument parsing.
pub mod parser;

/// Compiler proxy (record, then forward).
pub mod proxy;

/// Invocation log persistence.
pub mod store;

/// Target synthesis and CMake rendering.
pub mod synth;

/// Terminal UI utilities (tables).
pub mod ui;
