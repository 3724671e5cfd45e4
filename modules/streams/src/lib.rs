#![deny(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![cfg_attr(not(test), deny(clippy::redundant_clone))]
#![deny(clippy::redundant_field_names)]
#![deny(clippy::needless_borrow)]
#![deny(clippy::manual_let_else)]
#![deny(clippy::unused_async)]
#![deny(clippy::unreachable)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::must_use_candidate)]
#![deny(clippy::clone_on_copy)]
#![deny(clippy::len_without_is_empty)]
#![deny(clippy::wrong_self_convention)]
#![no_std]

//! Back-pressured stream processing runtime.
//!
//! Stream blueprints ([`Source`](crate::core::Source), [`Flow`](crate::core::Flow),
//! [`Sink`](crate::core::Sink) and junctions wired with [`GraphBuilder`](crate::core::GraphBuilder))
//! are immutable values. Running a [`RunnableGraph`](crate::core::RunnableGraph) hands it to a
//! [`Materializer`](crate::core::Materializer), which instantiates every stage, wires one
//! demand/signal channel per edge and returns the materialized value selected by the combine rules
//! chosen while building.
//!
//! The `core` module is `no_std` + `alloc` and ships a deterministic cooperative interpreter.
//! The `std` module adds a Tokio materializer running each stage as its own task.

extern crate alloc;

pub mod core;
#[cfg(feature = "std")]
pub mod std;
