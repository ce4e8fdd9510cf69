// SPDX-License-Identifier: MIT

//! Service layer: WHOOP API access and summary aggregation.

pub mod summary;
pub mod whoop;

pub use whoop::WhoopClient;
