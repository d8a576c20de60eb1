//! Product Handlers

pub(crate) mod clear;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod stats;
pub(crate) mod stock;
pub(crate) mod update;
