//! Image Uploads

mod filename;
pub(crate) mod handler;
