// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering or saving images
#[derive(Error, Debug)]
pub enum Error {
    #[error("file must be in PNG format: {0}")]
    UnsupportedFormat(String),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("corner names vertex {index} but the model has {count}")]
    IndexOutOfRange { index: u32, count: usize },

    #[error("core parser error: {0}")]
    Core(#[from] obj_lite_core::Error),
}
