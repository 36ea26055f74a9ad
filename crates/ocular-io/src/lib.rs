//! Loaders for ocular recordings
//!
//! - [`gazepoint`]: Gazepoint tracker logs, split into blocks and epochs by
//!   their `USER` annotation
//! - [`eog`]: two-channel EOG recordings from delimited text
//!
//! # Example
//!
//! ```rust
//! use ocular_io::gazepoint;
//!
//! let log = "TIME\tFPOGX\tFPOGY\tFPOGV\tFPOGD\tFPOGID\tBKID\tBKDUR\n\
//!            0.0\t0.5\t0.5\t1\t0.0\t1\t0\t0.0\n";
//! let session = gazepoint::read_rows(log.as_bytes(), gazepoint::DEFAULT_DELIMITER).unwrap();
//! assert_eq!(session.samples().len(), 1);
//! ```

pub mod eog;
pub mod error;
pub mod gazepoint;

pub use eog::{load_eog, read_eog, EogRecording};
pub use error::{Error, Result};
pub use gazepoint::{
    epoch, load, load_and_epoch, load_blocks, read_rows, GazepointRow, GazepointSession,
    DEFAULT_DELIMITER,
};
