//! IndexNow batch submission.

mod batch;

pub use batch::BatchSubmitter;
