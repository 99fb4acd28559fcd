//! Library side of the guest outreach command line.

pub mod logging;
pub mod workflow;
