mod jobs;

pub use jobs::{health, submit_job};
