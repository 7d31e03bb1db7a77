//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use std::num::NonZeroUsize;

    use proptest::prelude::*;

    use crate::core::build_config::{BuildConfig, BuildMode};

    /// Generate a positive job count
    pub fn job_count() -> impl Strategy<Value = NonZeroUsize> {
        (1usize..256).prop_map(|n| NonZeroUsize::new(n).unwrap())
    }

    /// Generate a build mode
    pub fn build_mode() -> impl Strategy<Value = BuildMode> {
        prop_oneof![Just(BuildMode::Debug), Just(BuildMode::Release)]
    }

    /// Generate a build config rooted at `root` with arbitrary flags
    pub fn build_config(root: std::path::PathBuf) -> impl Strategy<Value = BuildConfig> {
        (
            build_mode(),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            proptest::option::of(job_count()),
        )
            .prop_map(move |(mode, tests, verbose, export, jobs)| {
                BuildConfig::new(root.clone())
                    .with_mode(mode)
                    .with_tests(tests)
                    .with_verbose(verbose)
                    .with_export_compile_commands(export)
                    .with_jobs(jobs)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_job_count_generator(jobs in job_count()) {
            prop_assert!(jobs.get() >= 1);
        }
    }
}
