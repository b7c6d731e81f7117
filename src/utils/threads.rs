/// The thread pool used by parallel algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Threads {
    /// Rayon's default, one thread per available core.
    #[default]
    Default,
    /// A fixed number of threads.
    NumThreads(usize),
}

impl Threads {
    pub fn build(self) -> Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> {
        match self {
            Self::Default => rayon::ThreadPoolBuilder::new().build(),
            Self::NumThreads(num_threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build(),
        }
    }
}

/// Builds a thread pool, panicking on failure.
///
/// `threads![]` uses the default number of threads; `threads![n]` uses `n`
/// threads.
#[macro_export]
macro_rules! threads {
    () => {
        $crate::utils::Threads::Default
            .build()
            .expect("Should be able to build default threadpool")
    };
    ($num_threads:expr) => {
        $crate::utils::Threads::NumThreads($num_threads)
            .build()
            .unwrap_or_else(|_| {
                panic!(
                    "Should be able to build custom threadpool with {} threads",
                    $num_threads
                )
            })
    };
}
