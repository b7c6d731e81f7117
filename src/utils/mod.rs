mod threads;
pub use threads::Threads;
