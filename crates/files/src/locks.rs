//! Per-path mutual exclusion for filesystem mutations.
//!
//! Moves and copies are read-modify-write operations on a shared tree. Two requests that
//! touch the same source file must not interleave, otherwise a copy can observe a half-finished
//! cross-device move, or two copies can write the same destination at once. `PathLocks` hands
//! out one guard per path; other paths proceed in parallel.
//!
//! An operation that needs several paths takes them through [`PathLocks::lock_all`], which always
//! acquires in sorted order, so two operations can never wait on each other.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Registry of paths currently being mutated.
#[derive(Debug, Default)]
pub struct PathLocks {
    held: Mutex<HashSet<PathBuf>>,
    released: Condvar,
}

/// Exclusive hold on one path. Released on drop.
#[derive(Debug)]
#[must_use = "the path is unlocked as soon as the guard is dropped"]
pub struct PathGuard<'a> {
    locks: &'a PathLocks,
    path: PathBuf,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until no other guard holds `path`, then takes it.
    pub fn lock(&self, path: &Path) -> PathGuard<'_> {
        let mut held = self.held();
        while held.contains(path) {
            held = self
                .released
                .wait(held)
                .unwrap_or_else(PoisonError::into_inner);
        }
        held.insert(path.to_path_buf());

        PathGuard {
            locks: self,
            path: path.to_path_buf(),
        }
    }

    /// Takes every path in `paths`, in sorted order, skipping duplicates.
    pub fn lock_all(&self, paths: &[&Path]) -> Vec<PathGuard<'_>> {
        let mut ordered = paths.to_vec();
        ordered.sort_unstable();
        ordered.dedup();
        ordered.into_iter().map(|path| self.lock(path)).collect()
    }

    /// Number of paths currently held.
    pub fn held_count(&self) -> usize {
        self.held().len()
    }

    // A panic while holding the set cannot leave it inconsistent: every critical section is a
    // single insert or remove.
    fn held(&self) -> MutexGuard<'_, HashSet<PathBuf>> {
        self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PathGuard<'_> {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PathGuard<'_> {
    fn drop(&mut self) {
        self.locks.held().remove(&self.path);
        self.locks.released.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_guard_releases_on_drop() {
        let locks = PathLocks::new();
        {
            let guard = locks.lock(Path::new("/media/a.jpg"));
            assert_eq!(guard.path(), Path::new("/media/a.jpg"));
            assert_eq!(locks.held_count(), 1);
        }
        assert_eq!(locks.held_count(), 0);
    }

    #[test]
    fn test_distinct_paths_do_not_block() {
        let locks = PathLocks::new();
        let _a = locks.lock(Path::new("/media/a.jpg"));
        let _b = locks.lock(Path::new("/media/b.jpg"));
        assert_eq!(locks.held_count(), 2);
    }

    #[test]
    fn test_lock_all_dedups() {
        let locks = PathLocks::new();
        let a = Path::new("/media/a.jpg");
        let b = Path::new("/media/Acme/a.jpg");
        let guards = locks.lock_all(&[b, a, b]);
        assert_eq!(guards.len(), 2);
        assert_eq!(guards[0].path(), a);
        assert_eq!(locks.held_count(), 2);
        drop(guards);
        assert_eq!(locks.held_count(), 0);
    }

    #[test]
    fn test_crossed_lock_all_does_not_deadlock() {
        let locks = Arc::new(PathLocks::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let locks = Arc::clone(&locks);
                thread::spawn(move || {
                    let (x, y) = (Path::new("/media/x.jpg"), Path::new("/media/y.jpg"));
                    let pair = if i % 2 == 0 { [x, y] } else { [y, x] };
                    for _ in 0..50 {
                        let _guards = locks.lock_all(&pair);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(locks.held_count(), 0);
    }

    #[test]
    fn test_same_path_is_serialised() {
        let locks = Arc::new(PathLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_inside = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let locks = Arc::clone(&locks);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                thread::spawn(move || {
                    let _guard = locks.lock(Path::new("/media/shared.jpg"));
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    max_inside.fetch_max(now, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(5));
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1);
        assert_eq!(locks.held_count(), 0);
    }

    #[test]
    fn test_guard_released_when_holder_panics() {
        let locks = Arc::new(PathLocks::new());
        let worker = {
            let locks = Arc::clone(&locks);
            thread::spawn(move || {
                let _guard = locks.lock(Path::new("/media/boom.jpg"));
                panic!("simulated failure mid-move");
            })
        };
        assert!(worker.join().is_err());

        let _guard = locks.lock(Path::new("/media/boom.jpg"));
        assert_eq!(locks.held_count(), 1);
    }
}
