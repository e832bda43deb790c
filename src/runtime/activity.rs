//! Modification-time tracking for the entries a browser currently displays.
//!
//! A tick re-reads every tracked path and raises a transient flag on entries
//! whose modification time moved. The flag expires `flag_clear` after the most
//! recent change. A refresh swaps the whole tracked set under one lock and bumps
//! a generation counter, so a tick that read the filesystem against the old set
//! discards its results instead of writing them into the new one.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEntry {
    pub display_name: String,
    pub path: PathBuf,
    pub last_modified: Option<SystemTime>,
    pub flag_expiry: Option<Instant>,
}

impl TrackedEntry {
    pub fn is_flagged(&self, now: Instant) -> bool {
        self.flag_expiry.is_some_and(|expiry| now < expiry)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityEvent {
    Changed {
        display_name: String,
        path: PathBuf,
        modified: SystemTime,
    },
    Cleared {
        display_name: String,
        path: PathBuf,
    },
}

#[derive(Debug, Default)]
struct TrackedSet {
    generation: u64,
    entries: Vec<TrackedEntry>,
}

#[derive(Debug)]
pub struct ActivityTracker {
    flag_clear: Duration,
    set: Mutex<TrackedSet>,
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

impl ActivityTracker {
    pub fn new(flag_clear: Duration) -> Self {
        Self {
            flag_clear,
            set: Mutex::new(TrackedSet::default()),
        }
    }

    pub fn flag_clear(&self) -> Duration {
        self.flag_clear
    }

    /// Replaces the tracked set and returns its generation.
    pub fn replace<I>(&self, entries: I) -> u64
    where
        I: IntoIterator<Item = (String, PathBuf)>,
    {
        let fresh: Vec<TrackedEntry> = entries
            .into_iter()
            .map(|(display_name, path)| TrackedEntry {
                last_modified: modified_time(&path),
                display_name,
                path,
                flag_expiry: None,
            })
            .collect();

        let mut set = self.set.lock().unwrap_or_else(|err| err.into_inner());
        set.generation += 1;
        set.entries = fresh;
        set.generation
    }

    pub fn generation(&self) -> u64 {
        self.set
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .generation
    }

    pub fn snapshot(&self) -> Vec<TrackedEntry> {
        self.set
            .lock()
            .unwrap_or_else(|err| err.into_inner())
            .entries
            .clone()
    }

    pub fn tick(&self, now: Instant) -> Vec<ActivityEvent> {
        self.tick_with(now, || {})
    }

    /// `after_read` runs once the filesystem has been read and before the
    /// results are written back.
    fn tick_with(&self, now: Instant, after_read: impl FnOnce()) -> Vec<ActivityEvent> {
        let (generation, paths) = {
            let set = self.set.lock().unwrap_or_else(|err| err.into_inner());
            let paths: Vec<PathBuf> = set.entries.iter().map(|entry| entry.path.clone()).collect();
            (set.generation, paths)
        };

        let observed: Vec<Option<SystemTime>> =
            paths.iter().map(|path| modified_time(path)).collect();
        after_read();

        let mut set = self.set.lock().unwrap_or_else(|err| err.into_inner());
        if set.generation != generation {
            return Vec::new();
        }

        let mut events = Vec::new();
        for (entry, seen) in set.entries.iter_mut().zip(observed) {
            if entry.flag_expiry.is_some_and(|expiry| now >= expiry) {
                entry.flag_expiry = None;
                events.push(ActivityEvent::Cleared {
                    display_name: entry.display_name.clone(),
                    path: entry.path.clone(),
                });
            }

            let Some(seen) = seen else {
                continue;
            };
            if entry.last_modified == Some(seen) {
                continue;
            }
            entry.last_modified = Some(seen);
            entry.flag_expiry = Some(now + self.flag_clear);
            events.push(ActivityEvent::Changed {
                display_name: entry.display_name.clone(),
                path: entry.path.clone(),
                modified: seen,
            });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn bump_mtime(path: &Path, offset_secs: u64) {
        let file = File::options().write(true).open(path).expect("open");
        file.set_modified(SystemTime::now() + Duration::from_secs(offset_secs))
            .expect("set mtime");
    }

    #[test]
    fn unchanged_entries_raise_nothing() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        fs::write(&path, "a").expect("write");

        let tracker = ActivityTracker::new(Duration::from_secs(3));
        tracker.replace([("notes.txt".to_string(), path)]);
        assert!(tracker.tick(Instant::now()).is_empty());
    }

    #[test]
    fn change_raises_flag_until_delay_passes() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        fs::write(&path, "a").expect("write");

        let tracker = ActivityTracker::new(Duration::from_secs(3));
        tracker.replace([("notes.txt".to_string(), path.clone())]);
        bump_mtime(&path, 60);

        let start = Instant::now();
        let events = tracker.tick(start);
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ActivityEvent::Changed { .. }));
        assert!(tracker.snapshot()[0].is_flagged(start + Duration::from_secs(2)));
        assert!(!tracker.snapshot()[0].is_flagged(start + Duration::from_secs(3)));

        let later = tracker.tick(start + Duration::from_secs(4));
        assert_eq!(
            later,
            vec![ActivityEvent::Cleared {
                display_name: "notes.txt".to_string(),
                path,
            }]
        );
        assert!(tracker.snapshot()[0].flag_expiry.is_none());
    }

    #[test]
    fn second_change_extends_expiry() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        fs::write(&path, "a").expect("write");

        let tracker = ActivityTracker::new(Duration::from_secs(3));
        tracker.replace([("notes.txt".to_string(), path.clone())]);

        let start = Instant::now();
        bump_mtime(&path, 60);
        tracker.tick(start);
        bump_mtime(&path, 120);
        tracker.tick(start + Duration::from_secs(2));

        let entry = &tracker.snapshot()[0];
        assert!(entry.is_flagged(start + Duration::from_secs(4)));
    }

    #[test]
    fn missing_entries_are_left_untouched() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("gone.txt");
        fs::write(&path, "a").expect("write");

        let tracker = ActivityTracker::new(Duration::from_secs(3));
        tracker.replace([("gone.txt".to_string(), path.clone())]);
        let before = tracker.snapshot();
        fs::remove_file(&path).expect("remove");

        assert!(tracker.tick(Instant::now()).is_empty());
        assert_eq!(tracker.snapshot(), before);
    }

    #[test]
    fn tick_discards_results_read_against_a_replaced_set() {
        let dir = tempdir().expect("tempdir");
        let old = dir.path().join("old.txt");
        let fresh = dir.path().join("fresh.txt");
        fs::write(&old, "a").expect("write");
        fs::write(&fresh, "b").expect("write");

        let tracker = ActivityTracker::new(Duration::from_secs(3));
        tracker.replace([("old.txt".to_string(), old.clone())]);
        bump_mtime(&old, 60);

        let events = tracker.tick_with(Instant::now(), || {
            tracker.replace([("fresh.txt".to_string(), fresh.clone())]);
        });
        assert!(events.is_empty());

        let entries = tracker.snapshot();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].display_name, "fresh.txt");
        assert_eq!(entries[0].last_modified, modified_time(&fresh));
        assert!(entries[0].flag_expiry.is_none());
    }

    #[test]
    fn replace_swaps_whole_set_and_bumps_generation() {
        let dir = tempdir().expect("tempdir");
        let first = dir.path().join("a.txt");
        let second = dir.path().join("b.txt");
        fs::write(&first, "a").expect("write");
        fs::write(&second, "b").expect("write");

        let tracker = ActivityTracker::new(Duration::from_secs(3));
        let one = tracker.replace([("a.txt".to_string(), first)]);
        let two = tracker.replace([
            ("b.txt".to_string(), second.clone()),
            ("a.txt".to_string(), dir.path().join("a.txt")),
        ]);
        assert!(two > one);
        assert_eq!(tracker.generation(), two);

        let names: Vec<String> = tracker
            .snapshot()
            .into_iter()
            .map(|entry| entry.display_name)
            .collect();
        assert_eq!(names, vec!["b.txt".to_string(), "a.txt".to_string()]);
    }
}
