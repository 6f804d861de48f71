//! End-to-end tests against the real OS notification backend.
//!
//! Event delivery is asynchronous, so assertions poll with a deadline.

use image::{Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread::sleep;
use std::time::{Duration, Instant};
use stripwatch::merger::PRIMARY_ARTIFACT;
use stripwatch::{DirectoryWatcher, MergeHandler, WatchError, WatchHandler};
use tempfile::TempDir;

const DEADLINE: Duration = Duration::from_secs(5);
const SETTLE: Duration = Duration::from_millis(300);

fn write_png(dir: &Path, name: &str, width: u32, height: u32) {
    RgbaImage::from_pixel(width, height, Rgba([200, 100, 50, 255]))
        .save(dir.join(name))
        .unwrap();
}

fn wait_until(mut check: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < DEADLINE {
        if check() {
            return true;
        }
        sleep(Duration::from_millis(25));
    }
    check()
}

fn artifact_dimensions(dir: &Path) -> Option<(u32, u32)> {
    image::image_dimensions(dir.join(PRIMARY_ARTIFACT)).ok()
}

#[derive(Clone, Default)]
struct Recorder {
    seen: Arc<Mutex<Vec<PathBuf>>>,
}

impl Recorder {
    fn paths(&self) -> Vec<PathBuf> {
        self.seen.lock().unwrap().clone()
    }
}

impl WatchHandler for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn on_change(&mut self, path: &Path) -> Result<(), WatchError> {
        self.seen.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

#[test]
fn test_new_image_rebuilds_strip() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().to_path_buf();
    write_png(&dir, "a.png", 10, 20);

    let handler = MergeHandler::new(&dir);
    handler.merge_now().unwrap();
    assert_eq!(artifact_dimensions(&dir), Some((10, 20)));

    let running = DirectoryWatcher::builder()
        .dir(&dir)
        .handler(handler)
        .build()
        .unwrap()
        .start()
        .unwrap();

    write_png(&dir, "b.png", 30, 5);
    assert!(wait_until(|| artifact_dimensions(&dir) == Some((40, 20))));

    fs::remove_file(dir.join("a.png")).unwrap();
    assert!(wait_until(|| artifact_dimensions(&dir) == Some((30, 5))));

    fs::remove_file(dir.join("b.png")).unwrap();
    assert!(wait_until(|| !dir.join(PRIMARY_ARTIFACT).exists()));

    running.stop().unwrap();
}

#[test]
fn test_artifact_writes_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let recorder = Recorder::default();

    let running = DirectoryWatcher::builder()
        .dir(&dir)
        .handler(recorder.clone())
        .build()
        .unwrap()
        .start()
        .unwrap();

    write_png(&dir, PRIMARY_ARTIFACT, 4, 4);
    fs::remove_file(dir.join(PRIMARY_ARTIFACT)).unwrap();
    fs::create_dir(dir.join("sub")).unwrap();
    sleep(SETTLE);
    assert!(recorder.paths().is_empty());

    // A real input still gets through
    fs::write(dir.join("c.png"), b"x").unwrap();
    assert!(wait_until(|| !recorder.paths().is_empty()));
    assert!(recorder.paths().iter().all(|p| p.ends_with("c.png")));

    running.stop().unwrap();
}

#[test]
fn test_rename_triggers_once() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().to_path_buf();
    fs::write(dir.join("a.png"), b"x").unwrap();
    let recorder = Recorder::default();

    let running = DirectoryWatcher::builder()
        .dir(&dir)
        .handler(recorder.clone())
        .build()
        .unwrap()
        .start()
        .unwrap();

    fs::rename(dir.join("a.png"), dir.join("z.png")).unwrap();
    assert!(wait_until(|| !recorder.paths().is_empty()));
    sleep(SETTLE);

    #[cfg(target_os = "linux")]
    assert_eq!(recorder.paths().len(), 1);

    running.stop().unwrap();
}

#[test]
fn test_nested_changes_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let nested = dir.join("nested");
    fs::create_dir(&nested).unwrap();
    let recorder = Recorder::default();

    let running = DirectoryWatcher::builder()
        .dir(&dir)
        .handler(recorder.clone())
        .build()
        .unwrap()
        .start()
        .unwrap();

    fs::write(nested.join("deep.png"), b"x").unwrap();
    sleep(SETTLE);

    #[cfg(target_os = "linux")]
    assert!(recorder.paths().is_empty());

    running.stop().unwrap();
}

#[test]
fn test_stop_joins_and_stops_delivery() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let recorder = Recorder::default();

    let running = DirectoryWatcher::builder()
        .dir(&dir)
        .handler(recorder.clone())
        .build()
        .unwrap()
        .start()
        .unwrap();
    running.stop().unwrap();

    let before = recorder.paths().len();
    fs::write(dir.join("late.png"), b"x").unwrap();
    sleep(SETTLE);
    assert_eq!(recorder.paths().len(), before);
}
