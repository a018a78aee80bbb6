//! Timed letter-by-letter text reveal.
//!
//! One scheduler per speaker (narrator, player). Reveal requests queue
//! onto a single background worker so sequential reveals never
//! interleave; [`RevealScheduler::skip`] flushes the current job at once
//! and [`RevealScheduler::reveal_replace`] abandons whatever is in
//! flight in favor of new text.
//!
//! The display buffer sits behind a mutex with short, bounded critical
//! sections (one character append, one render read); the lock is never
//! held across a sleep. The main loop polls
//! [`RevealScheduler::is_revealing`] to suppress ordinary input while a
//! reveal runs.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::trace;

/// Default narrator reveal rate in characters per minute (60 ms/char).
pub const DEFAULT_CHARS_PER_MINUTE: u32 = 1000;

/// One queued reveal request.
struct RevealJob {
    text: String,
    chars_per_minute: u32,
    replace: bool,
    generation: u64,
}

#[derive(Default)]
struct Shared {
    buffer: Mutex<String>,
    /// Queued plus running jobs; non-zero means input is suppressed.
    pending: AtomicUsize,
    skip: AtomicBool,
    /// Bumped by `reveal_replace`; jobs from an older generation abandon
    /// their remaining characters.
    generation: AtomicU64,
}

impl Shared {
    fn append(&self, chunk: &str) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push_str(chunk);
        }
    }

    fn superseded(&self, job: &RevealJob) -> bool {
        self.generation.load(Ordering::SeqCst) != job.generation
    }
}

/// Schedules letter-by-letter reveals into one speaker's display buffer.
pub struct RevealScheduler {
    tx: UnboundedSender<RevealJob>,
    shared: Arc<Shared>,
}

impl RevealScheduler {
    /// Spawn the worker task. Must be called within a tokio runtime.
    pub fn new() -> Self {
        let shared = Arc::new(Shared::default());
        let (tx, mut rx) = mpsc::unbounded_channel::<RevealJob>();
        let worker = Arc::clone(&shared);
        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                run_job(&worker, job).await;
                worker.pending.fetch_sub(1, Ordering::SeqCst);
            }
        });
        Self { tx, shared }
    }

    /// Queue `text` to be revealed after any in-flight reveal finishes.
    ///
    /// Delay between characters is `60000 / chars_per_minute`
    /// milliseconds; a rate of 0 reveals instantly.
    pub fn reveal(&self, text: impl Into<String>, chars_per_minute: u32) {
        self.submit(text.into(), chars_per_minute, false);
    }

    /// Clear the buffer and reveal `text`, abandoning the remaining
    /// characters of any in-flight or queued job.
    pub fn reveal_replace(&self, text: impl Into<String>, chars_per_minute: u32) {
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        self.submit(text.into(), chars_per_minute, true);
    }

    fn submit(&self, text: String, chars_per_minute: u32, replace: bool) {
        let generation = self.shared.generation.load(Ordering::SeqCst);
        self.shared.pending.fetch_add(1, Ordering::SeqCst);
        // The worker outlives the scheduler, so a send only fails during
        // shutdown, where dropping the job is fine.
        let _ = self.tx.send(RevealJob {
            text,
            chars_per_minute,
            replace,
            generation,
        });
    }

    /// Flush the current job's remaining characters at once. Idempotent;
    /// a no-op when nothing is revealing.
    pub fn skip(&self) {
        if self.is_revealing() {
            self.shared.skip.store(true, Ordering::SeqCst);
        }
    }

    /// True while a reveal is running or queued. The main loop treats
    /// this as the input-suppression flag.
    pub fn is_revealing(&self) -> bool {
        self.shared.pending.load(Ordering::SeqCst) > 0
    }

    /// Clone of the current buffer contents for rendering.
    pub fn snapshot(&self) -> String {
        self.shared
            .buffer
            .lock()
            .map(|buffer| buffer.clone())
            .unwrap_or_default()
    }
}

async fn run_job(shared: &Shared, job: RevealJob) {
    // A replace issued while this job was still queued wins outright.
    if shared.superseded(&job) {
        trace!("reveal job superseded before it started");
        return;
    }
    // A leftover skip was meant for an earlier job.
    shared.skip.store(false, Ordering::SeqCst);

    if job.replace {
        if let Ok(mut buffer) = shared.buffer.lock() {
            buffer.clear();
        }
    }

    if job.chars_per_minute == 0 {
        shared.append(&job.text);
        return;
    }
    let delay = Duration::from_millis(60_000 / u64::from(job.chars_per_minute));

    let mut chars = job.text.char_indices();
    while let Some((offset, c)) = chars.next() {
        if shared.superseded(&job) {
            trace!("reveal job superseded mid-flight");
            return;
        }
        if shared.skip.swap(false, Ordering::SeqCst) {
            shared.append(&job.text[offset..]);
            return;
        }
        shared.append(c.encode_utf8(&mut [0u8; 4]));
        tokio::time::sleep(delay).await;
    }
}

impl Default for RevealScheduler {
    fn default() -> Self {
        Self::new()
    }
}
