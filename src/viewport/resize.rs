//! Debounced container and content resize feeds.
//!
//! Two independent producers report sizes: the container (window resizes,
//! fullscreen) and the content (the tree's rendered box changing as nodes
//! load or images decode). Both feed one [`ResizeQueue`], which debounces
//! each source on its own and turns the raw samples into [`LayoutEvent`]s:
//!
//! 1. The first sample of a source is its **baseline**. It records the size
//!    and never triggers a refit by itself.
//! 2. Once both sources have a baseline the queue emits
//!    [`LayoutEvent::Primed`] exactly once; the owner answers it with the
//!    initial fit.
//! 3. Every later sample re-arms that source's quiet window. When the window
//!    elapses without new samples, the last sample is compared with the last
//!    known size and [`LayoutEvent::Resized`] is emitted only on a real
//!    change.
//!
//! Dropping the queue (or calling [`ResizeQueue::shutdown`]) discards every
//! pending window; senders then report `false` from [`ResizeSender::send`].
//!
//! ```rust,no_run
//! use splicetree::viewport::fit::Size;
//! use splicetree::viewport::resize::{LayoutEvent, ResizeQueue, ResizeSource};
//! use std::time::Duration;
//!
//! # async fn example() {
//! let mut queue = ResizeQueue::new(Duration::from_millis(250));
//! let container = queue.sender(ResizeSource::Container);
//! let content = queue.sender(ResizeSource::Content);
//!
//! container.send(Size::new(800.0, 600.0));
//! content.send(Size::new(2000.0, 1500.0));
//! assert!(matches!(queue.next_event().await, Some(LayoutEvent::Primed { .. })));
//! # }
//! ```

use super::fit::Size;
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Which feed a size sample came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeSource {
    Container,
    Content,
}

impl fmt::Display for ResizeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => f.write_str("container"),
            Self::Content => f.write_str("content"),
        }
    }
}

/// Output of the debouncer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutEvent {
    /// Both feeds reported a baseline; time for the initial fit.
    Primed {
        container: Size,
        content: Size,
    },
    /// A feed settled on a size different from the last known one.
    Resized {
        source: ResizeSource,
        size: Size,
    },
}

#[derive(Debug, Default)]
struct FeedState {
    last_known: Option<Size>,
    pending: Option<(Size, Instant)>,
}

/// Per-source debounce state machine, driven by explicit timestamps.
#[derive(Debug)]
pub struct ResizeDebouncer {
    window: Duration,
    container: FeedState,
    content: FeedState,
    primed: bool,
}

impl ResizeDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            container: FeedState::default(),
            content: FeedState::default(),
            primed: false,
        }
    }

    pub const fn window(&self) -> Duration {
        self.window
    }

    fn feed_mut(&mut self, source: ResizeSource) -> &mut FeedState {
        match source {
            ResizeSource::Container => &mut self.container,
            ResizeSource::Content => &mut self.content,
        }
    }

    /// Last settled size of a feed.
    pub fn last_known(&self, source: ResizeSource) -> Option<Size> {
        match source {
            ResizeSource::Container => self.container.last_known,
            ResizeSource::Content => self.content.last_known,
        }
    }

    /// Record a sample taken at `now`.
    ///
    /// Returns [`LayoutEvent::Primed`] when this sample completes the second
    /// baseline.
    pub fn observe(&mut self, source: ResizeSource, size: Size, now: Instant) -> Option<LayoutEvent> {
        let window = self.window;
        let feed = self.feed_mut(source);

        if feed.last_known.is_none() {
            feed.last_known = Some(size);
            tracing::debug!("Baseline {source} size {size}");
            return self.try_prime();
        }

        feed.pending = Some((size, now + window));
        None
    }

    fn try_prime(&mut self) -> Option<LayoutEvent> {
        if self.primed {
            return None;
        }
        match (self.container.last_known, self.content.last_known) {
            (Some(container), Some(content)) => {
                self.primed = true;
                Some(LayoutEvent::Primed {
                    container,
                    content,
                })
            }
            _ => None,
        }
    }

    /// Earliest pending deadline across both feeds.
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.container.pending, self.content.pending]
            .into_iter()
            .flatten()
            .map(|(_, deadline)| deadline)
            .min()
    }

    /// Settle every window whose deadline is at or before `now`.
    pub fn fire_due(&mut self, now: Instant) -> Vec<LayoutEvent> {
        let mut events = Vec::new();
        for source in [ResizeSource::Container, ResizeSource::Content] {
            let feed = self.feed_mut(source);
            let Some((size, deadline)) = feed.pending else {
                continue;
            };
            if deadline > now {
                continue;
            }
            feed.pending = None;
            if feed.last_known == Some(size) {
                tracing::debug!("{source} settled on unchanged size {size}");
                continue;
            }
            feed.last_known = Some(size);
            events.push(LayoutEvent::Resized {
                source,
                size,
            });
        }
        events
    }

    /// Drop every pending window.
    pub fn cancel(&mut self) {
        self.container.pending = None;
        self.content.pending = None;
    }
}

/// Producer handle for one feed.
#[derive(Debug, Clone)]
pub struct ResizeSender {
    source: ResizeSource,
    tx: mpsc::UnboundedSender<(ResizeSource, Size)>,
}

impl ResizeSender {
    pub const fn source(&self) -> ResizeSource {
        self.source
    }

    /// Report a size. Returns `false` once the queue is gone.
    pub fn send(&self, size: Size) -> bool {
        self.tx.send((self.source, size)).is_ok()
    }
}

/// Single consumer of both resize feeds.
pub struct ResizeQueue {
    tx: mpsc::UnboundedSender<(ResizeSource, Size)>,
    rx: mpsc::UnboundedReceiver<(ResizeSource, Size)>,
    debouncer: ResizeDebouncer,
    ready: VecDeque<LayoutEvent>,
    closed: bool,
}

impl ResizeQueue {
    pub fn new(window: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            debouncer: ResizeDebouncer::new(window),
            ready: VecDeque::new(),
            closed: false,
        }
    }

    /// A producer handle for `source`.
    pub fn sender(&self, source: ResizeSource) -> ResizeSender {
        ResizeSender {
            source,
            tx: self.tx.clone(),
        }
    }

    /// Wait for the next layout event.
    ///
    /// Returns `None` only after [`shutdown`](Self::shutdown).
    pub async fn next_event(&mut self) -> Option<LayoutEvent> {
        loop {
            if let Some(event) = self.ready.pop_front() {
                return Some(event);
            }
            if self.closed {
                return None;
            }

            let deadline = self.debouncer.next_deadline();
            tokio::select! {
                sample = self.rx.recv() => match sample {
                    Some((source, size)) => {
                        if let Some(event) = self.debouncer.observe(source, size, Instant::now()) {
                            self.ready.push_back(event);
                        }
                    }
                    None => self.closed = true,
                },
                () = wait_until(deadline) => {
                    let fired = self.debouncer.fire_due(Instant::now());
                    self.ready.extend(fired);
                }
            }
        }
    }

    /// Stop accepting samples and discard pending windows.
    pub fn shutdown(&mut self) {
        self.rx.close();
        self.debouncer.cancel();
        self.ready.clear();
        self.closed = true;
    }

    pub fn debouncer(&self) -> &ResizeDebouncer {
        &self.debouncer
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
