/// Buffer size used by [`FastReader::new`](crate::FastReader::new) and
/// [`FastWriter::new`](crate::FastWriter::new).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Bytes requested from the source per refill. Zero selects
    /// [`DEFAULT_BUFFER_SIZE`].
    pub capacity: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            capacity: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ReaderConfig {
    pub fn new() -> ReaderConfig {
        ReaderConfig::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> ReaderConfig {
        self.capacity = capacity;
        self
    }

    pub(crate) fn buffer_capacity(&self) -> usize {
        resolve_capacity(self.capacity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterConfig {
    /// Buffered bytes held before a write forces a flush. Zero selects
    /// [`DEFAULT_BUFFER_SIZE`].
    pub capacity: usize,
    /// Flush as soon as this many bytes are buffered. A threshold of zero or
    /// larger than the capacity is replaced with half the capacity.
    pub auto_flush: Option<usize>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            capacity: DEFAULT_BUFFER_SIZE,
            auto_flush: None,
        }
    }
}

impl WriterConfig {
    pub fn new() -> WriterConfig {
        WriterConfig::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> WriterConfig {
        self.capacity = capacity;
        self
    }

    pub fn with_auto_flush(mut self, threshold: usize) -> WriterConfig {
        self.auto_flush = Some(threshold);
        self
    }

    pub(crate) fn buffer_capacity(&self) -> usize {
        resolve_capacity(self.capacity)
    }

    pub(crate) fn auto_flush_threshold(&self) -> Option<usize> {
        let capacity = self.buffer_capacity();
        self.auto_flush.map(|threshold| {
            if threshold == 0 || threshold > capacity {
                let fallback = (capacity / 2).max(1);
                tracing::debug!(threshold, fallback, "auto-flush threshold out of range");
                fallback
            } else {
                threshold
            }
        })
    }
}

fn resolve_capacity(capacity: usize) -> usize {
    if capacity == 0 {
        tracing::warn!(
            fallback = DEFAULT_BUFFER_SIZE,
            "zero buffer capacity requested; using default"
        );
        DEFAULT_BUFFER_SIZE
    } else {
        capacity
    }
}
