use std::collections::VecDeque;

use crate::core::config::DEFAULT_HISTORY_CAPACITY;

/// Fixed-capacity FIFO buffer of numeric samples (for charts).
///
/// Values are stored as given; range checking is the sampler's job.
#[derive(Debug, Clone)]
pub struct TimeSeriesBuffer {
    capacity: usize,
    samples: VecDeque<f32>,
}

impl TimeSeriesBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a sample, evicting the oldest one when the buffer is full.
    pub fn push(&mut self, value: f32) {
        if self.capacity == 0 {
            return;
        }
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Samples in insertion order, oldest first
    pub fn values(&self) -> Vec<f32> {
        self.samples.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<f32> {
        self.samples.back().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TimeSeriesBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

/// CPU and memory usage history
#[derive(Debug, Clone, Default)]
pub struct MetricsHistory {
    cpu_usage: TimeSeriesBuffer,
    memory_usage: TimeSeriesBuffer,
}

impl MetricsHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cpu_usage: TimeSeriesBuffer::new(capacity),
            memory_usage: TimeSeriesBuffer::new(capacity),
        }
    }

    pub fn push(&mut self, cpu_percent: f32, memory_percent: f32) {
        self.cpu_usage.push(cpu_percent);
        self.memory_usage.push(memory_percent);
    }

    pub fn cpu(&self) -> &TimeSeriesBuffer {
        &self.cpu_usage
    }

    pub fn memory(&self) -> &TimeSeriesBuffer {
        &self.memory_usage
    }
}
