/// Fixed-capacity rolling sample buffer with aggregate functions.
///
/// Once full, each push overwrites the oldest sample. Aggregates only ever
/// look at slots that have been written; an empty buffer yields NaN.
#[derive(Debug, Clone)]
pub struct RingStat {
    slots: Vec<f64>,
    capacity: usize,
    /// Slot the next push writes to.
    next: usize,
}

impl RingStat {
    /// A zero capacity is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            next: 0,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.slots.len() < self.capacity {
            self.slots.push(value);
        } else {
            self.slots[self.next] = value;
        }
        self.next = (self.next + 1) % self.capacity;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn mean(&self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        self.slots.iter().sum::<f64>() / self.slots.len() as f64
    }

    pub fn min(&self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        self.slots.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        self.slots.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.next = 0;
    }
}
