/// Double-buffered value tables.
///
/// A sweep reads only `current` and writes only `next`, so every state in a
/// sweep sees the values of the previous sweep regardless of update order.
#[derive(Debug, Clone)]
pub(crate) struct ValueTables {
    current: Vec<f64>,
    next: Vec<f64>,
}

impl ValueTables {
    /// Both tables start at zero.
    pub(crate) fn zeroed(len: usize) -> Self {
        ValueTables {
            current: vec![0.0; len],
            next: vec![0.0; len],
        }
    }

    /// Borrow the read-only snapshot and the write buffer for one sweep.
    pub(crate) fn split(&mut self) -> (&[f64], &mut [f64]) {
        (self.current.as_slice(), self.next.as_mut_slice())
    }

    /// Largest absolute change between the snapshot and the write buffer.
    /// A NaN change anywhere makes the result NaN.
    pub(crate) fn max_delta(&self) -> f64 {
        self.current
            .iter()
            .zip(&self.next)
            .map(|(old, new)| (new - old).abs())
            .fold(0.0, |acc, delta| {
                if delta.is_nan() || delta > acc { delta } else { acc }
            })
    }

    /// Promote the write buffer to the snapshot for the next sweep.
    pub(crate) fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    pub(crate) fn into_current(self) -> Vec<f64> {
        self.current
    }
}
