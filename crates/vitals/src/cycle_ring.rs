use num::complex::Complex32;

/// A ring of per-frame slots holding the tracked angle-cell samples of one
/// full measurement cycle.
///
/// Writing always lands in the slot of the frame being processed; reading a
/// cell's time series starts at the oldest slot and walks the ring with the
/// per-frame stride, so the series comes out time-ordered no matter where in
/// the ring the cycle currently is.
pub struct CycleRing {
    data: Vec<Complex32>,
    nb_slots: usize,
    slot_stride: usize,
}

impl CycleRing {
    pub fn new(nb_slots: usize, slot_stride: usize) -> Self {
        Self {
            data: vec![Complex32::default(); nb_slots * slot_stride],
            nb_slots,
            slot_stride,
        }
    }

    /// Clears every slot back to zero samples.
    pub fn reset(&mut self) {
        self.data.fill(Complex32::default());
    }

    pub fn write(&mut self, slot: usize, cell: usize, value: Complex32) {
        debug_assert!(slot < self.nb_slots && cell < self.slot_stride);
        self.data[slot * self.slot_stride + cell] = value;
    }

    /// Walks one cell's samples across all slots, oldest first.
    pub fn series(&self, oldest_slot: usize, cell: usize) -> impl Iterator<Item = Complex32> + '_ {
        debug_assert!(cell < self.slot_stride);
        let nb_slots = self.nb_slots;
        let stride = self.slot_stride;
        (0..nb_slots).map(move |step| {
            let slot = (oldest_slot + step) % nb_slots;
            self.data[slot * stride + cell]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_reads_time_ordered_across_the_wrap() {
        let mut ring = CycleRing::new(4, 2);
        // Frames arrive in slots 2, 3, 0, 1; slot 2 holds the oldest frame.
        for (age, slot) in [2usize, 3, 0, 1].iter().enumerate() {
            ring.write(*slot, 1, Complex32::new(age as f32, 0.0));
        }
        let series: Vec<f32> = ring.series(2, 1).map(|value| value.re).collect();
        assert_eq!(series, [0.0, 1.0, 2.0, 3.0]);
    }
}
