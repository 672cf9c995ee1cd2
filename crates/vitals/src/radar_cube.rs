use num::complex::Complex32;
use crate::vitals_error::VitalsError;

/// One frame's slice of the upstream range-FFT radar cube.
///
/// Samples are Q15 complex pairs stored imaginary-first, real-second and
/// addressed range-bin-major: the pair for (bin, antenna) starts at
/// `(bin * nb_virtual_antennas + antenna) * 2`. This type is the single
/// place in the crate that knows about the upstream memory convention.
pub struct RadarCubeSlice<'a> {
    samples: &'a [i16],
    pub nb_range_bins: usize,
    pub nb_chirps: usize,
    pub nb_virtual_antennas: usize,
}

impl<'a> RadarCubeSlice<'a> {
    pub fn new(
        samples: &'a [i16],
        nb_range_bins: usize,
        nb_chirps: usize,
        nb_virtual_antennas: usize,
    ) -> Result<Self, VitalsError>
    {
        if samples.is_empty() {
            return Err(VitalsError::InvalidArg("radar cube slice is empty"));
        }
        if nb_chirps == 0 {
            return Err(VitalsError::InvalidArg("radar cube must carry at least one chirp"));
        }
        if nb_virtual_antennas == 0 {
            return Err(VitalsError::InvalidArg("radar cube must carry at least one virtual antenna"));
        }
        if samples.len() < nb_range_bins * nb_virtual_antennas * 2 {
            return Err(VitalsError::InvalidArg("radar cube slice is shorter than its declared geometry"));
        }

        Ok(Self {
            samples,
            nb_range_bins,
            nb_chirps,
            nb_virtual_antennas,
        })
    }

    /// Reads one complex sample. Q15 integers are widened to f32 verbatim,
    /// without scaling.
    pub fn sample(&self, range_bin: usize, antenna: usize) -> Complex32 {
        let offset = (range_bin * self.nb_virtual_antennas + antenna) * 2;
        Complex32::new(self.samples[offset + 1] as f32, self.samples[offset] as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapts_the_imaginary_first_convention() {
        // Two bins by one antenna; each pair is (imag, real).
        let samples: [i16; 4] = [100, -200, -32768, 32767];
        let cube = RadarCubeSlice::new(&samples, 2, 1, 1).unwrap();
        assert_eq!(cube.sample(0, 0), Complex32::new(-200.0, 100.0));
        assert_eq!(cube.sample(1, 0), Complex32::new(32767.0, -32768.0));
    }

    #[test]
    fn rejects_degenerate_slices() {
        let samples: [i16; 4] = [0; 4];
        assert!(RadarCubeSlice::new(&[], 2, 1, 1).is_err());
        assert!(RadarCubeSlice::new(&samples, 2, 0, 1).is_err());
        assert!(RadarCubeSlice::new(&samples, 2, 1, 0).is_err());
        assert!(RadarCubeSlice::new(&samples, 4, 1, 1).is_err());
    }
}
