use crate::antenna_geometry::{AntennaGeometry, toroidal_neighborhood};
use crate::cycle_ring::CycleRing;
use crate::phase::{PhaseUnwrapper, sample_phase};
use crate::radar_cube::RadarCubeSlice;
use crate::vitals_error::VitalsError;
use crate::vitals_parameters::VitalsParameters;
use radar_core::vitals_config::VitalsConfig;
use radar_core::vitals_result::VitalSignsResult;
use std::sync::Arc;
use num::complex::Complex32;
use rustfft::{FftPlanner, Fft};
use itertools::izip;

#[derive(Debug)]
pub struct VitalsSettings {
    /// Inclusive lower edge of the breathing search band in spectrum bins.
    pub breath_band_low: usize,
    /// Exclusive upper edge of the breathing search band in spectrum bins.
    pub breath_band_high: usize,
    /// Inclusive lower edge of the heart search band in harmonic-product bins.
    pub heart_band_low: usize,
    /// Exclusive upper edge of the heart search band in harmonic-product bins.
    pub heart_band_high: usize,
    /// Maximum distance in bins for a spectrum peak to be matched against the heart history.
    pub history_match_distance: usize,
    /// Maximum change in heart bins tolerated between two consecutive refreshes.
    pub max_heart_jump: usize,
    /// Number of refreshes suppressed before the output is considered settled.
    pub warmup_refreshes: u32,
    /// Conversion factor from spectrum bin index to beats (or breaths) per minute.
    pub bpm_per_bin: f32,
    /// Number of consecutive lost-target notifications tolerated before the output is invalidated.
    pub target_loss_persistence: u32,
    /// Angle cell whose residual series feeds the breathing-deviation estimate.
    /// Together with the range cell below this is a fixed convention of the
    /// device class; it is not rescaled when the cell counts change.
    pub deviation_angle_cell: usize,
    /// Range cell whose residual series feeds the breathing-deviation estimate.
    pub deviation_range_cell: usize,
    /// First residual sample of the breathing-deviation window.
    pub deviation_window_start: usize,
    /// Number of residual samples in the breathing-deviation window.
    pub deviation_window_length: usize,
}

impl Default for VitalsSettings {
    fn default() -> Self {
        Self {
            breath_band_low: 3,
            breath_band_high: 50,
            heart_band_low: 68,
            heart_band_high: 128,
            history_match_distance: 3,
            max_heart_jump: 12,
            warmup_refreshes: 7,
            bpm_per_bin: 0.882,
            target_loss_persistence: 50,
            deviation_angle_cell: 5,
            deviation_range_cell: 3,
            deviation_window_start: 59,
            deviation_window_length: 40,
        }
    }
}

pub struct VitalSignsPipeline {
    pub settings: VitalsSettings,
    pub params: VitalsParameters,
    geometry: AntennaGeometry,
    config: VitalsConfig,
    /// The number of radar frames consumed since construction or reset.
    pub total_frames_read: u64,
    /// The number of spectrum refreshes completed. This is the warm-up clock.
    pub total_refreshes: u32,
    cycle_frame_index: usize,
    active_range_bin: usize,
    peak_row: usize,
    peak_col: usize,
    target_lost_count: u32,
    indicate_no_target: bool,
    previous_heart_peaks: [usize; 4],
    breathing_deviation: f32,
    latest_result: VitalSignsResult,
    // fft
    angle_fft: Arc<dyn Fft<f32>>,
    spectrum_fft: Arc<dyn Fft<f32>>,
    fft_scratch: Vec<Complex32>,
    // per-frame buffers
    extract_buffer: Vec<Complex32>,
    dc_accumulating: Vec<Complex32>,
    dc_frozen: Vec<Complex32>,
    angle_grid: Vec<Complex32>,
    angle_transpose: Vec<Complex32>,
    angle_magnitude: Vec<f32>,
    cycle_ring: CycleRing,
    // per-refresh buffers
    spectrum_buffer: Vec<Complex32>,
    magnitude_buffer: Vec<f32>,
    harmonic_buffer: Vec<f32>,
    peak_scratch: Vec<f32>,
    breath_histogram: Vec<f32>,
    heart_histogram: Vec<f32>,
    /// The breathing spectrum accumulated over all voting cells during the last refresh.
    pub breath_spectrum: Vec<f32>,
    /// The heart harmonic-product spectrum accumulated over all voting cells during the last refresh.
    pub heart_spectrum: Vec<f32>,
    cell_breath_peaks: Vec<usize>,
    cell_heart_peaks: Vec<[usize; 3]>,
}

impl VitalSignsPipeline {
    /// Builds a fully initialised pipeline with every buffer sized and both
    /// FFTs planned. Nothing allocates after construction.
    pub fn new(
        params: &VitalsParameters,
        geometry: &AntennaGeometry,
        config: &VitalsConfig,
    ) -> Result<Self, VitalsError>
    {
        config.validate().map_err(VitalsError::InvalidArg)?;
        assert!(geometry.nb_virtual_antennas() == params.nb_virtual_antennas, "Mismatching virtual antenna count between params {} and geometry {}", params.nb_virtual_antennas, geometry.nb_virtual_antennas());
        assert!(geometry.nb_rows <= params.nb_angle_fft && geometry.nb_cols <= params.nb_angle_fft, "Antenna grid {}x{} does not fit the {} point angle FFT", geometry.nb_rows, geometry.nb_cols, params.nb_angle_fft);

        let mut planner = FftPlanner::new();
        let angle_fft = planner.plan_fft_forward(params.nb_angle_fft);
        let spectrum_fft = planner.plan_fft_forward(params.nb_spectrum_fft);
        let scratch_len = usize::max(
            angle_fft.get_inplace_scratch_len(),
            spectrum_fft.get_inplace_scratch_len(),
        );

        let nb_angle_grid = params.nb_angle_fft * params.nb_angle_fft;
        let pipeline = Self {
            settings: VitalsSettings::default(),
            params: *params,
            geometry: geometry.clone(),
            config: *config,
            total_frames_read: 0,
            total_refreshes: 0,
            cycle_frame_index: 0,
            active_range_bin: 0,
            peak_row: 0,
            peak_col: 0,
            target_lost_count: 0,
            indicate_no_target: false,
            previous_heart_peaks: [0; 4],
            breathing_deviation: 0.0,
            latest_result: VitalSignsResult::default(),
            // fft
            angle_fft,
            spectrum_fft,
            fft_scratch: vec![Complex32::default(); scratch_len],
            // per-frame buffers
            extract_buffer: vec![Complex32::default(); params.nb_extract_samples],
            dc_accumulating: vec![Complex32::default(); params.nb_extract_samples],
            dc_frozen: vec![Complex32::default(); params.nb_extract_samples],
            angle_grid: vec![Complex32::default(); nb_angle_grid],
            angle_transpose: vec![Complex32::default(); nb_angle_grid],
            angle_magnitude: vec![0.0; nb_angle_grid],
            cycle_ring: CycleRing::new(params.nb_cycle_frames, params.nb_frame_cell_samples),
            // per-refresh buffers
            spectrum_buffer: vec![Complex32::default(); params.nb_spectrum_fft],
            magnitude_buffer: vec![0.0; params.nb_spectrum_fft],
            harmonic_buffer: vec![0.0; params.nb_harmonic_bins],
            peak_scratch: vec![0.0; params.nb_harmonic_bins],
            breath_histogram: vec![0.0; params.nb_spectrum_fft / 2],
            heart_histogram: vec![0.0; params.nb_harmonic_bins],
            breath_spectrum: vec![0.0; params.nb_spectrum_fft / 2],
            heart_spectrum: vec![0.0; params.nb_harmonic_bins],
            cell_breath_peaks: vec![0; params.nb_voting_cells],
            cell_heart_peaks: vec![[0; 3]; params.nb_voting_cells],
        };

        log::info!(
            "vital signs pipeline initialised: {} range cells, {} frame cycle, refresh every {} frames",
            params.nb_range_cells, params.nb_cycle_frames, params.nb_refresh_frames,
        );
        Ok(pipeline)
    }

    /// Replaces the configuration atomically and restarts the measurement.
    /// FFT plans and geometry are kept.
    pub fn update_config(&mut self, config: &VitalsConfig) -> Result<(), VitalsError> {
        config.validate().map_err(VitalsError::InvalidArg)?;
        self.config = *config;
        self.reset();
        Ok(())
    }

    /// Clears counters, peak tracking, history and every accumulation buffer.
    pub fn reset(&mut self) {
        self.total_frames_read = 0;
        self.total_refreshes = 0;
        self.cycle_frame_index = 0;
        self.active_range_bin = 0;
        self.peak_row = 0;
        self.peak_col = 0;
        self.target_lost_count = 0;
        self.indicate_no_target = false;
        self.previous_heart_peaks = [0; 4];
        self.breathing_deviation = 0.0;
        self.latest_result = VitalSignsResult::default();
        self.extract_buffer.fill(Complex32::default());
        self.dc_accumulating.fill(Complex32::default());
        self.dc_frozen.fill(Complex32::default());
        self.angle_grid.fill(Complex32::default());
        self.angle_transpose.fill(Complex32::default());
        self.angle_magnitude.fill(0.0);
        self.cycle_ring.reset();
        self.breath_spectrum.fill(0.0);
        self.heart_spectrum.fill(0.0);
        self.cell_breath_peaks.fill(0);
        self.cell_heart_peaks.fill([0; 3]);
        log::info!("vital signs pipeline reset");
    }

    /// Consumes one radar frame. The extraction, DC tracking and angle
    /// stages run every frame; the phase, spectrum and decision stages run
    /// inline whenever the frame counter crosses a refresh boundary.
    pub fn process_frame(&mut self, cube: &RadarCubeSlice, hint_bin: usize) -> Result<(), VitalsError> {
        if !self.config.enabled {
            return Ok(());
        }
        if cube.nb_range_bins <= self.params.nb_range_cells {
            return Err(VitalsError::InvalidArg("radar cube must contain more range bins than the extraction window"));
        }
        if cube.nb_virtual_antennas < self.params.nb_virtual_antennas {
            return Err(VitalsError::InvalidArg("radar cube carries fewer virtual antennas than the angle grid"));
        }

        let hint = match self.config.tracker_integration {
            true => hint_bin,
            false => self.config.range_bin_start as usize,
        };
        self.extract_range_window(cube, hint);
        self.track_dc();
        self.run_angle_stage();

        self.total_frames_read += 1;
        self.cycle_frame_index = (self.cycle_frame_index + 1) % self.params.nb_cycle_frames;
        if self.cycle_frame_index % self.params.nb_refresh_frames == 0 {
            self.run_phase_and_spectrum_stages();
            self.run_decision_stage();
            self.total_refreshes += 1;
        }
        Ok(())
    }

    /// Copies out the latest published result record.
    pub fn output(&self) -> VitalSignsResult {
        self.latest_result
    }

    pub fn is_output_ready(&self) -> bool {
        self.total_refreshes >= self.settings.warmup_refreshes && self.latest_result.valid
    }

    /// Current arg-max of the accumulated angle spectrum as (row, col).
    pub fn angle_peak(&self) -> (usize, usize) {
        (self.peak_row, self.peak_col)
    }

    pub fn active_range_bin(&self) -> usize {
        self.active_range_bin
    }

    pub fn config(&self) -> &VitalsConfig {
        &self.config
    }

    /// Tracks upstream target visibility. Consecutive losses beyond the
    /// persistence threshold invalidate the published output until the
    /// target is seen again. Returns whether the target is still considered
    /// present.
    pub fn handle_target_loss(&mut self, lost: bool) -> bool {
        if lost {
            self.target_lost_count = self.target_lost_count.saturating_add(1);
            if self.target_lost_count >= self.settings.target_loss_persistence && !self.indicate_no_target {
                self.indicate_no_target = true;
                self.latest_result = VitalSignsResult::default();
                log::warn!("target lost for {} frames, output invalidated", self.target_lost_count);
            }
        } else {
            if self.indicate_no_target {
                log::info!("target reacquired");
            }
            self.target_lost_count = 0;
            self.indicate_no_target = false;
        }
        !self.indicate_no_target
    }

    /// Copies the extraction window out of the cube, centring it on the hint
    /// bin while keeping it inside the cube.
    fn extract_range_window(&mut self, cube: &RadarCubeSlice, hint_bin: usize) {
        let half_window = self.params.nb_range_cells / 2;
        let last_start = cube.nb_range_bins - self.params.nb_range_cells;
        let start_bin = usize::min(hint_bin.saturating_sub(half_window), last_start);
        self.active_range_bin = usize::min(hint_bin, cube.nb_range_bins - 1);

        for range in 0..self.params.nb_range_cells {
            for antenna in 0..self.params.nb_virtual_antennas {
                let index = range * self.params.nb_virtual_antennas + antenna;
                self.extract_buffer[index] = cube.sample(start_bin + range, antenna);
            }
        }
    }

    /// Long-horizon mean tracking with two named halves. The accumulating
    /// half collects the running sum; the frozen half holds the mean of the
    /// previous cycle and is subtracted from every fresh extract, so a frame
    /// is never corrected with a mean it contributed to.
    fn track_dc(&mut self) {
        for (sum, frozen, sample) in izip!(
            self.dc_accumulating.iter_mut(),
            self.dc_frozen.iter(),
            self.extract_buffer.iter_mut(),
        ) {
            *sum += *sample;
            *sample -= *frozen;
        }

        if self.cycle_frame_index == self.params.nb_cycle_frames - 1 {
            let scale = 1.0 / self.params.nb_cycle_frames as f32;
            for value in self.dc_accumulating.iter_mut() {
                *value = *value * scale;
            }
            std::mem::swap(&mut self.dc_accumulating, &mut self.dc_frozen);
            self.dc_accumulating.fill(Complex32::default());
            log::debug!("frame {}: DC estimate refreshed", self.total_frames_read);
        }
    }

    /// Two-dimensional angle FFT per range cell: azimuth across the grid
    /// columns, elevation across the rows of the transposed row spectra.
    /// The magnitude of every cell accumulates over the cycle and the 3x3
    /// neighborhood of the tracked peak is saved into the cycle ring.
    fn run_angle_stage(&mut self) {
        let nb_angle = self.params.nb_angle_fft;
        for range in 0..self.params.nb_range_cells {
            // Rows beyond the physical array stay zero from construction.
            self.angle_grid[..self.geometry.nb_rows * nb_angle].fill(Complex32::default());
            for antenna in 0..self.params.nb_virtual_antennas {
                let (row, col) = self.geometry.position(antenna);
                let extract_index = range * self.params.nb_virtual_antennas + antenna;
                self.angle_grid[row * nb_angle + col] = self.extract_buffer[extract_index];
            }

            for row in 0..self.geometry.nb_rows {
                let spectrum = &mut self.angle_grid[row * nb_angle..(row + 1) * nb_angle];
                self.angle_fft.process_with_scratch(spectrum, &mut self.fft_scratch);
            }
            for col in 0..nb_angle {
                for row in 0..nb_angle {
                    self.angle_transpose[col * nb_angle + row] = self.angle_grid[row * nb_angle + col];
                }
            }
            for col in 0..nb_angle {
                let spectrum = &mut self.angle_transpose[col * nb_angle..(col + 1) * nb_angle];
                self.angle_fft.process_with_scratch(spectrum, &mut self.fft_scratch);
            }

            // Spectrum cell (row, col) now lives at angle_transpose[col * nb_angle + row].
            for row in 0..nb_angle {
                for col in 0..nb_angle {
                    self.angle_magnitude[row * nb_angle + col] += self.angle_transpose[col * nb_angle + row].norm_sqr();
                }
            }

            let neighborhood = toroidal_neighborhood(self.peak_row, self.peak_col, nb_angle);
            let frame_cell_base = range * self.params.nb_angle_cells;
            for (cell, &(row, col)) in neighborhood.iter().enumerate() {
                let value = self.angle_transpose[col * nb_angle + row];
                self.cycle_ring.write(self.cycle_frame_index, frame_cell_base + cell, value);
            }
        }

        // The peak settles at the cycle wrap; one extra probe early in the
        // very first cycle replaces the cold-start peak at (0, 0) quickly.
        let cycle_end = self.cycle_frame_index == self.params.nb_cycle_frames - 1;
        let startup_probe = self.total_refreshes == 0 && self.cycle_frame_index == 1;
        if cycle_end || startup_probe {
            self.update_angle_peak();
        }
    }

    fn update_angle_peak(&mut self) {
        let nb_angle = self.params.nb_angle_fft;
        let peak = calculate_argmax(&self.angle_magnitude);
        self.peak_row = peak / nb_angle;
        self.peak_col = peak % nb_angle;
        self.angle_magnitude.fill(0.0);
        log::debug!("angle peak tracked at ({}, {})", self.peak_row, self.peak_col);
    }

    /// Runs the phase and spectrum stages for every tracked (angle, range)
    /// cell and accumulates the diagnostic spectra for the decision stage.
    fn run_phase_and_spectrum_stages(&mut self) {
        self.breath_spectrum.fill(0.0);
        self.heart_spectrum.fill(0.0);

        for angle in 0..self.params.nb_angle_cells {
            for range in 0..self.params.nb_range_cells {
                let frame_cell = range * self.params.nb_angle_cells + angle;
                self.fill_residual_series(frame_cell);
                if angle == self.settings.deviation_angle_cell && range == self.settings.deviation_range_cell {
                    self.breathing_deviation = self.calculate_deviation();
                }
                let voting_cell = range + angle * self.params.nb_range_cells;
                self.run_spectrum_stage(voting_cell);
            }
        }
    }

    /// Reads one cell's cycle of complex samples, recovers the unwrapped
    /// phase and writes its first differences into the spectrum input,
    /// zero-padded up to the FFT length.
    fn fill_residual_series(&mut self, frame_cell: usize) {
        self.spectrum_buffer.fill(Complex32::default());
        let mut series = self.cycle_ring.series(self.cycle_frame_index, frame_cell);
        let first = series.next().expect("The cycle ring cannot be empty");
        let mut previous_unwrapped = sample_phase(first);
        let mut unwrapper = PhaseUnwrapper::new(previous_unwrapped);
        for (index, sample) in series.enumerate() {
            let unwrapped = unwrapper.advance(sample_phase(sample));
            self.spectrum_buffer[index].re = unwrapped - previous_unwrapped;
            previous_unwrapped = unwrapped;
        }
    }

    /// Variance of the reference-cell residual window, E[x^2] - E[x]^2.
    fn calculate_deviation(&self) -> f32 {
        let start = self.settings.deviation_window_start;
        let length = self.settings.deviation_window_length;
        calculate_real_variance(&self.spectrum_buffer[start..start + length])
    }

    /// Spectrum stage for one cell: breathing band peak on the magnitude
    /// spectrum and three harmonic-product peaks for the heart vote.
    fn run_spectrum_stage(&mut self, voting_cell: usize) {
        self.spectrum_fft.process_with_scratch(&mut self.spectrum_buffer, &mut self.fft_scratch);
        for (magnitude, value) in izip!(self.magnitude_buffer.iter_mut(), self.spectrum_buffer.iter()) {
            *magnitude = value.norm_sqr();
        }

        for (sum, magnitude) in izip!(self.breath_spectrum.iter_mut(), self.magnitude_buffer.iter()) {
            *sum += *magnitude;
        }
        let breath_peak = calculate_band_peak(
            &self.magnitude_buffer,
            self.settings.breath_band_low,
            self.settings.breath_band_high,
        );

        // The harmonic product S[2k]*S[k] suppresses breathing harmonics that
        // leak into the heart band but lack a partner at twice the frequency.
        for bin in 0..self.params.nb_harmonic_bins {
            self.harmonic_buffer[bin] = self.magnitude_buffer[2 * bin] * self.magnitude_buffer[bin];
        }
        for (sum, product) in izip!(self.heart_spectrum.iter_mut(), self.harmonic_buffer.iter()) {
            *sum += *product;
        }

        let mut heart_peaks = [0usize; 3];
        for slot in heart_peaks.iter_mut() {
            let peak = calculate_band_peak(
                &self.harmonic_buffer,
                self.settings.heart_band_low,
                self.settings.heart_band_high,
            );
            *slot = peak;
            zero_peak_neighborhood(&mut self.harmonic_buffer, peak);
        }

        self.cell_breath_peaks[voting_cell] = breath_peak;
        self.cell_heart_peaks[voting_cell] = heart_peaks;
    }

    /// Fuses the per-cell votes into one published record. Both rates come
    /// from histogram voting; the heart bin additionally passes through the
    /// history correlation and the jump limiter.
    fn run_decision_stage(&mut self) {
        let breath_hist_index = {
            self.breath_histogram.fill(0.0);
            for &peak in &self.cell_breath_peaks {
                self.breath_histogram[peak] += 1.0;
            }
            calculate_band_peak(
                &self.breath_histogram,
                self.settings.breath_band_low,
                self.settings.breath_band_high,
            )
        };

        // Only the centre range cells take part in the heart vote; the edge
        // cells of the extraction window are discarded.
        let nb_range = self.params.nb_range_cells;
        for angle in 0..self.params.nb_angle_cells {
            self.cell_heart_peaks[angle * nb_range] = [0; 3];
            self.cell_heart_peaks[angle * nb_range + nb_range - 1] = [0; 3];
        }
        self.heart_histogram.fill(0.0);
        for peaks in &self.cell_heart_peaks {
            self.heart_histogram[peaks[0]] += 1.0;
            self.heart_histogram[peaks[1]] += 1.0;
        }
        let heart_hist_index = calculate_band_peak_with_radius(
            &self.heart_histogram,
            self.settings.heart_band_low,
            self.settings.heart_band_high,
            2,
        );

        // Prefer the accumulated spectrum peak closest to the oldest history
        // entry; fall back to the histogram winner when nothing correlates.
        self.peak_scratch.copy_from_slice(&self.heart_spectrum);
        let mut present_peaks = [0usize; 5];
        for slot in present_peaks.iter_mut() {
            let peak = calculate_band_peak(
                &self.peak_scratch,
                self.settings.heart_band_low,
                self.settings.heart_band_high,
            );
            *slot = peak;
            zero_peak_neighborhood(&mut self.peak_scratch, peak);
        }
        let reference = self.previous_heart_peaks[3];
        let mut matched_peak = present_peaks[0];
        let mut matched_distance = usize::MAX;
        for &candidate in &present_peaks {
            let distance = candidate.abs_diff(reference);
            if distance < matched_distance {
                matched_distance = distance;
                matched_peak = candidate;
            }
        }
        let mut heart_peak = match matched_distance < self.settings.history_match_distance {
            true => matched_peak,
            false => heart_hist_index,
        };

        if self.total_refreshes > self.settings.warmup_refreshes {
            let previous = self.previous_heart_peaks[0];
            if heart_peak.abs_diff(previous) > self.settings.max_heart_jump {
                heart_peak = match heart_peak > previous {
                    true => previous + self.settings.max_heart_jump,
                    false => previous - self.settings.max_heart_jump,
                };
            }
        }

        if self.total_refreshes == 0 {
            self.previous_heart_peaks = [0; 4];
        }
        if self.total_refreshes > 4 {
            self.previous_heart_peaks[3] = self.previous_heart_peaks[2];
            self.previous_heart_peaks[2] = self.previous_heart_peaks[1];
            self.previous_heart_peaks[1] = self.previous_heart_peaks[0];
            self.previous_heart_peaks[0] = heart_peak;
        }

        let warm = self.total_refreshes >= self.settings.warmup_refreshes;
        self.latest_result = match warm && !self.indicate_no_target {
            true => VitalSignsResult {
                id: match self.config.tracker_integration {
                    true => self.config.target_id as u16,
                    false => 0,
                },
                range_bin: self.active_range_bin as u16,
                heart_rate_bpm: heart_peak as f32 * self.settings.bpm_per_bin,
                breathing_rate_bpm: breath_hist_index as f32 * self.settings.bpm_per_bin,
                breathing_deviation: self.breathing_deviation,
                valid: true,
            },
            false => VitalSignsResult::default(),
        };
        log::debug!(
            "refresh {}: breath bin {}, heart bin {}, valid {}",
            self.total_refreshes, breath_hist_index, heart_peak, self.latest_result.valid,
        );
    }
}

/// Converts a cartesian target position into its range bin.
/// Returns bin zero when the range resolution is degenerate.
pub fn range_bin_from_position(x_metres: f32, y_metres: f32, range_resolution_metres: f32) -> usize {
    if range_resolution_metres <= 0.0 {
        return 0;
    }
    let range = (x_metres * x_metres + y_metres * y_metres).sqrt();
    (range / range_resolution_metres).floor() as usize
}

fn calculate_argmax(values: &[f32]) -> usize {
    let mut peak_index = 0;
    let mut peak_value = f32::MIN;
    for (index, &value) in values.iter().enumerate() {
        if value > peak_value {
            peak_value = value;
            peak_index = index;
        }
    }
    peak_index
}

/// Finds the strongest peak inside [band_low, band_high) by the sum of the
/// bins within the tap radius, clamped at the array edges. Returns bin zero
/// when the band carries no energy, so a quiet scene reports a zero rate.
fn calculate_band_peak_with_radius(spectrum: &[f32], band_low: usize, band_high: usize, radius: usize) -> usize {
    let mut peak_index = 0;
    let mut peak_sum = 0.0f32;
    for bin in band_low..usize::min(band_high, spectrum.len()) {
        let tap_low = bin.saturating_sub(radius);
        let tap_high = usize::min(bin + radius, spectrum.len() - 1);
        let sum: f32 = spectrum[tap_low..=tap_high].iter().sum();
        if sum > peak_sum {
            peak_sum = sum;
            peak_index = bin;
        }
    }
    peak_index
}

fn calculate_band_peak(spectrum: &[f32], band_low: usize, band_high: usize) -> usize {
    calculate_band_peak_with_radius(spectrum, band_low, band_high, 1)
}

fn zero_peak_neighborhood(spectrum: &mut [f32], peak: usize) {
    let low = peak.saturating_sub(1);
    let high = usize::min(peak + 1, spectrum.len() - 1);
    for value in &mut spectrum[low..=high] {
        *value = 0.0;
    }
}

fn calculate_real_variance(samples: &[Complex32]) -> f32 {
    let length = samples.len() as f32;
    let (sum, square_sum) = samples
        .iter()
        .fold((0.0f32, 0.0f32), |(sum, square_sum), value| {
            (sum + value.re, square_sum + value.re * value.re)
        });
    let mean = sum / length;
    square_sum / length - mean * mean
}
