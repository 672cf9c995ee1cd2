/// Describes the structure of one vital-signs measurement cycle.
///
/// A cycle accumulates a fixed number of radar frames. Every frame
/// contributes one range-window extract to the angle stage, and several
/// times per cycle the accumulated phase series of the tracked angle cells
/// is transformed into breathing and heart estimates.
///
/// # Diagram
/// ```text
/// | Cycle                                        |
/// | refresh | refresh | refresh | refresh        |
/// | frame*M | frame*M | frame*M | frame*M        |
/// ```
#[derive(Debug, Clone, Copy)]
pub struct VitalsParameters {
    /// Number of range bins in the extraction window.
    pub nb_range_cells: usize,
    /// Number of virtual antennas feeding the angle grid.
    pub nb_virtual_antennas: usize,
    /// Number of frames accumulated per cycle.
    pub nb_cycle_frames: usize,
    /// Number of frames between two spectrum refreshes.
    pub nb_refresh_frames: usize,
    /// Size of the two-dimensional angle FFT along each axis.
    pub nb_angle_fft: usize,
    /// Number of angle cells tracked around the angle peak (a 3x3 neighborhood).
    pub nb_angle_cells: usize,
    /// Size of the phase spectrum FFT.
    pub nb_spectrum_fft: usize,
    /// Number of complex samples in one frame extract.
    pub nb_extract_samples: usize,
    /// Number of complex samples stored into the cycle ring per frame.
    pub nb_frame_cell_samples: usize,
    /// Number of complex samples in the full cycle ring.
    pub nb_cycle_samples: usize,
    /// Number of (angle, range) cells voting per refresh.
    pub nb_voting_cells: usize,
    /// Number of bins in the harmonic product spectrum.
    pub nb_harmonic_bins: usize,
}

impl VitalsParameters {
    /// Creates all derived parameters for the pipeline from a required subset.
    pub fn new(
        nb_range_cells: usize,
        nb_virtual_antennas: usize,
        nb_cycle_frames: usize,
        nb_refresh_frames: usize,
        nb_angle_fft: usize,
        nb_angle_cells: usize,
        nb_spectrum_fft: usize,
    ) -> Self
    {
        assert!(nb_range_cells >= 1, "Extraction window must hold at least one range cell");
        assert!(nb_virtual_antennas >= 1, "Angle grid needs at least one virtual antenna");
        assert!(nb_angle_cells == 9, "Angle cell count must match the 3x3 peak neighborhood");
        assert!(nb_refresh_frames >= 1 && nb_cycle_frames % nb_refresh_frames == 0, "Cycle length must be a whole number of refresh intervals");
        assert!(nb_spectrum_fft >= nb_cycle_frames, "Spectrum FFT must fit one cycle of phase samples");
        assert!(nb_spectrum_fft % 4 == 0, "Harmonic product needs a spectrum FFT length divisible by 4");

        let nb_extract_samples = nb_range_cells * nb_virtual_antennas;
        let nb_frame_cell_samples = nb_range_cells * nb_angle_cells;
        let nb_cycle_samples = nb_cycle_frames * nb_frame_cell_samples;
        let nb_voting_cells = nb_frame_cell_samples;
        let nb_harmonic_bins = nb_spectrum_fft / 4;

        Self {
            nb_range_cells,
            nb_virtual_antennas,
            nb_cycle_frames,
            nb_refresh_frames,
            nb_angle_fft,
            nb_angle_cells,
            nb_spectrum_fft,
            nb_extract_samples,
            nb_frame_cell_samples,
            nb_cycle_samples,
            nb_voting_cells,
            nb_harmonic_bins,
        }
    }
}
