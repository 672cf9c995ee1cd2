/// Maps virtual antenna indices onto the two-dimensional angle-FFT grid.
///
/// Positions are expressed in half-wavelength units as (row, col) pairs with
/// rows along elevation and columns along azimuth. The geometry is the only
/// authority on this mapping; nothing else in the pipeline assumes a
/// particular array shape.
#[derive(Debug, Clone)]
pub struct AntennaGeometry {
    positions: Vec<(usize, usize)>,
    /// Number of occupied rows in the angle grid.
    pub nb_rows: usize,
    /// Number of occupied columns in the angle grid.
    pub nb_cols: usize,
    /// Number of transmit antennas.
    pub nb_tx_antennas: usize,
    /// Number of receive antennas.
    pub nb_rx_antennas: usize,
}

impl AntennaGeometry {
    pub fn new(
        positions: &[(usize, usize)],
        nb_rows: usize,
        nb_cols: usize,
        nb_tx_antennas: usize,
        nb_rx_antennas: usize,
    ) -> Self
    {
        assert!(positions.len() == nb_tx_antennas * nb_rx_antennas, "Virtual antenna count {} must be the product of {} TX and {} RX antennas", positions.len(), nb_tx_antennas, nb_rx_antennas);
        for &(row, col) in positions {
            assert!(row < nb_rows && col < nb_cols, "Antenna position ({}, {}) falls outside the {}x{} grid", row, col, nb_rows, nb_cols);
        }

        Self {
            positions: positions.to_vec(),
            nb_rows,
            nb_cols,
            nb_tx_antennas,
            nb_rx_antennas,
        }
    }

    pub fn nb_virtual_antennas(&self) -> usize {
        self.positions.len()
    }

    /// Grid position of one virtual antenna.
    pub fn position(&self, antenna: usize) -> (usize, usize) {
        self.positions[antenna]
    }
}

/// Yields the nine grid positions of the 3x3 neighborhood around (row, col)
/// in row-major order, wrapping toroidally at the grid edges.
pub fn toroidal_neighborhood(row: usize, col: usize, grid_size: usize) -> [(usize, usize); 9] {
    let wrap = |index: usize, step: usize| (index + grid_size + step - 1) % grid_size;
    let mut neighborhood = [(0usize, 0usize); 9];
    for row_step in 0..3 {
        for col_step in 0..3 {
            neighborhood[row_step * 3 + col_step] = (wrap(row, row_step), wrap(col, col_step));
        }
    }
    neighborhood
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighborhood_wraps_at_the_origin() {
        let neighborhood = toroidal_neighborhood(0, 0, 16);
        assert_eq!(neighborhood, [
            (15, 15), (15, 0), (15, 1),
            ( 0, 15), ( 0, 0), ( 0, 1),
            ( 1, 15), ( 1, 0), ( 1, 1),
        ]);
    }

    #[test]
    fn neighborhood_wraps_at_the_far_corner() {
        let neighborhood = toroidal_neighborhood(15, 15, 16);
        assert_eq!(neighborhood, [
            (14, 14), (14, 15), (14, 0),
            (15, 14), (15, 15), (15, 0),
            ( 0, 14), ( 0, 15), ( 0, 0),
        ]);
    }

    #[test]
    fn interior_neighborhood_is_row_major() {
        let neighborhood = toroidal_neighborhood(7, 4, 16);
        assert_eq!(neighborhood[0], (6, 3));
        assert_eq!(neighborhood[4], (7, 4));
        assert_eq!(neighborhood[8], (8, 5));
    }
}
