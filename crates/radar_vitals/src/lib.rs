pub mod awr_antenna_geometry;
pub mod awr_vitals_parameters;
