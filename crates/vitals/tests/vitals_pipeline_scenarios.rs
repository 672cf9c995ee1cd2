use vitals::antenna_geometry::AntennaGeometry;
use vitals::radar_cube::RadarCubeSlice;
use vitals::vitals_error::VitalsError;
use vitals::vitals_parameters::VitalsParameters;
use vitals::vitals_pipeline::VitalSignsPipeline;
use radar_core::vitals_config::{VitalsConfig, TARGET_ID_NEAREST};
use std::f32::consts::PI;

const NB_BINS: usize = 32;
const NB_CHIRPS: usize = 4;
const NB_VA: usize = 12;
const HINT_BIN: usize = 12;
// The extraction window around the hint covers bins 10..15; bin 13 maps onto
// range cell 3, the reference cell of the breathing-deviation estimate.
const TONE_BIN: usize = 13;
const FRAMES_PER_REFRESH: usize = 32;
const BPM_PER_BIN: f32 = 0.882;

fn make_parameters() -> VitalsParameters {
    VitalsParameters::new(5, 12, 128, 32, 16, 9, 512)
}

fn make_geometry() -> AntennaGeometry {
    let positions: Vec<(usize, usize)> = (0..12).map(|antenna| (antenna / 4, antenna % 4)).collect();
    AntennaGeometry::new(&positions, 3, 4, 3, 4)
}

fn make_config() -> VitalsConfig {
    VitalsConfig {
        enabled: true,
        tracker_integration: false,
        target_id: TARGET_ID_NEAREST,
        range_bin_start: HINT_BIN as u16,
        nb_range_bins: 5,
        range_resolution_metres: 0.043,
    }
}

fn make_pipeline(config: &VitalsConfig) -> VitalSignsPipeline {
    VitalSignsPipeline::new(&make_parameters(), &make_geometry(), config).unwrap()
}

fn empty_frame() -> Vec<i16> {
    vec![0i16; NB_BINS * NB_VA * 2]
}

fn set_sample(frame: &mut [i16], bin: usize, antenna: usize, real: i16, imag: i16) {
    let offset = (bin * NB_VA + antenna) * 2;
    frame[offset] = imag;
    frame[offset + 1] = real;
}

/// A phase-modulated return at the tone bin across every virtual antenna.
/// Component frequencies are expressed in bins of the 512 point spectrum,
/// so a component at bin k lands its residual energy on spectrum bin k.
fn phase_tone_frame(frame_index: usize, components: &[(f32, f32)]) -> Vec<i16> {
    let time = frame_index as f32;
    let mut phase = 0.0f32;
    for &(bin_frequency, depth) in components {
        phase += depth * (2.0 * PI * bin_frequency * time / 512.0).sin();
    }
    let amplitude = 8000.0f32;
    let real = (amplitude * phase.cos()).round() as i16;
    let imag = (amplitude * phase.sin()).round() as i16;

    let mut frame = empty_frame();
    for antenna in 0..NB_VA {
        set_sample(&mut frame, TONE_BIN, antenna, real, imag);
    }
    frame
}

fn process(pipeline: &mut VitalSignsPipeline, frame: &[i16]) {
    let cube = RadarCubeSlice::new(frame, NB_BINS, NB_CHIRPS, NB_VA).unwrap();
    pipeline.process_frame(&cube, HINT_BIN).unwrap();
}

fn run_tone(pipeline: &mut VitalSignsPipeline, components: &[(f32, f32)], nb_frames: usize, time_offset: usize) {
    for frame_index in 0..nb_frames {
        let frame = phase_tone_frame(frame_index + time_offset, components);
        process(pipeline, &frame);
    }
}

fn heart_bin(result_bpm: f32) -> f32 {
    result_bpm / BPM_PER_BIN
}

#[test]
fn constant_input_settles_to_zero_rates() {
    let mut pipeline = make_pipeline(&make_config());
    let mut frame = empty_frame();
    set_sample(&mut frame, HINT_BIN, 0, 5000, 3000);

    // Ten refreshes cover the warm-up and a full DC freeze.
    for _ in 0..10 * FRAMES_PER_REFRESH {
        process(&mut pipeline, &frame);
    }

    let result = pipeline.output();
    assert!(result.valid);
    assert!(pipeline.is_output_ready());
    assert_eq!(result.breathing_rate_bpm, 0.0);
    assert_eq!(result.heart_rate_bpm, 0.0);
    assert_eq!(result.breathing_deviation, 0.0);
    assert_eq!(result.range_bin, HINT_BIN as u16);
    // A frozen DC estimate leaves the extract exactly zero, so no spectral
    // energy may survive anywhere.
    assert!(pipeline.breath_spectrum.iter().all(|&value| value == 0.0));
    assert!(pipeline.heart_spectrum.iter().all(|&value| value == 0.0));
}

#[test]
fn output_is_suppressed_during_warmup() {
    let mut pipeline = make_pipeline(&make_config());
    let components = [(17.0, 2.4)];
    for refresh in 0..7 {
        run_tone(&mut pipeline, &components, FRAMES_PER_REFRESH, refresh * FRAMES_PER_REFRESH);
        let result = pipeline.output();
        assert!(!result.valid, "refresh {} should still be warming up", refresh);
        assert!(!pipeline.is_output_ready());
        assert_eq!(result.breathing_rate_bpm, 0.0);
        assert_eq!(result.heart_rate_bpm, 0.0);
        assert_eq!(result.range_bin, 0);
    }
    run_tone(&mut pipeline, &components, FRAMES_PER_REFRESH, 7 * FRAMES_PER_REFRESH);
    assert!(pipeline.output().valid);
    assert!(pipeline.is_output_ready());
}

#[test]
fn breathing_tone_is_recovered_within_one_bin() {
    let mut pipeline = make_pipeline(&make_config());
    // A breathing motion whose phase swings at spectrum bin 17.
    run_tone(&mut pipeline, &[(17.0, 2.4)], 16 * FRAMES_PER_REFRESH, 0);

    let result = pipeline.output();
    assert!(result.valid);
    let expected = 17.0 * BPM_PER_BIN;
    assert!(
        (result.breathing_rate_bpm - expected).abs() <= 1.05 * BPM_PER_BIN,
        "breathing rate {} BPM is not within one bin of {} BPM",
        result.breathing_rate_bpm, expected,
    );
    // Whatever leaks into the heart band must stay inside it.
    let heart = heart_bin(result.heart_rate_bpm).round() as usize;
    assert!(heart == 0 || (68..128).contains(&heart), "heart bin {} escaped its band", heart);
    assert!(result.breathing_deviation > 0.0);
}

#[test]
fn heart_tone_is_recovered_within_one_bin() {
    let mut pipeline = make_pipeline(&make_config());
    // A heart motion at spectrum bin 82 with a second harmonic so the
    // harmonic product sees a partner at bin 164.
    run_tone(&mut pipeline, &[(82.0, 1.2), (164.0, 0.4)], 20 * FRAMES_PER_REFRESH, 0);

    let result = pipeline.output();
    assert!(result.valid);
    let expected = 82.0 * BPM_PER_BIN;
    assert!(
        (result.heart_rate_bpm - expected).abs() <= 1.05 * BPM_PER_BIN,
        "heart rate {} BPM is not within one bin of {} BPM",
        result.heart_rate_bpm, expected,
    );
}

#[test]
fn target_loss_persists_then_recovers() {
    let mut pipeline = make_pipeline(&make_config());
    let components = [(17.0, 2.4)];
    run_tone(&mut pipeline, &components, 10 * FRAMES_PER_REFRESH, 0);
    assert!(pipeline.output().valid);

    // The last published result survives while the loss counter runs.
    let mut time = 10 * FRAMES_PER_REFRESH;
    for notification in 0..49 {
        let frame = phase_tone_frame(time, &components);
        process(&mut pipeline, &frame);
        time += 1;
        assert!(pipeline.handle_target_loss(true), "notification {} tripped early", notification);
    }
    assert!(pipeline.output().valid);
    assert!(!pipeline.handle_target_loss(true));

    let result = pipeline.output();
    assert!(!result.valid);
    assert_eq!(result.breathing_rate_bpm, 0.0);
    assert_eq!(result.heart_rate_bpm, 0.0);
    assert_eq!(result.breathing_deviation, 0.0);
    assert_eq!(result.range_bin, 0);

    // Seeing the target again restores a valid output within one refresh.
    assert!(pipeline.handle_target_loss(false));
    run_tone(&mut pipeline, &components, FRAMES_PER_REFRESH, time);
    assert!(pipeline.output().valid);
}

#[test]
fn heart_estimate_slews_within_the_jump_limit() {
    let mut pipeline = make_pipeline(&make_config());
    run_tone(&mut pipeline, &[(90.0, 1.2), (180.0, 0.4)], 16 * FRAMES_PER_REFRESH, 0);
    let settled = heart_bin(pipeline.output().heart_rate_bpm);
    assert!((settled - 90.0).abs() <= 1.05, "settled heart bin {} is off the tone", settled);

    // The tone jumps to bin 120; the published estimate may only slew.
    let mut previous = settled;
    for refresh in 0..16 {
        run_tone(&mut pipeline, &[(120.0, 1.2), (240.0, 0.4)], FRAMES_PER_REFRESH, refresh * FRAMES_PER_REFRESH);
        let current = heart_bin(pipeline.output().heart_rate_bpm);
        assert!(
            (current - previous).abs() <= 12.05,
            "refresh {}: heart bin moved {} -> {}",
            refresh, previous, current,
        );
        previous = current;
    }
    assert!((previous - 120.0).abs() <= 1.05, "heart bin {} did not converge onto the new tone", previous);
}

#[test]
fn identical_streams_produce_identical_results() {
    let config = make_config();
    let mut first = make_pipeline(&config);
    let mut second = make_pipeline(&config);
    let components = [(17.0, 2.4), (82.0, 0.9)];
    for frame_index in 0..10 * FRAMES_PER_REFRESH {
        let frame = phase_tone_frame(frame_index, &components);
        process(&mut first, &frame);
        process(&mut second, &frame);
    }
    assert_eq!(first.output(), second.output());
    assert_eq!(first.breath_spectrum, second.breath_spectrum);
    assert_eq!(first.heart_spectrum, second.heart_spectrum);
    assert_eq!(first.angle_peak(), second.angle_peak());
}

#[test]
fn disabled_pipeline_consumes_frames_without_processing() {
    let mut config = make_config();
    config.enabled = false;
    let mut pipeline = make_pipeline(&config);
    run_tone(&mut pipeline, &[(17.0, 2.4)], 8 * FRAMES_PER_REFRESH, 0);
    assert_eq!(pipeline.total_frames_read, 0);
    assert_eq!(pipeline.total_refreshes, 0);
    assert!(!pipeline.output().valid);
}

#[test]
fn degenerate_cubes_are_rejected() {
    let mut pipeline = make_pipeline(&make_config());
    let frame = empty_frame();

    let small_cube = RadarCubeSlice::new(&frame[..5 * NB_VA * 2], 5, NB_CHIRPS, NB_VA).unwrap();
    assert_eq!(
        pipeline.process_frame(&small_cube, HINT_BIN),
        Err(VitalsError::InvalidArg("radar cube must contain more range bins than the extraction window")),
    );

    let narrow_cube = RadarCubeSlice::new(&frame, NB_BINS, NB_CHIRPS, 8).unwrap();
    assert!(pipeline.process_frame(&narrow_cube, HINT_BIN).is_err());
}

#[test]
fn invalid_configurations_are_rejected() {
    let mut config = make_config();
    config.target_id = 252;
    assert!(VitalSignsPipeline::new(&make_parameters(), &make_geometry(), &config).is_err());

    let mut pipeline = make_pipeline(&make_config());
    config.target_id = 3;
    config.range_resolution_metres = -1.0;
    assert!(pipeline.update_config(&config).is_err());
}

#[test]
fn config_update_restarts_the_measurement() {
    let mut pipeline = make_pipeline(&make_config());
    run_tone(&mut pipeline, &[(17.0, 2.4)], 10 * FRAMES_PER_REFRESH, 0);
    assert!(pipeline.output().valid);

    pipeline.update_config(&make_config()).unwrap();
    assert_eq!(pipeline.total_frames_read, 0);
    assert_eq!(pipeline.total_refreshes, 0);
    assert!(!pipeline.output().valid);
    assert!(!pipeline.is_output_ready());
}

#[test]
fn tracker_integration_forwards_the_target_id_and_hint() {
    let mut config = make_config();
    config.tracker_integration = true;
    config.target_id = 7;
    config.range_bin_start = 0;
    let mut pipeline = make_pipeline(&config);
    // The hint argument selects the window when a tracker is integrated.
    run_tone(&mut pipeline, &[(17.0, 2.4)], 10 * FRAMES_PER_REFRESH, 0);

    let result = pipeline.output();
    assert!(result.valid);
    assert_eq!(result.id, 7);
    assert_eq!(result.range_bin, HINT_BIN as u16);
}
