use vitals::radar_cube::RadarCubeSlice;
use vitals::vitals_pipeline::VitalSignsPipeline;
use radar_core::vitals_config::{VitalsConfig, TARGET_ID_NEAREST};
use radar_vitals::awr_antenna_geometry::get_awr_antenna_geometry;
use radar_vitals::awr_vitals_parameters::get_awr_vitals_parameters;
use std::io::{Read, Write, BufWriter, ErrorKind};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct AppArguments {
    /// Input filepath of raw Q15 cube frames. If not provided uses stdin by default.
    #[arg(short, long)]
    input_filepath: Option<String>,
    /// Output filepath for 20 byte result records. If not provided uses stdout by default.
    #[arg(short, long)]
    output_filepath: Option<String>,
    /// Number of range bins in each cube frame
    #[arg(long, default_value_t = 64)]
    number_of_range_bins: usize,
    /// Number of chirps in each cube frame
    #[arg(long, default_value_t = 1)]
    number_of_chirps: usize,
    /// Number of virtual antennas in each cube frame
    #[arg(long, default_value_t = 12)]
    number_of_virtual_antennas: usize,
    /// Range bin at the centre of the extraction window
    #[arg(long, default_value_t = 25)]
    range_bin_start: u16,
    /// Range resolution in metres per bin
    #[arg(long, default_value_t = 0.043)]
    range_resolution: f32,
    /// Maximum number of cube frames to process. If not provided reads until end of input.
    #[arg(long)]
    max_frames: Option<u64>,
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = AppArguments::parse();

    let mut input_file: Box<dyn Read> = match &args.input_filepath {
        None => Box::new(std::io::stdin()),
        Some(filepath) => match std::fs::File::open(filepath) {
            Ok(file) => Box::new(file),
            Err(err) => return Err(format!("Failed to open input file {}: {}", filepath, err)),
        },
    };
    let mut output_file: Box<dyn Write> = match &args.output_filepath {
        None => Box::new(BufWriter::new(std::io::stdout())),
        Some(filepath) => match std::fs::File::create(filepath) {
            Ok(file) => Box::new(BufWriter::new(file)),
            Err(err) => return Err(format!("Failed to open output file {}: {}", filepath, err)),
        },
    };

    // Setup the vital signs pipeline
    let params = get_awr_vitals_parameters();
    let geometry = get_awr_antenna_geometry();
    let config = VitalsConfig {
        enabled: true,
        tracker_integration: false,
        target_id: TARGET_ID_NEAREST,
        range_bin_start: args.range_bin_start,
        nb_range_bins: params.nb_range_cells as u16,
        range_resolution_metres: args.range_resolution,
    };
    let mut pipeline = VitalSignsPipeline::new(&params, &geometry, &config)
        .map_err(|err| format!("Failed to initialise pipeline: {}", err))?;

    // Setup input buffers
    let samples_per_frame = args.number_of_range_bins * args.number_of_virtual_antennas * 2;
    let bytes_per_sample = 2;
    let mut frame_bytes_buffer = vec![0u8; samples_per_frame * bytes_per_sample];
    let mut frame_samples_buffer = vec![0i16; samples_per_frame];

    let mut total_frames: u64 = 0;
    let mut last_refresh: u32 = 0;
    loop {
        if let Some(max_frames) = args.max_frames {
            if total_frames >= max_frames {
                log::info!("reached the frame cap of {} frames", max_frames);
                break;
            }
        }
        match input_file.read_exact(&mut frame_bytes_buffer) {
            Ok(()) => (),
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
                log::info!("finished reading cube frames from input");
                break;
            },
            Err(err) => return Err(format!("Error while reading cube frame {}: {}", total_frames, err)),
        };
        for (sample, bytes) in frame_samples_buffer.iter_mut().zip(frame_bytes_buffer.chunks_exact(bytes_per_sample)) {
            *sample = i16::from_le_bytes([bytes[0], bytes[1]]);
        }

        let cube = RadarCubeSlice::new(
            &frame_samples_buffer,
            args.number_of_range_bins,
            args.number_of_chirps,
            args.number_of_virtual_antennas,
        ).map_err(|err| format!("Invalid cube frame {}: {}", total_frames, err))?;
        pipeline.process_frame(&cube, args.range_bin_start as usize)
            .map_err(|err| format!("Failed to process frame {}: {}", total_frames, err))?;
        total_frames += 1;

        if pipeline.total_refreshes != last_refresh {
            last_refresh = pipeline.total_refreshes;
            let result = pipeline.output();
            if let Err(err) = output_file.write_all(&result.to_wire_bytes()) {
                return Err(format!("Error while writing result record: {}", err));
            }
            log::info!(
                "refresh {}: breathing {:.1} BPM, heart {:.1} BPM, deviation {:.3}, valid {}",
                last_refresh, result.breathing_rate_bpm, result.heart_rate_bpm,
                result.breathing_deviation, result.valid,
            );
        }
    }

    if let Err(err) = output_file.flush() {
        return Err(format!("Error while flushing result records: {}", err));
    }
    log::info!("processed {} frames over {} refreshes", total_frames, last_refresh);
    Ok(())
}
