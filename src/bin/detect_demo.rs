use pico_detector::config::load_config;
use pico_detector::image::io::{load_grayscale_image, write_json_file};
use pico_detector::{Cascade, PicoDetector};
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let cascade = Cascade::from_file(&config.cascade)
        .map_err(|e| format!("Failed to load cascade {}: {e}", config.cascade.display()))?;
    let gray = load_grayscale_image(&config.input)?;

    let detector = PicoDetector::new(cascade, config.params);
    let report = detector
        .process(gray.as_view())
        .map_err(|e| e.to_string())?;

    println!(
        "raw={} clusters={} kept={} scan_ms={:.3} cluster_ms={:.3} latency_ms={:.3}",
        report.raw_count,
        report.cluster_count,
        report.detections.len(),
        report.scan_ms,
        report.cluster_ms,
        report.latency_ms
    );
    for det in &report.detections {
        println!(
            "row={:.1} col={:.1} scale={:.1} score={:.2}",
            det.row, det.col, det.scale, det.score
        );
    }

    if let Some(json_out) = &config.output.json_out {
        write_json_file(json_out, &report)?;
        println!("report written to {}", json_out.display());
    }

    Ok(())
}

fn usage() -> String {
    "usage: detect_demo <config.json>".to_string()
}
