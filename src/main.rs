use pico_detector::image::ImageU8;
use pico_detector::{Cascade, DetectParams, PicoDetector, ScanParams};

fn main() {
    // Demo stub: a single-tree cascade that accepts every window, run over
    // a fake 8-bit image buffer.
    let mut bytes = vec![0u8; 8];
    bytes.extend_from_slice(&1i32.to_le_bytes()); // tree depth
    bytes.extend_from_slice(&1i32.to_le_bytes()); // tree count
    bytes.extend_from_slice(&[0u8; 4]); // node 1 offsets
    bytes.extend_from_slice(&0.0f32.to_le_bytes()); // leaf 0
    bytes.extend_from_slice(&20.0f32.to_le_bytes()); // leaf 1
    bytes.extend_from_slice(&0.0f32.to_le_bytes()); // stage threshold
    let cascade = Cascade::from_bytes(&bytes).expect("synthetic cascade is well-formed");

    let w = 640usize;
    let h = 480usize;
    let gray = vec![0u8; w * h];
    let img = ImageU8 {
        w,
        h,
        stride: w,
        data: &gray,
    };

    let detector = PicoDetector::new(
        cascade,
        DetectParams {
            scan: ScanParams {
                min_size: 100,
                ..Default::default()
            },
            ..Default::default()
        },
    );

    match detector.process(img) {
        Ok(report) => println!(
            "raw={} clusters={} kept={} latency_ms={:.3}",
            report.raw_count,
            report.cluster_count,
            report.detections.len(),
            report.latency_ms
        ),
        Err(err) => eprintln!("Error: {err}"),
    }
}
