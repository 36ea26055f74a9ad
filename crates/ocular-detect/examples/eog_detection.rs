//! Wavelet detection on a synthetic EOG recording
//!
//! Run with: RUST_LOG=ocular_detect=debug cargo run -p ocular-detect --example eog_detection

use ocular_core::{EogSignals, OcularEventKind};
use ocular_detect::{detect, DetectionConfig, DetectionMethod, DetectionOutput};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== EOG Event Detection ===\n");

    // Two gaze shifts of 30 samples and one blink on a 1 kHz recording
    let n = 5000;
    let horizontal: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            ((t - 1000.0) / 30.0).clamp(0.0, 1.0) - ((t - 3500.0) / 30.0).clamp(0.0, 1.0)
        })
        .collect();
    let vertical: Vec<f64> = (0..n)
        .map(|i| if (2200..2320).contains(&i) { -1.0 } else { 0.0 })
        .collect();
    let signals = EogSignals::new(&vertical, &horizontal)?;

    let config = DetectionConfig::from_json_str(r#"{ "method": "wavelet" }"#)?;
    println!("Configuration:\n{}\n", config.to_json_string()?);
    assert_eq!(config.method, DetectionMethod::Wavelet);

    let output = detect(&config.request(None, Some(signals)))?;
    let DetectionOutput::Full(detection) = output else {
        return Err("expected events and mask".into());
    };

    println!("{}", detection.events);
    for fixation in &detection.events.fixations {
        println!("  {fixation}");
    }
    for saccade in &detection.events.saccades {
        println!("  {saccade}");
    }
    for blink in &detection.events.blinks {
        println!("  {blink}");
    }

    println!("\nMask summary:");
    for kind in OcularEventKind::ALL {
        println!("  {:10} {:5} samples", kind.to_string(), detection.mask.count(kind));
    }

    Ok(())
}
