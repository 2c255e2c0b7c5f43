//! Runs the motion pipeline on a synthetic detection stream and prints the
//! result as JSON.
//!
//! RUST_LOG=debug cargo run --example synthetic

use kinetrack::bbox::BBox;
use kinetrack::{calibration, Detection, Failure, Frame, IterSource, Job, MotionTracker, TargetBox};

const FPS: f64 = 25.0;

fn frames(count: usize) -> Vec<Frame> {
    (0..count)
        .map(|i| {
            let t = i as f64 / FPS;

            // a car accelerating to the right plus a parked one
            let cx = (200.0 + 60.0 * t + 20.0 * t * t) as f32;
            let jitter = ((i as f32) * 1.3).sin();

            Frame::new(
                t,
                vec![
                    Detection::new(1, BBox::ltrb(600.0, 400.0, 770.0, 480.0)),
                    Detection::new(
                        2,
                        BBox::ltrb(cx - 85.0 + jitter, 300.0, cx + 85.0 + jitter, 370.0),
                    ),
                ],
            )
        })
        .collect()
}

fn main() {
    env_logger::init();

    let stream = frames(125);
    let reference = &stream[25].detections[1].bbox;
    let pixel_size =
        calibration::from_known_width(reference, calibration::AVG_VEHICLE_WIDTH_METERS).unwrap_or(0.01);

    let job = Job {
        fps: FPS,
        reference_time: 1.0,
        target: TargetBox {
            x1: reference.left() - 5.0,
            y1: reference.top() - 5.0,
            x2: reference.right() + 5.0,
            y2: reference.bottom() + 5.0,
        },
        calibration: pixel_size,
    };

    let tracker = MotionTracker::default();

    match tracker.run(&mut IterSource::new(stream), &job) {
        Ok(trajectory) => {
            println!("{}", serde_json::to_string_pretty(&trajectory).expect("serializable"));
        }
        Err(err) => {
            let failure = Failure::from(&err);
            eprintln!("{}", serde_json::to_string(&failure).expect("serializable"));
            std::process::exit(1);
        }
    }
}
