//! Euklid inspector: runs a few kernel operations and logs the results.
//!
//! Usage:
//! ```text
//! cargo run --example inspect                 # all scenarios
//! cargo run --example inspect -- polyline     # a single scenario
//! RUST_LOG=inspect=debug cargo run --example inspect
//! ```
//!
//! Scenarios: `transform`, `plane`, `polyline`, `curve`.

use std::f64::consts::FRAC_PI_2;

use euklid::{
    BSplineCurve, BezierCurve, Plane, PolyLine2D, Result, Transformation, Vector2D, Vector3D,
};

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for the inspector.
    // Override with RUST_LOG env var.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("inspect=info".parse().unwrap_or_default())
        .add_directive("euklid=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let scenario = std::env::args().nth(1);
    let run = |name: &str| scenario.as_deref().is_none_or(|s| s == name);

    if run("transform") {
        transform()?;
    }
    if run("plane") {
        plane()?;
    }
    if run("polyline") {
        polyline()?;
    }
    if run("curve") {
        curve();
    }
    Ok(())
}

fn transform() -> Result<()> {
    let translation = Transformation::translation(&Vector3D::new([1.0, 0.0, 0.0]));
    let rotation = Transformation::rotation(FRAC_PI_2, &Vector3D::new([0.0, 0.0, 1.0]))?;
    let point = Vector3D::new([2.0, 3.0, 4.0]);

    let moved = translation.chain(&rotation).apply(&point);
    tracing::info!(%point, %moved, "translate, then rotate");
    let back = translation.chain(&rotation).apply_inverse(&moved)?;
    tracing::debug!(%back, "inverse");
    Ok(())
}

fn plane() -> Result<()> {
    let plane = Plane::new(
        Vector3D::new([2.0, 3.0, 4.0]),
        Vector3D::new([-4.0, -3.0, -2.0]),
        Vector3D::new([4.0, 5.0, 6.0]),
    )?;
    tracing::info!(normvector = %plane.normvector(), "plane");

    let local = Vector2D::new([1.0, -2.0]);
    let world = plane.align(&local);
    tracing::info!(%local, %world, projected = %plane.project(&world), "align / project");
    Ok(())
}

fn polyline() -> Result<()> {
    let line = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [2.0, 1.0], [1.0, 3.0], [0.0, 0.0]]);
    tracing::info!(nodes = line.len(), length = line.get_length(), "polyline");

    let resampled = line.resample(20)?;
    tracing::info!(
        nodes = resampled.len(),
        length = resampled.get_length(),
        "resampled"
    );

    for cut in line.cut(&Vector2D::new([0.5, -1.0]), &Vector2D::new([0.5, 1.0])) {
        tracing::info!(ik_1 = cut.ik_1, ik_2 = cut.ik_2, point = %cut.point, "cut");
    }

    let looped = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.5, -1.0]]);
    let fixed = looped.fix_errors();
    tracing::info!(before = looped.len(), after = fixed.len(), "fix_errors");
    for node in &fixed {
        tracing::debug!(%node);
    }
    Ok(())
}

fn curve() {
    let controlpoints = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 2.0], [2.0, -1.0], [3.0, 1.0]]);
    let bezier = BezierCurve::new(controlpoints.clone());
    let bspline = BSplineCurve::new(controlpoints);

    for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
        tracing::info!(t, bezier = %bezier.get(t), bspline = %bspline.get(t), "curve");
    }
    let sequence = bspline.get_sequence(50);
    tracing::info!(points = sequence.len(), length = sequence.get_length(), "sequence");
}
