use cadgeom::{DimensionKind, DimensionSpec, Point, generate_dimension_geometry};
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (p1, p2, p3) = (Point::new(0.0, 0.0), Point::new(10.0, 4.0), Point::new(3.0, 8.0));

    for kind in DimensionKind::ALL {
        let spec: DimensionSpec = DimensionSpec::new(*kind, p1, p2, p3);
        let dim = generate_dimension_geometry(&spec);
        println!("=== {kind} ===");
        println!("  value: {:?}", dim.measured_value);
        for seg in dim.segments() {
            println!("  {seg:?}");
        }
        if let Some(label) = &dim.label {
            println!(
                "  label at {} rotated {} ({})",
                label.anchor, label.text.rotation, label.text.align
            );
        }
        if let Some(d) = dim.degenerate {
            println!("  degenerate: {d}");
        }
    }

    let kind: DimensionKind = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "parallel".to_string())
        .parse()?;
    println!("\nparsed kind from argv: {kind}");
    Ok(())
}
