use cadgeom::{
    Angle, LabelWidths, PinFunction, PinLength, PinSpec, StrokeFont, TextMeasure, layout_pin,
};

fn main() -> miette::Result<()> {
    let font = StrokeFont::default();
    let config = cadgeom::LayoutConfig::default();

    for (rotation, function) in [
        (0.0, PinFunction::None),
        (90.0, PinFunction::Dot),
        (180.0, PinFunction::Clk),
        (270.0, PinFunction::DotClk),
    ] {
        let spec = PinSpec::new("EN")
            .with_length(PinLength::Long)
            .with_rotation(Angle(rotation))
            .with_function(function);
        let [name, pad, dir_swap] = spec.label_specs(&config).map(|t| font.measure(&t).width);
        let pin = layout_pin(&spec, LabelWidths { name, pad, dir_swap })?;

        println!("=== {function} at {} ===", Angle(rotation));
        println!("  line {} -> {}", pin.line.start, pin.line.end);
        if let Some(dot) = pin.dot {
            println!("  dot at {} r={}", dot.center, dot.radius);
        }
        for label in pin.labels() {
            println!(
                "  {:?} at {} visible={} spin={}",
                label.text.value, label.anchor, label.visible, label.placement.spin_applied
            );
        }
    }

    // A pin at 45 degrees is a contract violation
    let bad = PinSpec::new("X").with_rotation(Angle(45.0));
    if let Err(e) = layout_pin(&bad, LabelWidths::default()) {
        eprintln!("{:?}", miette::Report::new(e));
    }
    Ok(())
}
