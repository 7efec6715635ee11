/// Base series colours, in assignment order.
pub const BASE_COLORS: [&str; 8] = [
    "#2563EB", "#0D9488", "#F97316", "#8B5CF6", "#EC4899", "#84CC16", "#14B8A6", "#EF4444",
];

/// Opacity steps used once the base colours run out.
const EXTRA_OPACITIES: [f32; 2] = [0.8, 0.6];

/// Returns `count` colours: the base set first, then translucent variants of
/// it. Requests beyond the generated set are capped.
pub fn chart_colors(count: usize) -> Vec<String> {
    BASE_COLORS
        .iter()
        .map(|hex| hex.to_string())
        .chain(
            EXTRA_OPACITIES
                .iter()
                .flat_map(|opacity| BASE_COLORS.iter().map(move |hex| rgba(hex, *opacity))),
        )
        .take(count)
        .collect()
}

fn rgba(hex: &str, opacity: f32) -> String {
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|digits| u8::from_str_radix(digits, 16).ok())
            .unwrap_or_default()
    };
    format!(
        "rgba({}, {}, {}, {opacity})",
        channel(1..3),
        channel(3..5),
        channel(5..7)
    )
}
