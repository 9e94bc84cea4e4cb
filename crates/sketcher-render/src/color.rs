//! Shape color strings to paint colors.

use peniko::Color;

/// Parse `#rgb` or `#rrggbb`.
pub fn parse_hex_color(color: &str) -> Option<Color> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            // Each digit doubles up: #abc == #aabbcc.
            let r = channel(&hex[0..1])? * 17;
            let g = channel(&hex[1..2])? * 17;
            let b = channel(&hex[2..3])? * 17;
            Some(Color::from_rgb8(r, g, b))
        }
        6 => {
            let r = channel(&hex[0..2])?;
            let g = channel(&hex[2..4])?;
            let b = channel(&hex[4..6])?;
            Some(Color::from_rgb8(r, g, b))
        }
        _ => None,
    }
}

/// Paint color for a shape color string; unparseable colors draw black.
pub fn resolve_color(color: &str) -> Color {
    parse_hex_color(color).unwrap_or_else(|| {
        log::warn!("Unrecognized color {color:?}, using black");
        Color::BLACK
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(color: Color) -> [u8; 4] {
        let c = color.to_rgba8();
        [c.r, c.g, c.b, c.a]
    }

    #[test]
    fn test_long_form() {
        assert_eq!(rgba(parse_hex_color("#333333").unwrap()), [0x33, 0x33, 0x33, 255]);
        assert_eq!(rgba(parse_hex_color("#FF8000").unwrap()), [255, 128, 0, 255]);
    }

    #[test]
    fn test_short_form() {
        assert_eq!(rgba(parse_hex_color("#f0a").unwrap()), [255, 0, 170, 255]);
    }

    #[test]
    fn test_invalid_colors() {
        for bad in ["333333", "#12345", "#gggggg", "red", "", "#ééé"] {
            assert!(parse_hex_color(bad).is_none(), "{bad} should not parse");
        }
        assert_eq!(rgba(resolve_color("red")), [0, 0, 0, 255]);
    }
}
