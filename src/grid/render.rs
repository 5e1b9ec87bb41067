use super::ContainmentMap;

/// Characters used for the ASCII preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsciiStyle {
    pub inside: char,
    pub outside: char,
}

impl Default for AsciiStyle {
    fn default() -> Self {
        Self {
            inside: '#',
            outside: '.',
        }
    }
}

/// Render a containment map as text, one line per Y and one column per X
///
/// Rows run from the smallest Y down to the largest, matching screen
/// coordinates where Y grows downward.
pub fn render_ascii(map: &ContainmentMap, style: AsciiStyle) -> String {
    let range = map.range();
    let mut out = String::with_capacity((range.width() + 1) * range.height());

    for y in map.ys() {
        for x in map.xs() {
            let inside = map.get(x, y).unwrap_or(false);
            out.push(if inside { style.inside } else { style.outside });
        }
        out.push('\n');
    }

    out
}
