use crate::types::Rod;

const MAX_WIDTH: f64 = 80.0;

/// Draws a rod as a three-line bar, one cell per piece and a hatched leftover.
pub fn render_rod(raw_length: f64, rod: &Rod) -> String {
    if raw_length <= 0.0 {
        return String::new();
    }
    let scale = MAX_WIDTH / raw_length;

    let mut cells: Vec<(usize, String, char)> = rod
        .pieces
        .iter()
        .map(|p| (cell_width(p.length, scale), format_length(p.length), ' '))
        .collect();
    if rod.leftover > 0.0 {
        cells.push((cell_width(rod.leftover, scale), String::new(), '/'));
    }

    let mut border = String::from("+");
    let mut middle = String::from("|");
    for (width, label, fill) in &cells {
        border.push_str(&"-".repeat(*width));
        border.push('+');
        middle.push_str(&centered(label, *width, *fill));
        middle.push('|');
    }

    let mut result = String::new();
    for line in [&border, &middle, &border] {
        result.push_str(line);
        result.push('\n');
    }
    result
}

fn cell_width(length: f64, scale: f64) -> usize {
    ((length * scale).round() as usize).max(1)
}

fn format_length(length: f64) -> String {
    if length.fract() == 0.0 {
        format!("{length:.0}")
    } else {
        format!("{length}")
    }
}

fn centered(label: &str, width: usize, fill: char) -> String {
    let label_len = label.chars().count();
    if label_len > width {
        return fill.to_string().repeat(width);
    }
    let left = (width - label_len) / 2;
    let right = width - label_len - left;
    let mut out = fill.to_string().repeat(left);
    out.push_str(label);
    out.push_str(&fill.to_string().repeat(right));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, PieceKind};

    fn rod(lengths: &[f64]) -> Rod {
        let mut rod = Rod::new(19.0);
        for &l in lengths {
            rod.cut(Piece::new(l, PieceKind::Height));
        }
        rod
    }

    #[test]
    fn test_render_single_piece() {
        let output = render_rod(19.0, &rod(&[10.0]));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('+'));
        assert!(lines[1].contains("10"));
        assert!(lines[1].contains('/'));
        assert_eq!(lines[0].len(), lines[1].len());
    }

    #[test]
    fn test_render_full_rod_has_no_leftover() {
        let output = render_rod(19.0, &rod(&[10.0, 9.0]));
        assert!(output.contains("10"));
        assert!(output.contains('9'));
        assert!(!output.contains('/'));
    }

    #[test]
    fn test_render_fractional_label() {
        let output = render_rod(19.0, &rod(&[5.5]));
        assert!(output.contains("5.5"));
    }

    #[test]
    fn test_render_empty() {
        let output = render_rod(19.0, &Rod::new(19.0));
        // Should still draw the rod as all leftover
        assert!(output.contains('+'));
        assert!(output.contains('/'));
    }
}
