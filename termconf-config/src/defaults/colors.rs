//! Default 256-color table.

use crate::value::Color;

/// The 16 base colors, dull and bright variants interleaved by index.
const BASE_COLORS: [&str; 16] = [
    "#000000", "#cc0403", "#19cb00", "#cecb00", "#0d73cc", "#cb1ed1", "#0dcdcd", "#dddddd",
    "#767676", "#f2201f", "#23fd00", "#fffd00", "#1a8fff", "#fd28ff", "#14ffff", "#ffffff",
];

/// Channel levels of the 6x6x6 color cube (indices 16..=231).
const CUBE_LEVELS: [u8; 6] = [0x00, 0x5f, 0x87, 0xaf, 0xd7, 0xff];

/// Color for palette index `index`.
pub fn palette_color(index: u8) -> Color {
    match index {
        0..=15 => {
            crate::converters::to_color(BASE_COLORS[index as usize]).unwrap_or(Color::new(0, 0, 0))
        }
        16..=231 => {
            let i = index - 16;
            Color::new(
                CUBE_LEVELS[(i / 36) as usize],
                CUBE_LEVELS[((i / 6) % 6) as usize],
                CUBE_LEVELS[(i % 6) as usize],
            )
        }
        _ => {
            let level = 8 + (index - 232) * 10;
            Color::new(level, level, level)
        }
    }
}

/// `(name, default)` for `color0` … `color255`.
pub fn color_table_defaults() -> Vec<(String, String)> {
    (0..=255u8)
        .map(|i| (format!("color{i}"), palette_color(i).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_colors() {
        assert_eq!(palette_color(1), Color::new(0xcc, 0x04, 0x03));
        assert_eq!(palette_color(15), Color::new(0xff, 0xff, 0xff));
    }

    #[test]
    fn test_cube_and_grays() {
        assert_eq!(palette_color(16), Color::new(0, 0, 0));
        assert_eq!(palette_color(160), Color::new(0xd7, 0x00, 0x00));
        assert_eq!(palette_color(161), Color::new(0xd7, 0x00, 0x5f));
        assert_eq!(palette_color(231), Color::new(0xff, 0xff, 0xff));
        assert_eq!(palette_color(232), Color::new(8, 8, 8));
        assert_eq!(palette_color(255), Color::new(238, 238, 238));
    }

    #[test]
    fn test_table_size() {
        let table = color_table_defaults();
        assert_eq!(table.len(), 256);
        assert_eq!(table[160], ("color160".to_string(), "#d70000".to_string()));
    }
}
