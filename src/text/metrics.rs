//! Static width tables for the two faces every artifact uses.
//!
//! Widths are the Adobe core-14 AFM values for Helvetica and
//! Helvetica-Bold, expressed in em units (per-mille / 1000). Every
//! renderer draws with these faces (the vector and raster backends via
//! the `Helvetica, Arial, sans-serif` stack, the document backend via
//! the built-in Type1 fonts), so one table serves all of them and the
//! layout engine can fit text once for everybody.
//!
//! Tables cover ASCII 0x20..=0x7E (95 printable characters),
//! index = `(char as usize) - 32`. Anything outside that range falls
//! back to `average_char_width`.

/// The two faces used across all artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Helvetica,
    HelveticaBold,
}

impl Font {
    /// PostScript name, as the document backend registers it.
    pub fn postscript_name(self) -> &'static str {
        match self {
            Font::Helvetica => "Helvetica",
            Font::HelveticaBold => "Helvetica-Bold",
        }
    }
}

/// Character-width table for one face, in em units at 1em.
///
/// `widths[i]` is the width of ASCII character `(i + 32)`.
pub struct FontMetrics {
    pub font: Font,
    widths: [f32; 95],
    /// Fallback for codepoints outside 0x20..=0x7E.
    pub average_char_width: f32,
}

impl FontMetrics {
    /// Measures the rendered width of a string in em units.
    pub fn measure(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Measures the rendered width of a string in points at `size` pt.
    pub fn text_width(&self, s: &str, size: f32) -> f32 {
        self.measure(s) * size
    }

    /// Width of a single space in em units.
    pub fn space_width(&self) -> f32 {
        self.widths[0]
    }
}

/// Helvetica regular, Adobe AFM widths / 1000.
static HELVETICA: FontMetrics = FontMetrics {
    font: Font::Helvetica,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.513,
};

/// Helvetica-Bold, Adobe AFM widths / 1000.
static HELVETICA_BOLD: FontMetrics = FontMetrics {
    font: Font::HelveticaBold,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.540,
};

/// Static metric table for a face.
pub fn metrics(font: Font) -> &'static FontMetrics {
    match font {
        Font::Helvetica => &HELVETICA,
        Font::HelveticaBold => &HELVETICA_BOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_empty_is_zero() {
        assert_eq!(metrics(Font::Helvetica).measure(""), 0.0);
    }

    #[test]
    fn test_measure_known_word() {
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = metrics(Font::Helvetica).measure("Rust");
        assert!(
            (width - 2.056).abs() < 1e-3,
            "Rust should measure ~2.056 em, got {width}"
        );
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let m = metrics(Font::Helvetica);
        let at_one = m.text_width("Server", 1.0);
        let at_ten = m.text_width("Server", 10.0);
        assert!((at_ten - at_one * 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_non_ascii_uses_fallback() {
        let m = metrics(Font::Helvetica);
        let width = m.measure("é");
        assert!((width - m.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_bold_at_least_as_wide_on_lowercase() {
        let text = "infrastructure inventory";
        let regular = metrics(Font::Helvetica).measure(text);
        let bold = metrics(Font::HelveticaBold).measure(text);
        assert!(
            bold >= regular,
            "bold ({bold}) should not measure narrower than regular ({regular})"
        );
    }

    #[test]
    fn test_postscript_names() {
        assert_eq!(Font::Helvetica.postscript_name(), "Helvetica");
        assert_eq!(Font::HelveticaBold.postscript_name(), "Helvetica-Bold");
    }
}
