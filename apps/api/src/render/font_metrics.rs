//! Static font metrics and page geometry for the PDF export.
//!
//! Widths are Helvetica advance widths (Adobe core-14 AFM) expressed in em units.
//! The tables cover every glyph WinAnsiEncoding can show: ASCII 0x20..=0x7E, Latin-1
//! 0xA0..=0xFF and the cp1252 punctuation block. Anything else is drawn as `?` by the
//! encoder and measured at `average_char_width`.

/// Points per centimetre.
pub const PT_PER_CM: f32 = 72.0 / 2.54;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// Page size, margins and body text style of the exported letter.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub margin_pt: f32,
    pub font_size_pt: f32,
    /// Baseline-to-baseline distance inside a paragraph.
    pub leading_pt: f32,
    /// Extra space below each paragraph block.
    pub space_after_pt: f32,
}

impl PageConfig {
    pub fn text_width_pt(&self) -> f32 {
        self.page_width_pt - 2.0 * self.margin_pt
    }

    /// Usable text width in em units at the configured font size.
    pub fn text_width_em(&self) -> f32 {
        self.text_width_pt() / self.font_size_pt
    }

    /// Baseline of the first line on a fresh page.
    pub fn first_baseline_pt(&self) -> f32 {
        self.page_height_pt - self.margin_pt - self.font_size_pt
    }
}

/// A4 portrait, 2 cm margins, 11pt body on 14pt leading, 8pt after each paragraph.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        page_width_pt: 595.28,
        page_height_pt: 841.89,
        margin_pt: 2.0 * PT_PER_CM,
        font_size_pt: 11.0,
        leading_pt: 14.0,
        space_after_pt: 8.0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub base_font: &'static str,
    widths: [f32; 95],
    /// Latin-1 upper half, index = (char as usize) - 0xA0.
    latin1_widths: [f32; 96],
    /// cp1252 0x80..=0x9F glyphs, sorted by char.
    cp1252_widths: &'static [(char, f32)],
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    pub fn char_width(&self, c: char) -> f32 {
        let code = c as usize;
        match code {
            32..=126 => self.widths[code - 32],
            0xA0..=0xFF => self.latin1_widths[code - 0xA0],
            // Shown as plain spaces by the WinAnsi encoder.
            0x09 | 0x2002..=0x200A | 0x202F => self.space_width,
            _ => self
                .cp1252_widths
                .binary_search_by_key(&c, |(glyph, _)| *glyph)
                .map(|i| self.cp1252_widths[i].1)
                .unwrap_or(self.average_char_width),
        }
    }

    /// Rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }
}

pub static HELVETICA: FontMetricTable = FontMetricTable {
    base_font: "Helvetica",
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
    #[rustfmt::skip]
    latin1_widths: [
        // nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.260, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.556, 0.537, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.667, 0.667, 0.667, 0.667, 0.667, 0.667, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.500, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.584, 0.611, 0.556, 0.556, 0.556, 0.556, 0.500, 0.556, 0.500,
    ],
    cp1252_widths: &[
        ('Œ', 1.000),
        ('œ', 0.944),
        ('Š', 0.667),
        ('š', 0.500),
        ('Ÿ', 0.667),
        ('Ž', 0.611),
        ('ž', 0.500),
        ('ƒ', 0.556),
        ('ˆ', 0.333),
        ('˜', 0.333),
        ('–', 0.556),
        ('—', 1.000),
        ('‘', 0.222),
        ('’', 0.222),
        ('‚', 0.222),
        ('“', 0.333),
        ('”', 0.333),
        ('„', 0.333),
        ('†', 0.556),
        ('‡', 0.556),
        ('•', 0.350),
        ('…', 1.000),
        ('‰', 1.000),
        ('‹', 0.333),
        ('›', 0.333),
        ('€', 0.556),
        ('™', 1.000),
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(HELVETICA.measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        // "Rust" = R(0.722) + u(0.556) + s(0.500) + t(0.278) = 2.056
        let width = HELVETICA.measure_str("Rust");
        assert!((width - 2.056).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_win_ansi_punctuation_widths() {
        assert_eq!(HELVETICA.char_width('—'), 1.0);
        assert_eq!(HELVETICA.char_width('…'), 1.0);
        assert_eq!(HELVETICA.char_width('Œ'), 1.0);
        assert_eq!(HELVETICA.char_width('™'), 1.0);
        assert_eq!(HELVETICA.char_width('‰'), 1.0);
        assert_eq!(HELVETICA.char_width('’'), 0.222);
        assert_eq!(HELVETICA.char_width('•'), 0.350);
    }

    #[test]
    fn test_latin1_widths() {
        assert_eq!(HELVETICA.char_width('é'), 0.556);
        assert_eq!(HELVETICA.char_width('ç'), 0.500);
        assert_eq!(HELVETICA.char_width('Ç'), 0.722);
        assert_eq!(HELVETICA.char_width('Æ'), 1.0);
        assert_eq!(HELVETICA.char_width('\u{A0}'), HELVETICA.space_width);
        // "Œuvre — été" = 1.0 + 0.556 + 0.5 + 0.333 + 0.556 + 0.278 + 1.0 + 0.278 + 0.556 + 0.278 + 0.556
        let width = HELVETICA.measure_str("Œuvre — été");
        assert!((width - 5.891).abs() < 1e-3, "got {width}");
    }

    #[test]
    fn test_unencodable_chars_fall_back_to_average() {
        assert_eq!(HELVETICA.char_width('日'), HELVETICA.average_char_width);
        assert_eq!(HELVETICA.char_width('\u{202F}'), HELVETICA.space_width);
    }

    #[test]
    fn test_default_page_config_is_a4_with_2cm_margins() {
        let config = default_page_config();
        assert!((config.margin_pt - 56.69).abs() < 0.01);
        assert!((config.text_width_pt() - 481.89).abs() < 0.01);
        // 481.89pt / 11pt ≈ 43.8em
        assert!(config.text_width_em() > 43.0 && config.text_width_em() < 44.5);
        assert_eq!(config.font_size_pt, 11.0);
        assert_eq!(config.leading_pt, 14.0);
        assert_eq!(config.space_after_pt, 8.0);
    }
}
