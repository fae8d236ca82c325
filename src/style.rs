//! Text styling primitives shared by the content tables and the layout composer.
//!
//! A [`TextStyle`] carries the three pieces of state the canvas tracks for text: the font size in
//! points, the font weight and the fill colour.  Styles are small `Copy` values built with the
//! same chained helpers the content tables use (`TextStyle::body().bold().sized(11.0)`), so every
//! run of text states its full formatting instead of relying on whatever the previous run left
//! behind on the canvas.

use std::fmt;

/// Conversion factor between typographic points and millimetres.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// An RGB colour with 8-bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the channels scaled to the `0.0..=1.0` range used by PDF operators.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Brand palette.
pub mod palette {
    use super::Rgb;

    /// Primary brand blue used for headings and the masthead.
    pub const BRAND_BLUE: Rgb = Rgb::new(1, 38, 153);
    /// Slate grey used for the masthead tagline.
    pub const SLATE: Rgb = Rgb::new(100, 116, 139);
    /// Neutral grey for subtitles, notes and the footer.
    pub const MUTED: Rgb = Rgb::new(100, 100, 100);
    /// Body text.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Security warnings.
    pub const ALERT_RED: Rgb = Rgb::new(220, 53, 69);
    /// Pale red background behind security warnings.
    pub const ALERT_TINT: Rgb = Rgb::new(255, 240, 240);
    /// Amber background of the "never share your password" warning.
    pub const WARNING_AMBER: Rgb = Rgb::new(255, 220, 100);
    /// Pale yellow background of the help boxes.
    pub const HELP_YELLOW: Rgb = Rgb::new(255, 250, 200);
    /// Pale blue background of instruction bars.
    pub const INFO_BLUE: Rgb = Rgb::new(240, 248, 255);
}

/// Font weights available in the builtin Helvetica family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight.
    Bold,
}

/// Font size, weight and colour of a run of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    size: f32,
    weight: FontWeight,
    color: Rgb,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::body()
    }
}

impl TextStyle {
    /// 10pt black regular text.
    pub const fn body() -> Self {
        Self {
            size: 10.0,
            weight: FontWeight::Normal,
            color: palette::BLACK,
        }
    }

    /// Bold brand-blue text of the given size, used for section headings.
    pub const fn heading(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
            color: palette::BRAND_BLUE,
        }
    }

    /// Regular brand-blue text of the given size, used for guide titles.
    pub const fn title(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Normal,
            color: palette::BRAND_BLUE,
        }
    }

    /// 9pt muted text for hints and notes.
    pub const fn hint() -> Self {
        Self {
            size: 9.0,
            weight: FontWeight::Normal,
            color: palette::MUTED,
        }
    }

    /// Returns the font size in points.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Returns the font weight.
    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    /// Returns the text colour.
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Returns whether the style uses the bold weight.
    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }

    /// Sets the font size and returns the updated style.
    pub fn sized(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Sets the weight and returns the updated style.
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Convenience shorthand that marks the style as bold.
    pub fn bold(self) -> Self {
        self.with_weight(FontWeight::Bold)
    }

    /// Convenience shorthand that resets the weight to regular.
    pub fn normal(self) -> Self {
        self.with_weight(FontWeight::Normal)
    }

    /// Sets the colour and returns the updated style.
    pub fn colored(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Height of one em in millimetres.
    pub fn em_mm(&self) -> f32 {
        self.size * MM_PER_PT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chained_helpers_override_presets() {
        let style = TextStyle::body().bold().sized(11.0).colored(palette::ALERT_RED);
        assert!(style.is_bold());
        assert_eq!(style.size(), 11.0);
        assert_eq!(style.color(), palette::ALERT_RED);

        let relaxed = style.normal();
        assert!(!relaxed.is_bold());
        assert_eq!(relaxed.size(), 11.0);
    }

    #[test]
    fn heading_preset_is_bold_brand_blue() {
        let style = TextStyle::heading(14.0);
        assert!(style.is_bold());
        assert_eq!(style.color(), palette::BRAND_BLUE);
    }

    #[test]
    fn unit_channels_span_zero_to_one() {
        assert_eq!(Rgb::new(255, 0, 255).to_unit(), (1.0, 0.0, 1.0));
        assert_eq!(palette::BRAND_BLUE.to_string(), "#012699");
    }
}
