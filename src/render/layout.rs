//! Body text fitting: tier selection, greedy wrapping, and hyphenation.
//!
//! Pure with respect to I/O; pixel widths come in through [`TextMeasure`] so
//! the algorithm is testable without font files.

use hyphenation::{Hyphenator, Language, Load, Standard};

use crate::errors::LayoutError;
use crate::{AppError, Result};

/// Maximum rendered line width in pixels for body text.
pub const MAX_PIXELS_PER_LINE: u32 = 450;
/// Character budget per wrapped line at the small tier.
pub const MAX_CHARS_PER_LINE: usize = 26;
/// Wrapping gives up on words longer than this.
const MAX_WORD_CHARS: usize = 100;

/// Body font size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontTier {
    /// 70 px, single short line only.
    Large,
    /// 36 px, single line or wrapped block.
    Small,
}

/// Fitted body text ready for painting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyLayout {
    /// Selected font tier.
    pub tier: FontTier,
    /// Lines in paint order.
    pub lines: Vec<String>,
}

impl BodyLayout {
    /// Number of painted lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Pixel measurement seam for single lines of body text.
pub trait TextMeasure {
    /// Rendered width of `text` at the given tier, in pixels.
    fn line_width(&self, tier: FontTier, text: &str) -> u32;
}

/// Chooses a tier and wraps text into the body canvas.
pub struct BodyFitter {
    dictionary: Standard,
}

impl BodyFitter {
    /// Load the embedded US-English hyphenation dictionary.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the embedded dictionary fails to load.
    pub fn new() -> Result<Self> {
        let dictionary = Standard::from_embedded(Language::EnglishUS).map_err(|err| {
            AppError::Config(format!("failed to load hyphenation dictionary: {err}"))
        })?;
        Ok(Self { dictionary })
    }

    /// Fit `text` into the body canvas.
    ///
    /// Strategy priority: single line at the large tier, single line at the
    /// small tier, wrapped block at the small tier. Text with explicit line
    /// breaks goes straight to wrapping, each paragraph independently.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when a token defeats the wrapping strategy.
    pub fn fit(
        &self,
        text: &str,
        measure: &dyn TextMeasure,
    ) -> std::result::Result<BodyLayout, LayoutError> {
        if text.contains('\n') {
            let mut lines = Vec::new();
            for paragraph in text.split('\n') {
                lines.extend(self.wrap_paragraph(paragraph)?);
            }
            return Ok(BodyLayout {
                tier: FontTier::Small,
                lines,
            });
        }

        if measure.line_width(FontTier::Large, text) <= MAX_PIXELS_PER_LINE {
            return Ok(BodyLayout {
                tier: FontTier::Large,
                lines: vec![text.to_owned()],
            });
        }
        if measure.line_width(FontTier::Small, text) <= MAX_PIXELS_PER_LINE {
            return Ok(BodyLayout {
                tier: FontTier::Small,
                lines: vec![text.to_owned()],
            });
        }

        Ok(BodyLayout {
            tier: FontTier::Small,
            lines: self.wrap_paragraph(text)?,
        })
    }

    /// Greedy word-wrap of one paragraph at [`MAX_CHARS_PER_LINE`].
    fn wrap_paragraph(&self, paragraph: &str) -> std::result::Result<Vec<String>, LayoutError> {
        if paragraph.trim().is_empty() {
            return Ok(vec![String::new()]);
        }

        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let word_chars = word.chars().count();
            if word_chars > MAX_WORD_CHARS {
                return Err(LayoutError::for_word(word));
            }

            let sep = usize::from(!current.is_empty());
            if current.chars().count() + sep + word_chars <= MAX_CHARS_PER_LINE {
                if sep == 1 {
                    current.push(' ');
                }
                current.push_str(word);
            } else if word_chars <= MAX_CHARS_PER_LINE {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            } else {
                self.break_word(word, &mut current, &mut lines)?;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        Ok(lines)
    }

    /// Spread an over-long word across lines at hyphenation opportunities,
    /// marking every continuation with a trailing hyphen.
    fn break_word(
        &self,
        word: &str,
        current: &mut String,
        lines: &mut Vec<String>,
    ) -> std::result::Result<(), LayoutError> {
        let pieces = self.syllables(word);
        if pieces.len() <= 1 {
            return Err(LayoutError::for_word(word));
        }

        let total = pieces.len();
        let mut next = 0;
        while next < total {
            let sep = usize::from(!current.is_empty());
            let available = MAX_CHARS_PER_LINE.saturating_sub(current.chars().count() + sep);

            // Widest run of pieces that fits, reserving one column for the
            // hyphen unless the run reaches the end of the word.
            let mut taken = next;
            let mut run_chars = 0;
            while taken < total {
                let candidate = run_chars + pieces[taken].chars().count();
                let hyphen = usize::from(taken + 1 < total);
                if candidate + hyphen > available {
                    break;
                }
                run_chars = candidate;
                taken += 1;
            }

            if taken == next {
                if current.is_empty() {
                    // A single segment is wider than a whole line.
                    return Err(LayoutError::for_word(word));
                }
                lines.push(std::mem::take(current));
                continue;
            }

            if sep == 1 {
                current.push(' ');
            }
            for piece in &pieces[next..taken] {
                current.push_str(piece);
            }
            if taken < total {
                current.push('-');
                lines.push(std::mem::take(current));
            }
            next = taken;
        }
        Ok(())
    }

    /// Split a word at its hyphenation opportunities.
    fn syllables<'w>(&self, word: &'w str) -> Vec<&'w str> {
        let hyphenated = self.dictionary.hyphenate(word);
        let breaks = &hyphenated.breaks;
        if breaks.is_empty() {
            return vec![word];
        }

        let mut pieces = Vec::with_capacity(breaks.len() + 1);
        let mut start = 0;
        for &index in breaks {
            pieces.push(&word[start..index]);
            start = index;
        }
        pieces.push(&word[start..]);
        pieces
    }
}

/// Shorten `text` until it renders within `max_width` pixels, marking the cut
/// with trailing dots.
///
/// Idempotent: input already within budget comes back unchanged.
pub fn shorten_to_width(text: &str, max_width: u32, width_of: impl Fn(&str) -> u32) -> String {
    if width_of(text) <= max_width {
        return text.to_owned();
    }

    let chars: Vec<char> = text.chars().collect();
    for keep in (0..chars.len()).rev() {
        let mut candidate: String = chars[..keep].iter().collect();
        candidate.push_str("...");
        if width_of(&candidate) <= max_width {
            return candidate;
        }
    }
    "...".into()
}
