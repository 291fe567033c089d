//! Gravity keywords and their logos-based parser.
//!
//! Gravity is written as whitespace-separated keywords, e.g. `"left centery"`
//! or `"bottom right"`. Keywords are case-sensitive.

use std::ops::BitOr;

use logos::Logos;

use super::error::LayoutError;

/// Keyword token produced by the gravity lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r,]+")]
enum Keyword {
    #[token("left")]
    Left,
    #[token("right")]
    Right,
    #[token("top")]
    Top,
    #[token("bottom")]
    Bottom,
    #[token("centerx")]
    CenterX,
    #[token("centery")]
    CenterY,
    /// Any other identifier, so glued or misspelled keywords fail as a whole.
    #[regex(r"[A-Za-z_][A-Za-z0-9_-]*")]
    Word,
}

/// A set of placement keywords relative to the parent.
///
/// Horizontal keywords are `left`, `right`, `centerx`; vertical keywords are
/// `top`, `bottom`, `centery`. When several keywords of one axis are present,
/// the first in that order wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Gravity(u8);

impl Gravity {
    pub const NONE: Gravity = Gravity(0);
    pub const LEFT: Gravity = Gravity(1);
    pub const RIGHT: Gravity = Gravity(1 << 1);
    pub const TOP: Gravity = Gravity(1 << 2);
    pub const BOTTOM: Gravity = Gravity(1 << 3);
    pub const CENTER_X: Gravity = Gravity(1 << 4);
    pub const CENTER_Y: Gravity = Gravity(1 << 5);

    /// Parse a whitespace-separated keyword list.
    ///
    /// An empty string yields [`Gravity::NONE`]. Any unknown word is a
    /// configuration error.
    pub fn parse(input: &str) -> Result<Gravity, LayoutError> {
        let mut lexer = Keyword::lexer(input);
        let mut gravity = Gravity::NONE;
        while let Some(token) = lexer.next() {
            let keyword = token.map_err(|()| LayoutError::UnknownGravity {
                word: unknown_word(input, lexer.span().start),
            })?;
            gravity = gravity
                | match keyword {
                    Keyword::Left => Gravity::LEFT,
                    Keyword::Right => Gravity::RIGHT,
                    Keyword::Top => Gravity::TOP,
                    Keyword::Bottom => Gravity::BOTTOM,
                    Keyword::CenterX => Gravity::CENTER_X,
                    Keyword::CenterY => Gravity::CENTER_Y,
                    Keyword::Word => {
                        return Err(LayoutError::UnknownGravity {
                            word: lexer.slice().to_owned(),
                        })
                    }
                };
        }
        Ok(gravity)
    }

    /// Whether all bits of `other` are present.
    #[inline]
    pub fn contains(self, other: Gravity) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether no keyword is set.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Gravity {
    type Output = Gravity;
    fn bitor(self, rhs: Self) -> Self::Output {
        Gravity(self.0 | rhs.0)
    }
}

/// Recover the whole offending word around a lexer error position.
fn unknown_word(input: &str, start: usize) -> String {
    let begin = input[..start]
        .rfind(|c: char| c.is_whitespace() || c == ',')
        .map_or(0, |i| i + 1);
    input[begin..]
        .split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .unwrap_or_default()
        .to_owned()
}

// ===========================================================================
// Tests
// ===========================================================================
