//! Annotation record parsing.
//!
//! An annotation's raw text may open with up to two one-character tag
//! tokens before the note text proper. Each token is a character followed
//! by a delimiter: `:` marks a display glyph, `;` marks a color. The tags
//! are optional and order-independent; whatever remains after stripping
//! them is the literal text, embedded delimiters included. The parse is
//! deliberately permissive — a leading pattern that does not form a tag is
//! kept as text rather than rejected.

/// Colors an annotation may be tagged with, the game's note palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteColor {
    Red,
    Green,
    Blue,
    Cyan,
    Magenta,
    Yellow,
    White,
    Black,
    Pink,
    Brown,
}

impl NoteColor {
    /// Map a tag character onto the palette, case-insensitively.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'r' => Some(NoteColor::Red),
            'g' => Some(NoteColor::Green),
            'b' => Some(NoteColor::Blue),
            'c' => Some(NoteColor::Cyan),
            'm' => Some(NoteColor::Magenta),
            'y' => Some(NoteColor::Yellow),
            'w' => Some(NoteColor::White),
            'k' => Some(NoteColor::Black),
            'p' => Some(NoteColor::Pink),
            'n' => Some(NoteColor::Brown),
            _ => None,
        }
    }
}

/// A user-authored marker at a specific cell of a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Literal note text, tags stripped.
    pub text: String,

    /// Color tag, when present and recognized.
    pub color: Option<NoteColor>,

    /// Display glyph tag, when present.
    pub glyph: Option<char>,

    /// Cell column within the region.
    pub x: u32,

    /// Cell row within the region.
    pub y: u32,
}

/// Tag payload parsed from an annotation's raw text, before the cell
/// position from the marker line is attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedNote {
    pub text: String,
    pub color: Option<NoteColor>,
    pub glyph: Option<char>,
}

impl ParsedNote {
    /// Attach the cell position read from the record's marker line.
    pub fn at(self, x: u32, y: u32) -> Note {
        Note {
            text: self.text,
            color: self.color,
            glyph: self.glyph,
            x,
            y,
        }
    }
}

/// Parse one annotation's raw text.
///
/// The delimiter character alone decides the tag kind, independent of
/// position: `;` is always a color, `:` always a glyph. A color tag whose
/// character is outside the palette is consumed but contributes no color.
pub fn parse_note(raw: &str) -> ParsedNote {
    let mut text = raw;
    let mut color = None;
    let mut glyph = None;

    for _ in 0..2 {
        let mut chars = text.chars();
        let (Some(tag), Some(delim)) = (chars.next(), chars.next()) else {
            break;
        };
        match delim {
            ';' => match NoteColor::from_char(tag) {
                Some(c) => color = Some(c),
                None => {
                    tracing::warn!(tag = %tag, note = %raw, "Unrecognized note color tag");
                }
            },
            ':' => glyph = Some(tag),
            _ => break,
        }
        text = &text[tag.len_utf8() + delim.len_utf8()..];
    }

    ParsedNote {
        text: text.to_string(),
        color,
        glyph,
    }
}
