/// A logical key understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Enter,
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Backspace,
    Delete,
    /// A printable character other than space.
    Char(char),
}

impl EditorKey {
    /// Key for a typed character. Control characters are not editor keys.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            ' ' => Some(Self::Space),
            ch if ch.is_control() => None,
            ch => Some(Self::Char(ch)),
        }
    }

    /// Whether the key can change buffer content.
    pub const fn edits(self) -> bool {
        matches!(
            self,
            Self::Enter | Self::Space | Self::Char(_) | Self::Backspace | Self::Delete
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char_maps_space_and_printables() {
        assert_eq!(EditorKey::from_char(' '), Some(EditorKey::Space));
        assert_eq!(EditorKey::from_char('x'), Some(EditorKey::Char('x')));
        assert_eq!(EditorKey::from_char('ж'), Some(EditorKey::Char('ж')));
    }

    #[test]
    fn test_from_char_rejects_control_chars() {
        assert_eq!(EditorKey::from_char('\n'), None);
        assert_eq!(EditorKey::from_char('\t'), None);
        assert_eq!(EditorKey::from_char('\u{7f}'), None);
    }

    #[test]
    fn test_edits_distinguishes_navigation() {
        assert!(EditorKey::Backspace.edits());
        assert!(EditorKey::Char('a').edits());
        assert!(!EditorKey::ArrowUp.edits());
        assert!(!EditorKey::Home.edits());
    }
}
