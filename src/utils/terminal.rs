//! Terminal output sanitization
//!
//! Alias bodies and comments come straight from shell source files and can carry
//! raw escape sequences (prompt colors, window titles, `bindkey` key codes).
//! Anything printed in text mode goes through [`sanitize_for_terminal`] so
//! listing a topic never restyles or moves the user's terminal.

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Removes escape sequences and control characters from text bound for a terminal
///
/// Handles CSI sequences (`ESC [ ... final`), OSC sequences (`ESC ] ... BEL` or
/// `ESC ] ... ESC \`) and two-character escapes. Tabs survive; every other
/// control character, newlines included, is dropped since records print one
/// per line.
///
/// # Examples
///
/// ```
/// use dotfiles_topics::utils::terminal::sanitize_for_terminal;
///
/// assert_eq!(sanitize_for_terminal("\x1b[1;32mgit status\x1b[0m"), "git status");
/// ```
pub fn sanitize_for_terminal(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == ESC {
            match chars.next() {
                Some('[') => {
                    // Parameters and intermediates run until a byte in 0x40..=0x7e
                    for next in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&next) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    while let Some(next) = chars.next() {
                        if next == BEL {
                            break;
                        }
                        if next == ESC && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                // Two-character escape (or a dangling ESC at end of input)
                _ => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\t' {
            continue;
        }

        result.push(ch);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_csi_colors() {
        assert_eq!(sanitize_for_terminal("\x1b[31mred\x1b[0m plain"), "red plain");
    }

    #[test]
    fn test_sanitize_osc_title_bel_terminated() {
        assert_eq!(sanitize_for_terminal("\x1b]0;my title\x07prompt"), "prompt");
    }

    #[test]
    fn test_sanitize_osc_st_terminated() {
        assert_eq!(sanitize_for_terminal("a\x1b]8;;http://x\x1b\\link"), "alink");
    }

    #[test]
    fn test_sanitize_two_char_escape() {
        assert_eq!(sanitize_for_terminal("\x1bcreset"), "reset");
    }

    #[test]
    fn test_sanitize_drops_newlines_keeps_tabs() {
        assert_eq!(sanitize_for_terminal("a\nb\tc\r"), "ab\tc");
    }

    #[test]
    fn test_sanitize_plain_and_unicode() {
        assert_eq!(sanitize_for_terminal("ls -la ▸ ✓"), "ls -la ▸ ✓");
        assert_eq!(sanitize_for_terminal(""), "");
    }

    #[test]
    fn test_sanitize_dangling_escape() {
        assert_eq!(sanitize_for_terminal("text\x1b"), "text");
    }
}
