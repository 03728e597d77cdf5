//! ANSI escape sequence scanning.

/// Byte length of the escape sequence starting at `pos`, if one starts there.
///
/// Recognises CSI (`ESC [`), the string-terminated families (OSC `ESC ]`, DCS `ESC P`,
/// APC `ESC _`) ending in BEL or ST, and SS3 (`ESC O x`). Unterminated sequences are not
/// sequences.
pub fn ansi_sequence_len(input: &str, pos: usize) -> Option<usize> {
    let bytes = input.as_bytes();
    if bytes.get(pos) != Some(&0x1b) {
        return None;
    }

    match *bytes.get(pos + 1)? {
        b'[' => bytes[pos + 2..]
            .iter()
            .position(|b| (0x40..=0x7e).contains(b))
            .map(|offset| offset + 3),
        b']' | b'P' | b'_' => {
            let body = &bytes[pos + 2..];
            for (offset, byte) in body.iter().enumerate() {
                if *byte == 0x07 {
                    return Some(offset + 3);
                }
                if *byte == 0x1b && body.get(offset + 1) == Some(&b'\\') {
                    return Some(offset + 4);
                }
            }
            None
        }
        b'O' if pos + 2 < bytes.len() => {
            let ch = input[pos + 2..].chars().next()?;
            Some(2 + ch.len_utf8())
        }
        _ => None,
    }
}

/// Returns `input` with every complete escape sequence removed.
pub fn strip_ansi(input: &str) -> String {
    let mut clean = String::with_capacity(input.len());
    let mut idx = 0;
    while idx < input.len() {
        if let Some(len) = ansi_sequence_len(input, idx) {
            idx += len;
            continue;
        }
        let Some(ch) = input[idx..].chars().next() else {
            break;
        };
        clean.push(ch);
        idx += ch.len_utf8();
    }
    clean
}
