//! Structured input events decoded from raw terminal bytes.

/// Input event delivered to components.
///
/// Notes:
/// - `raw` is the exact sequence received from the terminal (UTF-8 decoded) when applicable.
/// - `key_id` is a normalized identifier such as `"escape"`, `"ctrl+c"` or `"up"`, used for
///   matching keybindings.
/// - Consecutive printable characters are grouped into one `Text` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key { raw: String, key_id: String },
    Text { raw: String, text: String },
    UnknownRaw { raw: String },
}

impl InputEvent {
    pub fn key_id(&self) -> Option<&str> {
        match self {
            InputEvent::Key { key_id, .. } => Some(key_id.as_str()),
            _ => None,
        }
    }
}

const CSI_KEYS: &[(&str, &str)] = &[
    ("\x1b[A", "up"),
    ("\x1b[B", "down"),
    ("\x1b[C", "right"),
    ("\x1b[D", "left"),
    ("\x1b[H", "home"),
    ("\x1b[F", "end"),
    ("\x1b[3~", "delete"),
    ("\x1b[5~", "pageUp"),
    ("\x1b[6~", "pageDown"),
    ("\x1b[Z", "shift+tab"),
    ("\x1bOA", "up"),
    ("\x1bOB", "down"),
    ("\x1bOC", "right"),
    ("\x1bOD", "left"),
];

fn control_key_id(ch: char) -> Option<String> {
    let id = match ch {
        '\r' | '\n' => "enter".to_string(),
        '\t' => "tab".to_string(),
        '\x7f' | '\x08' => "backspace".to_string(),
        '\x00' => "ctrl+space".to_string(),
        '\x01'..='\x1a' => {
            let letter = (b'a' + (ch as u8 - 1)) as char;
            format!("ctrl+{letter}")
        }
        _ => return None,
    };
    Some(id)
}

/// Splits one read from stdin into events.
///
/// A lone ESC is the escape key; ESC followed by a known sequence is that key; ESC followed by
/// a printable character is `alt+<char>`. Anything else starting with ESC is `UnknownRaw`.
pub fn parse_input_events(data: &str) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let mut text = String::new();
    let mut rest = data;

    fn flush_text(text: &mut String, events: &mut Vec<InputEvent>) {
        if !text.is_empty() {
            let text = std::mem::take(text);
            events.push(InputEvent::Text {
                raw: text.clone(),
                text,
            });
        }
    }

    while let Some(ch) = rest.chars().next() {
        if ch == '\x1b' {
            flush_text(&mut text, &mut events);
            let (event, consumed) = parse_escape(rest);
            events.push(event);
            rest = &rest[consumed..];
            continue;
        }

        let len = ch.len_utf8();
        if let Some(key_id) = control_key_id(ch) {
            flush_text(&mut text, &mut events);
            events.push(InputEvent::Key {
                raw: rest[..len].to_string(),
                key_id,
            });
        } else if ch.is_control() {
            flush_text(&mut text, &mut events);
            events.push(InputEvent::UnknownRaw {
                raw: rest[..len].to_string(),
            });
        } else {
            text.push(ch);
        }
        rest = &rest[len..];
    }

    flush_text(&mut text, &mut events);
    events
}

fn parse_escape(data: &str) -> (InputEvent, usize) {
    for (sequence, key_id) in CSI_KEYS {
        if data.starts_with(sequence) {
            let event = InputEvent::Key {
                raw: (*sequence).to_string(),
                key_id: (*key_id).to_string(),
            };
            return (event, sequence.len());
        }
    }

    let mut chars = data.chars();
    chars.next();
    match chars.next() {
        None => (
            InputEvent::Key {
                raw: "\x1b".to_string(),
                key_id: "escape".to_string(),
            },
            1,
        ),
        Some('\x1b') => (
            InputEvent::Key {
                raw: "\x1b".to_string(),
                key_id: "escape".to_string(),
            },
            1,
        ),
        Some('[') | Some('O') => {
            let consumed = unknown_sequence_len(data);
            (
                InputEvent::UnknownRaw {
                    raw: data[..consumed].to_string(),
                },
                consumed,
            )
        }
        Some(next) if !next.is_control() => {
            let consumed = 1 + next.len_utf8();
            (
                InputEvent::Key {
                    raw: data[..consumed].to_string(),
                    key_id: format!("alt+{}", next.to_ascii_lowercase()),
                },
                consumed,
            )
        }
        Some(_) => (
            InputEvent::Key {
                raw: "\x1b".to_string(),
                key_id: "escape".to_string(),
            },
            1,
        ),
    }
}

/// Length of an unrecognized CSI/SS3 sequence, up to and including its final byte.
fn unknown_sequence_len(data: &str) -> usize {
    let bytes = data.as_bytes();
    let mut end = 2;
    while end < bytes.len() {
        let byte = bytes[end];
        end += 1;
        if (0x40..=0x7e).contains(&byte) {
            return end;
        }
    }
    bytes.len()
}

#[cfg(test)]
mod tests {
    use super::{parse_input_events, InputEvent};
    use pretty_assertions::assert_eq;

    fn key(raw: &str, key_id: &str) -> InputEvent {
        InputEvent::Key {
            raw: raw.to_string(),
            key_id: key_id.to_string(),
        }
    }

    #[test]
    fn space_is_text_not_key() {
        assert_eq!(
            parse_input_events(" "),
            vec![InputEvent::Text {
                raw: " ".to_string(),
                text: " ".to_string(),
            }]
        );
    }

    #[test]
    fn control_keys_become_key_events() {
        assert_eq!(parse_input_events("\r"), vec![key("\r", "enter")]);
        assert_eq!(parse_input_events("\x1b"), vec![key("\x1b", "escape")]);
        assert_eq!(parse_input_events("\x03"), vec![key("\x03", "ctrl+c")]);
        assert_eq!(parse_input_events("\x1b[A"), vec![key("\x1b[A", "up")]);
        assert_eq!(parse_input_events("\x1bq"), vec![key("\x1bq", "alt+q")]);
    }

    #[test]
    fn text_is_grouped_between_keys() {
        assert_eq!(
            parse_input_events("qa\r"),
            vec![
                InputEvent::Text {
                    raw: "qa".to_string(),
                    text: "qa".to_string(),
                },
                key("\r", "enter"),
            ]
        );
    }

    #[test]
    fn unknown_csi_is_consumed_whole() {
        assert_eq!(
            parse_input_events("\x1b[99;5Xq"),
            vec![
                InputEvent::UnknownRaw {
                    raw: "\x1b[99;5X".to_string(),
                },
                InputEvent::Text {
                    raw: "q".to_string(),
                    text: "q".to_string(),
                },
            ]
        );
    }

    #[test]
    fn key_id_only_for_keys() {
        assert_eq!(parse_input_events("\x1b")[0].key_id(), Some("escape"));
        assert_eq!(parse_input_events("x")[0].key_id(), None);
    }
}
