//! The markup scanner.
//!
//! The scanner does not build anything itself. It reports text runs and raw
//! tag contents to a [`TokenSink`], which lets the normal tree builder and
//! the view-source builder share one scanning loop.

/// Receiver for scanner output.
pub trait TokenSink {
    /// A run of text between tags, with entity references already decoded.
    /// May be blank; sinks decide whether to keep it.
    fn text(&mut self, text: &str);

    /// The raw contents of a tag, without the surrounding `<` and `>`.
    fn tag(&mut self, raw: &str);
}

/// The three scanning states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Accumulating character data.
    Text,
    /// Between `<` and `>`.
    Tag,
    /// After `&` in text, accumulating an entity name.
    Entity,
}

/// Decode a character reference name (the part between `&` and `;`).
///
/// Unknown names are returned literally as `&name;`.
#[must_use]
pub fn decode_entity(name: &str) -> String {
    match name {
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "amp" => "&".to_string(),
        "quot" => "\"".to_string(),
        _ => {
            log::debug!(target: "lumen::html", "unknown entity '&{name};' kept literally");
            format!("&{name};")
        }
    }
}

/// Scan `markup` once from left to right, reporting to `sink`.
///
/// # Algorithm
///
/// - `<` flushes any pending text and enters the tag state.
/// - `>` in the tag state dispatches the tag contents and returns to text.
///   Outside a tag it is ordinary text.
/// - `&` in the text state starts an entity reference. `;` ends it and the
///   decoded value joins the pending text. Any character that cannot be part
///   of an entity name ends the reference early and it is kept literally.
/// - At end of input pending text (including an unfinished entity) is
///   flushed. An unterminated tag is dropped.
pub fn scan<S: TokenSink + ?Sized>(markup: &str, sink: &mut S) {
    let mut state = ScanState::Text;
    let mut buffer = String::new();
    let mut entity = String::new();

    for c in markup.chars() {
        if state == ScanState::Entity {
            if c == ';' {
                buffer.push_str(&decode_entity(&entity));
                entity.clear();
                state = ScanState::Text;
                continue;
            }
            if c.is_ascii_alphanumeric() {
                entity.push(c);
                continue;
            }
            // Interrupted reference: keep it as written and reprocess `c`.
            buffer.push('&');
            buffer.push_str(&entity);
            entity.clear();
            state = ScanState::Text;
        }

        match (state, c) {
            (_, '<') => {
                if !buffer.is_empty() {
                    sink.text(&buffer);
                    buffer.clear();
                }
                state = ScanState::Tag;
            }
            (ScanState::Tag, '>') => {
                sink.tag(&buffer);
                buffer.clear();
                state = ScanState::Text;
            }
            (ScanState::Text, '&') => state = ScanState::Entity,
            _ => buffer.push(c),
        }
    }

    match state {
        ScanState::Entity => {
            buffer.push('&');
            buffer.push_str(&entity);
            sink.text(&buffer);
        }
        ScanState::Text if !buffer.is_empty() => sink.text(&buffer),
        ScanState::Text => {}
        ScanState::Tag => {
            log::debug!(target: "lumen::html", "dropping unterminated tag '<{buffer}'");
        }
    }
}
