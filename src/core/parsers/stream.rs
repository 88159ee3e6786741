use std::{fs, path::Path};

use anyhow::{Context, Result};

use crate::core::stream::{AttrValue, Event};

/// Load an event stream from a JSON file.
///
/// Events that carry no filename of their own are stamped with `path`, so
/// later diagnostics can point back at the file.
pub fn parse_stream_file(path: &Path) -> Result<Vec<Event>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read stream file: {:?}", path))?;
    let mut events = parse_stream(&content)
        .with_context(|| format!("Failed to parse stream file: {:?}", path))?;

    let filename = path.to_string_lossy().to_string();
    stamp_filename(&mut events, &filename);
    Ok(events)
}

pub fn parse_stream(content: &str) -> Result<Vec<Event>> {
    Ok(serde_json::from_str(content)?)
}

fn stamp_filename(events: &mut [Event], filename: &str) {
    for event in events {
        match event {
            Event::Start { attrs, .. } => {
                for (_, value) in attrs.iter_mut() {
                    if let AttrValue::Stream(stream) = value {
                        stamp_filename(stream, filename);
                    }
                }
            }
            Event::Sub { stream, .. } => stamp_filename(stream, filename),
            _ => {}
        }
        let pos = event.pos_mut();
        if pos.filename.is_none() {
            pos.filename = Some(filename.to_string());
        }
    }
}
