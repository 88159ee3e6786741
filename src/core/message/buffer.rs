//! Capture of mixed-content messages.
//!
//! A [`MessageBuffer`] records the events inside one translatable element and
//! flattens them into a message identifier such as
//! `Click [1:here] to see %(count)s items`. Nested elements become numbered
//! `[N:...]` blocks and expressions become `%(name)s` parameters.
//!
//! Replaying a translation ([`MessageBuffer::translate`]) walks the
//! translated string and re-emits the captured start/end tags and
//! expression events in the order the translation asks for, so attributes
//! and expression values survive translation untouched.

use std::{
    collections::{HashMap, VecDeque},
    sync::LazyLock,
};

use log::debug;
use regex::Regex;

use crate::core::{
    error::{I18nError, Result},
    message::parse::parse_msg,
    stream::{Event, Pos},
};

static PARAM_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"%\((\w+)\)s").unwrap());

/// One captured entry of a placeholder block.
#[derive(Debug, Clone)]
enum Slot {
    /// Text or expression position; filled from the translated string.
    Text,
    /// A nested start or end tag, replayed verbatim.
    Event(Event),
}

/// Accumulates the events of one translatable element.
#[derive(Debug, Clone)]
pub struct MessageBuffer {
    /// Parameter names not yet bound to an expression.
    params: VecDeque<String>,
    /// Parameter names as declared, for error messages.
    declared: Vec<String>,
    comment: Option<String>,
    lineno: usize,
    string: Vec<String>,
    events: HashMap<usize, VecDeque<Slot>>,
    values: HashMap<String, Event>,
    stack: Vec<usize>,
    depth: usize,
    order: usize,
}

impl MessageBuffer {
    /// Create a buffer whose expressions bind to `params` in order.
    ///
    /// The buffer starts inside the element that owns the message: that
    /// element's own start tag is never appended, and its end tag closes
    /// the buffer without being recorded.
    pub fn new(params: Vec<String>) -> Self {
        Self {
            params: params.iter().cloned().collect(),
            declared: params,
            comment: None,
            lineno: 0,
            string: Vec::new(),
            // The root block always exists, even without top-level text.
            events: HashMap::from([(0, VecDeque::new())]),
            values: HashMap::new(),
            stack: vec![0],
            depth: 1,
            order: 1,
        }
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    /// Set the line the message starts on.
    pub fn at_line(mut self, lineno: usize) -> Self {
        self.lineno = lineno;
        self
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn lineno(&self) -> usize {
        self.lineno
    }

    /// Open element depth; `0` once the owning element's end tag was seen.
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn current_order(&self) -> usize {
        self.stack.last().copied().unwrap_or(0)
    }

    fn slots(&mut self, order: usize) -> &mut VecDeque<Slot> {
        self.events.entry(order).or_default()
    }

    /// Append a stream event.
    ///
    /// Fails with [`I18nError::MissingParameter`] when an expression arrives
    /// after all declared parameters are bound.
    pub fn append(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Text { text, .. } => {
                self.string.push(text);
                let order = self.current_order();
                self.slots(order).push_back(Slot::Text);
            }
            expr @ Event::Expr { .. } => {
                let Some(param) = self.params.pop_front() else {
                    return Err(I18nError::MissingParameter {
                        line: expr.line(),
                        params: self.declared.clone(),
                    });
                };
                self.string.push(format!("%({})s", param));
                let order = self.current_order();
                self.slots(order).push_back(Slot::Text);
                self.values.insert(param, expr);
            }
            start @ Event::Start { .. } => {
                let order = self.order;
                self.string.push(format!("[{}:", order));
                self.slots(order).push_back(Slot::Event(start));
                self.stack.push(order);
                self.depth += 1;
                self.order += 1;
            }
            end @ Event::End { .. } => {
                self.depth = self.depth.saturating_sub(1);
                if self.depth > 0 {
                    let order = self.current_order();
                    self.slots(order).push_back(Slot::Event(end));
                    self.string.push("]".to_string());
                    self.stack.pop();
                }
            }
            Event::Sub { stream, .. } => {
                for event in stream {
                    self.append(event)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// The message identifier for the captured content.
    pub fn format(&self) -> String {
        self.string.concat().trim().to_string()
    }

    /// Interpolate a translation of [`format`](Self::format) with the
    /// captured events.
    ///
    /// Consumes the buffer: each captured tag is replayed at most once.
    /// Bracket errors in `translation` are reported here; references to
    /// unknown blocks or parameters surface while iterating.
    pub fn translate(self, translation: &str) -> Result<Replay> {
        let parts = parse_msg(translation)?;
        let mut remaining: HashMap<usize, usize> = HashMap::new();
        for (order, _) in &parts {
            *remaining.entry(*order).or_default() += 1;
        }
        Ok(Replay {
            parts: parts.into_iter(),
            remaining,
            events: self.events,
            values: self.values,
            pending: VecDeque::new(),
            failed: false,
        })
    }
}

/// Translated events produced by [`MessageBuffer::translate`].
///
/// Events follow the order of the translated string. Iteration stops after
/// the first error.
#[derive(Debug)]
pub struct Replay {
    parts: std::vec::IntoIter<(usize, String)>,
    /// Fragments still to come per block.
    remaining: HashMap<usize, usize>,
    events: HashMap<usize, VecDeque<Slot>>,
    values: HashMap<String, Event>,
    pending: VecDeque<Event>,
    failed: bool,
}

impl Replay {
    /// Replay one fragment of block `order`.
    ///
    /// The last fragment of a block drains it: remaining tags are emitted
    /// and surplus text slots dropped, so every captured element is closed.
    fn replay_part(&mut self, order: usize, text: &str, last: bool) -> Result<()> {
        let slots = self
            .events
            .get_mut(&order)
            .ok_or(I18nError::UnknownPlaceholder { order })?;

        if order != 0 && slots.is_empty() {
            debug!("placeholder block {} already replayed, nothing left to emit", order);
            return Ok(());
        }

        let mut filled = false;
        while let Some(slot) = slots.pop_front() {
            match slot {
                Slot::Event(event) => {
                    // Text for a block captured without any text goes
                    // before its closing tag.
                    if !filled && matches!(event, Event::End { .. }) {
                        interpolate(text, &self.values, &mut self.pending)?;
                        filled = true;
                    }
                    self.pending.push_back(event);
                }
                Slot::Text if filled => {}
                Slot::Text => {
                    interpolate(text, &self.values, &mut self.pending)?;
                    filled = true;
                    // Leave following text slots to later fragments of this
                    // block, but still close any element that ends here.
                    if !last && !matches!(slots.front(), Some(Slot::Event(_))) {
                        break;
                    }
                }
            }
        }
        if !filled {
            interpolate(text, &self.values, &mut self.pending)?;
        }
        Ok(())
    }
}

impl Iterator for Replay {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.failed {
                return None;
            }
            let (order, text) = self.parts.next()?;
            let remaining = self.remaining.entry(order).or_default();
            *remaining = remaining.saturating_sub(1);
            let last = *remaining == 0;
            if let Err(err) = self.replay_part(order, &text, last) {
                self.failed = true;
                self.pending.clear();
                return Some(Err(err));
            }
        }
    }
}

/// Split `text` on `%(name)s` and queue literal text and captured values.
fn interpolate(
    text: &str,
    values: &HashMap<String, Event>,
    out: &mut VecDeque<Event>,
) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    let mut last = 0;
    for caps in PARAM_REGEX.captures_iter(text) {
        let (Some(mat), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if mat.start() > last {
            out.push_back(Event::text(&text[last..mat.start()], Pos::default()));
        }
        let value = values
            .get(name.as_str())
            .ok_or_else(|| I18nError::UnknownParameter {
                name: name.as_str().to_string(),
            })?;
        out.push_back(value.clone());
        last = mat.end();
    }
    if last < text.len() {
        out.push_back(Event::text(&text[last..], Pos::default()));
    }
    Ok(())
}

