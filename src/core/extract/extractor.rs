//! Walks an event stream and yields every localizable string.
//!
//! Extraction mirrors translation: the same elements are skipped and the
//! same attributes are considered. Free text yields one message per text
//! node, `msg` regions yield one message for the whole mixed-content
//! fragment, and embedded expressions yield the arguments of gettext calls.

use std::{collections::VecDeque, fmt};

use log::debug;
use serde::Serialize;

use crate::core::{
    directives::{Directive, parse_params},
    error::Result,
    extract::scanner::{GETTEXT_FUNCTIONS, scan},
    message::MessageBuffer,
    options::Options,
    stream::{AttrValue, Event, QName},
};
use crate::utils::contains_alphabetic;

/// The text of an extracted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Message {
    /// A single string; `None` when a call argument was not a literal.
    Single(Option<String>),
    /// All argument slots of a multi-argument call, such as the singular
    /// and plural forms of `ngettext`.
    Multiple(Vec<Option<String>>),
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Message::Single(Some(text.into()))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = |s: &Option<String>| s.clone().unwrap_or_else(|| "<dynamic>".to_string());
        match self {
            Message::Single(s) => f.write_str(&slot(s)),
            Message::Multiple(slots) => {
                let parts: Vec<String> = slots.iter().map(slot).collect();
                write!(f, "({})", parts.join(" | "))
            }
        }
    }
}

/// One extraction result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedMessage {
    pub line: usize,
    /// Name of the gettext function for strings found in expressions.
    pub function: Option<String>,
    pub message: Message,
    /// Translator comments in effect for the message.
    pub comments: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Extractor {
    pub options: Options,
    pub gettext_functions: Vec<String>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            options: Options::default(),
            gettext_functions: GETTEXT_FUNCTIONS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Extractor {
    pub fn new(options: Options, gettext_functions: Vec<String>) -> Self {
        Self {
            options,
            gettext_functions,
        }
    }

    /// Extract messages from a stream.
    ///
    /// Top-level events are pulled on demand; a `Sub` event is walked
    /// completely before its messages are yielded. Iteration stops after the
    /// first error.
    pub fn extract<I>(&self, stream: I) -> Extraction<'_, I::IntoIter>
    where
        I: IntoIterator<Item = Event>,
    {
        Extraction {
            walker: Walker {
                extractor: self,
                comments: Vec::new(),
            },
            events: stream.into_iter(),
            scope: Scope::new(self.options.extract_text),
            buffer: None,
            pending: VecDeque::new(),
            failed: false,
        }
    }
}

/// Iterator returned by [`Extractor::extract`].
pub struct Extraction<'x, I> {
    walker: Walker<'x>,
    events: I,
    scope: Scope,
    buffer: Option<MessageBuffer>,
    pending: VecDeque<Result<ExtractedMessage>>,
    failed: bool,
}

impl<I: Iterator<Item = Event>> Iterator for Extraction<'_, I> {
    type Item = Result<ExtractedMessage>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                if item.is_err() {
                    self.failed = true;
                    self.pending.clear();
                }
                return Some(item);
            }
            if self.failed {
                return None;
            }
            let event = self.events.next()?;
            self.walker
                .visit(event, &mut self.scope, &mut self.buffer, &mut self.pending);
        }
    }
}

type Out = VecDeque<Result<ExtractedMessage>>;

/// Per-stream walk state. Each substream gets a fresh scope.
#[derive(Debug, Clone, Copy)]
struct Scope {
    skip: usize,
    search_text: bool,
}

impl Scope {
    fn new(search_text: bool) -> Self {
        Self {
            skip: 0,
            search_text,
        }
    }
}

struct Walker<'x> {
    extractor: &'x Extractor,
    /// `i18n:comment` values of the enclosing `Sub` events.
    comments: Vec<String>,
}

impl Walker<'_> {
    fn options(&self) -> &Options {
        &self.extractor.options
    }

    fn current_comments(&self) -> Vec<String> {
        self.comments.last().cloned().into_iter().collect()
    }

    fn visit_stream(
        &mut self,
        stream: Vec<Event>,
        search_text: bool,
        buffer: &mut Option<MessageBuffer>,
        out: &mut Out,
    ) {
        let mut scope = Scope::new(search_text && self.options().extract_text);
        for event in stream {
            self.visit(event, &mut scope, buffer, out);
        }
    }

    fn visit(
        &mut self,
        event: Event,
        scope: &mut Scope,
        buffer: &mut Option<MessageBuffer>,
        out: &mut Out,
    ) {
        if scope.skip > 0 {
            match &event {
                Event::Start { .. } => scope.skip += 1,
                Event::End { .. } => scope.skip -= 1,
                _ => {}
            }
            // Calls in code are found even in skipped regions.
            self.scan_only(&event, out);
            return;
        }

        match event {
            Event::Start { tag, attrs, pos } => {
                if self.options().skips(&tag, &attrs) {
                    debug!("not extracting from `{}` at line {}", tag, pos.line);
                    scope.skip = 1;
                    return;
                }

                for (name, value) in attrs.iter() {
                    match value {
                        AttrValue::Text(text) => {
                            if scope.search_text && self.options().includes_attr(name) {
                                let text = text.trim();
                                if !text.is_empty() {
                                    out.push_back(Ok(ExtractedMessage {
                                        line: pos.line,
                                        function: None,
                                        message: Message::text(text),
                                        comments: Vec::new(),
                                    }));
                                }
                            }
                        }
                        AttrValue::Stream(events) => {
                            self.visit_stream(events.clone(), false, &mut None, out);
                        }
                    }
                }

                if let Some(open) = buffer.as_mut() {
                    append(open, Event::Start { tag, attrs, pos }, out);
                } else if let Some(params) = attrs.get(&QName::i18n("msg")) {
                    // An explicit `i18n:msg` attribute opens a buffer that
                    // closes with this element's end tag.
                    let comment = attrs
                        .get(&QName::i18n("comment"))
                        .map(attr_text)
                        .or_else(|| self.comments.last().cloned());
                    *buffer = Some(
                        MessageBuffer::new(parse_params(&attr_text(params)))
                            .with_comment(comment)
                            .at_line(pos.line),
                    );
                }
            }
            Event::Text { text, pos } => match buffer {
                Some(open) => append(open, Event::Text { text, pos }, out),
                None if scope.search_text => {
                    let text = text.trim();
                    if contains_alphabetic(text) {
                        out.push_back(Ok(ExtractedMessage {
                            line: pos.line,
                            function: None,
                            message: Message::text(text),
                            comments: self.current_comments(),
                        }));
                    }
                }
                None => {}
            },
            end @ Event::End { .. } => {
                let closed = match buffer.as_mut() {
                    Some(open) => {
                        append(open, end, out);
                        open.depth() == 0
                    }
                    None => false,
                };
                if closed && let Some(done) = buffer.take() {
                    out.push_back(Ok(ExtractedMessage {
                        line: done.lineno(),
                        function: None,
                        message: Message::text(done.format()),
                        comments: done.comment().map(String::from).into_iter().collect(),
                    }));
                }
            }
            code @ (Event::Expr { .. } | Event::Exec { .. }) => {
                self.scan_only(&code, out);
                if let Some(open) = buffer {
                    append(open, code, out);
                }
            }
            Event::Sub {
                directives,
                stream,
                pos,
            } => self.visit_sub(directives, stream, pos.line, scope, buffer, out),
            _ => {}
        }
    }

    fn visit_sub(
        &mut self,
        directives: Vec<Directive>,
        stream: Vec<Event>,
        line: usize,
        scope: &Scope,
        buffer: &mut Option<MessageBuffer>,
        out: &mut Out,
    ) {
        let comment = directives.iter().find_map(|d| match d {
            Directive::Comment(text) => Some(text.clone()),
            _ => None,
        });
        if let Some(comment) = &comment {
            self.comments.push(comment.clone());
        }

        let messages: Vec<&Directive> = directives.iter().filter(|d| d.is_message()).collect();
        if messages.is_empty() {
            self.visit_stream(stream, scope.search_text, buffer, out);
        } else {
            for directive in messages {
                let extracted = match directive {
                    Directive::Msg { params } => self.extract_msg(params, &stream, line),
                    Directive::Choose { params, .. } => self.extract_choose(params, &stream, line),
                    _ => continue,
                };
                out.push_back(extracted);
            }
        }

        if comment.is_some() {
            self.comments.pop();
        }
    }

    /// One message for a `msg` region, without its outer element.
    fn extract_msg(&self, params: &[String], stream: &[Event], line: usize) -> Result<ExtractedMessage> {
        let mut buffer = MessageBuffer::new(params.to_vec());
        for event in inner(stream) {
            buffer.append(event.clone())?;
        }
        Ok(ExtractedMessage {
            line,
            function: None,
            message: Message::text(buffer.format()),
            comments: self.current_comments(),
        })
    }

    /// One `ngettext` message for a `choose` region: the singular and plural
    /// blocks each fill their own buffer, everything else goes to both.
    fn extract_choose(
        &self,
        params: &[String],
        stream: &[Event],
        line: usize,
    ) -> Result<ExtractedMessage> {
        let mut singular = MessageBuffer::new(params.to_vec());
        let mut plural = MessageBuffer::new(params.to_vec());

        for event in stream.iter().skip(1) {
            match event {
                Event::Sub {
                    directives,
                    stream: substream,
                    ..
                } if directives.contains(&Directive::Singular) => {
                    for event in inner(substream) {
                        singular.append(event.clone())?;
                    }
                }
                Event::Sub {
                    directives,
                    stream: substream,
                    ..
                } if directives.contains(&Directive::Plural) => {
                    for event in inner(substream) {
                        plural.append(event.clone())?;
                    }
                }
                _ => {
                    singular.append(event.clone())?;
                    plural.append(event.clone())?;
                }
            }
        }

        Ok(ExtractedMessage {
            line,
            function: Some("ngettext".to_string()),
            message: Message::Multiple(vec![Some(singular.format()), Some(plural.format())]),
            comments: self.current_comments(),
        })
    }

    /// Report gettext calls in `event` and anything nested in it.
    fn scan_only(&self, event: &Event, out: &mut Out) {
        match event {
            Event::Expr { code, pos } | Event::Exec { code, pos } => {
                for (function, message) in scan(code, &self.extractor.gettext_functions) {
                    out.push_back(Ok(ExtractedMessage {
                        line: pos.line,
                        function: Some(function),
                        message,
                        comments: Vec::new(),
                    }));
                }
            }
            Event::Start { attrs, .. } => {
                for (_, value) in attrs.iter() {
                    if let AttrValue::Stream(events) = value {
                        events.iter().for_each(|e| self.scan_only(e, out));
                    }
                }
            }
            Event::Sub { stream, .. } => stream.iter().for_each(|e| self.scan_only(e, out)),
            _ => {}
        }
    }
}

/// Events between a region's outer start and end tags.
fn inner(stream: &[Event]) -> &[Event] {
    match stream.len() {
        0..=2 => &[],
        n => &stream[1..n - 1],
    }
}

/// Text of an attribute that may hold an expression stream.
fn attr_text(value: &AttrValue) -> String {
    match value {
        AttrValue::Text(text) => text.clone(),
        AttrValue::Stream(events) => events
            .iter()
            .filter_map(|event| match event {
                Event::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect(),
    }
}

fn append(buffer: &mut MessageBuffer, event: Event, out: &mut Out) {
    if let Err(err) = buffer.append(event) {
        out.push_back(Err(err));
    }
}

