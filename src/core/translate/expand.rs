//! Render-time execution of the i18n directives.
//!
//! After [`Translator`](super::Translator) has translated free text, `msg`
//! regions still hold source text and `Sub` events still carry i18n
//! directives. Expanding a stream replaces each `msg` region with its
//! translated message, applies `domain` scopes and drops `comment`
//! directives. Directives owned by the template engine (and the plural
//! `choose` family, whose numeral must be evaluated) stay in place.

use std::collections::VecDeque;

use log::debug;

use crate::core::{
    directives::Directive,
    error::Result,
    message::MessageBuffer,
    stream::{Event, Pos},
    translate::gettext::Gettext,
};

/// Expand the i18n directives of `stream`, looking messages up in `gettext`.
///
/// Iteration stops after the first error.
pub fn expand<I>(gettext: &Gettext, stream: I) -> Expansion<'_, I::IntoIter>
where
    I: IntoIterator<Item = Event>,
{
    Expansion {
        expander: Expander {
            gettext,
            domains: Vec::new(),
        },
        events: stream.into_iter(),
        pending: VecDeque::new(),
        failed: false,
    }
}

/// Iterator returned by [`expand`].
pub struct Expansion<'g, I> {
    expander: Expander<'g>,
    events: I,
    pending: VecDeque<Event>,
    failed: bool,
}

impl<I: Iterator<Item = Event>> Iterator for Expansion<'_, I> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.failed {
                return None;
            }
            let event = self.events.next()?;
            if let Err(err) = self.expander.expand_event(event, &mut self.pending) {
                self.failed = true;
                self.pending.clear();
                return Some(Err(err));
            }
        }
    }
}

struct Expander<'g> {
    gettext: &'g Gettext,
    domains: Vec<String>,
}

impl Expander<'_> {
    fn expand_event(&mut self, event: Event, out: &mut VecDeque<Event>) -> Result<()> {
        match event {
            Event::Sub {
                directives,
                stream,
                pos,
            } => self.expand_sub(directives, stream, pos, out),
            other => {
                out.push_back(other);
                Ok(())
            }
        }
    }

    fn expand_sub(
        &mut self,
        directives: Vec<Directive>,
        stream: Vec<Event>,
        pos: Pos,
        out: &mut VecDeque<Event>,
    ) -> Result<()> {
        let domain = directives.iter().find_map(|d| match d {
            Directive::Domain(domain) => Some(domain.clone()),
            _ => None,
        });
        if let Some(domain) = &domain {
            self.domains.push(domain.clone());
        }

        let body = self.expand_body(&directives, stream, pos.line);

        if domain.is_some() {
            self.domains.pop();
        }
        let body = body?;

        let remaining: Vec<Directive> = directives
            .into_iter()
            .filter(|d| {
                !matches!(
                    d,
                    Directive::Comment(_) | Directive::Domain(_) | Directive::Msg { .. }
                )
            })
            .collect();

        if remaining.is_empty() {
            out.extend(body);
        } else {
            out.push_back(Event::Sub {
                directives: remaining,
                stream: body,
                pos,
            });
        }
        Ok(())
    }

    fn expand_body(
        &mut self,
        directives: &[Directive],
        stream: Vec<Event>,
        line: usize,
    ) -> Result<Vec<Event>> {
        let params = directives.iter().find_map(|d| match d {
            Directive::Msg { params } => Some(params.clone()),
            _ => None,
        });

        match params {
            Some(params) if stream.len() >= 2 => self.expand_msg(params, stream, line),
            _ => {
                let mut body = VecDeque::new();
                for event in stream {
                    self.expand_event(event, &mut body)?;
                }
                Ok(body.into())
            }
        }
    }

    /// Replace the content of a `msg` region with its translation, keeping
    /// the region's own start and end tags.
    fn expand_msg(
        &self,
        params: Vec<String>,
        mut stream: Vec<Event>,
        line: usize,
    ) -> Result<Vec<Event>> {
        let mut inner = stream.split_off(1);
        let (Some(start), Some(end)) = (stream.pop(), inner.pop()) else {
            return Ok(Vec::new());
        };

        let mut buffer = MessageBuffer::new(params).at_line(line);
        for event in inner {
            buffer.append(event)?;
        }

        let message = buffer.format();
        let translation = self
            .gettext
            .lookup(self.domains.last().map(String::as_str), &message)?;
        debug!("msg at line {}: {:?} -> {:?}", line, message, translation);

        let mut events = vec![start];
        for event in buffer.translate(&translation)? {
            events.push(event?);
        }
        events.push(end);
        Ok(events)
    }
}
