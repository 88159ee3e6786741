//! Rewrites an event stream with translated text.

use log::debug;

use crate::core::{
    directives::Directive,
    error::Result,
    options::Options,
    stream::{AttrValue, Attrs, Event},
    translate::gettext::Gettext,
};
use crate::utils::replace_trimmed;

/// Translates free text and localizable attributes of a stream.
///
/// Text inside `msg` and `choose` regions is left alone; those regions are
/// translated as a whole when their directives are expanded.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    gettext: Gettext,
    options: Options,
}

impl Translator {
    pub fn new(gettext: Gettext) -> Self {
        Self {
            gettext,
            options: Options::default(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn gettext(&self) -> &Gettext {
        &self.gettext
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Translate a stream lazily. Iteration stops after the first error.
    pub fn translate<I>(&self, stream: I) -> Translation<'_, I::IntoIter>
    where
        I: IntoIterator<Item = Event>,
    {
        Translation {
            translator: self,
            events: stream.into_iter(),
            scope: Scope::new(self.options.extract_text),
            domains: Vec::new(),
            failed: false,
        }
    }

    fn lookup(&self, domains: &[String], message: &str) -> Result<String> {
        self.gettext
            .lookup(domains.last().map(String::as_str), message)
    }

    fn translate_stream(
        &self,
        stream: Vec<Event>,
        search_text: bool,
        domains: &mut Vec<String>,
    ) -> Result<Vec<Event>> {
        let mut scope = Scope::new(search_text && self.options.extract_text);
        stream
            .into_iter()
            .map(|event| self.translate_event(event, &mut scope, domains))
            .collect()
    }

    fn translate_event(
        &self,
        event: Event,
        scope: &mut Scope,
        domains: &mut Vec<String>,
    ) -> Result<Event> {
        if scope.skip > 0 {
            match &event {
                Event::Start { .. } => scope.skip += 1,
                Event::End { .. } => scope.skip -= 1,
                _ => {}
            }
            return Ok(event);
        }

        let event = match event {
            Event::Start { tag, attrs, pos } => {
                if self.options.skips(&tag, &attrs) {
                    debug!("leaving `{}` at line {} untranslated", tag, pos.line);
                    scope.skip = 1;
                    return Ok(Event::Start { tag, attrs, pos });
                }
                let attrs = self.translate_attrs(attrs, domains)?;
                Event::Start { tag, attrs, pos }
            }
            Event::Text { text, pos } if scope.search_text => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Event::Text { text, pos }
                } else {
                    let translated = self.lookup(domains, trimmed)?;
                    Event::Text {
                        text: replace_trimmed(&text, &translated),
                        pos,
                    }
                }
            }
            Event::Sub {
                directives,
                stream,
                pos,
            } => {
                let domain = directives.iter().find_map(|d| match d {
                    Directive::Domain(domain) => Some(domain.clone()),
                    _ => None,
                });
                if let Some(domain) = &domain {
                    debug!("entering domain `{}` at line {}", domain, pos.line);
                    domains.push(domain.clone());
                }

                let search_text =
                    scope.search_text && !directives.iter().any(Directive::is_message);
                let stream = self.translate_stream(stream, search_text, domains);

                if domain.is_some() {
                    domains.pop();
                }
                Event::Sub {
                    directives,
                    stream: stream?,
                    pos,
                }
            }
            other => other,
        };
        Ok(event)
    }

    fn translate_attrs(&self, attrs: Attrs, domains: &mut Vec<String>) -> Result<Attrs> {
        attrs
            .into_iter()
            .map(|(name, value)| {
                let value = match value {
                    AttrValue::Text(text)
                        if self.options.extract_text
                            && self.options.includes_attr(&name)
                            && !text.trim().is_empty() =>
                    {
                        AttrValue::Text(self.lookup(domains, &text)?)
                    }
                    // Only calls are meaningful inside attribute expressions.
                    AttrValue::Stream(events) => {
                        AttrValue::Stream(self.translate_stream(events, false, domains)?)
                    }
                    literal => literal,
                };
                Ok((name, value))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Scope {
    /// Open elements of the current skip scope.
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

/// Iterator returned by [`Translator::translate`].
pub struct Translation<'t, I> {
    translator: &'t Translator,
    events: I,
    scope: Scope,
    domains: Vec<String>,
    failed: bool,
}

impl<I: Iterator<Item = Event>> Iterator for Translation<'_, I> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let event = self.events.next()?;
        let result = self
            .translator
            .translate_event(event, &mut self.scope, &mut self.domains);
        self.failed = result.is_err();
        Some(result)
    }
}
