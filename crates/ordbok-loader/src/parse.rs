//! Parser for the trie-XML dictionary wire format. Branch elements carry a
//! `v` attribute with the accumulated prefix; `<w v="...">` elements are
//! terminal words holding `<l>` (headword) and `<r>` (translation) sides,
//! whose `<s n="..."/>` children carry the grammatical annotations.
//!
//! Construction is all-or-nothing: a malformed document yields an error and
//! no partial tree.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use ordbok_core::error::DictError;
use ordbok_core::normalize::fold;
use ordbok_core::trie::{Branch, Entry, Headword, Lexicon, Node, Segment, Side, Translation};

pub fn parse(xml: &str) -> Result<Lexicon, DictError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Branch> = vec![Branch::root()];
    let mut word: Option<WordBuilder> = None;
    // Depth counter while dropping a subtree under an attribute-less branch
    let mut skip_depth = 0usize;
    let mut seen_root = false;
    let mut root_closed = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| DictError::Malformed(e.to_string()))?;
        match event {
            Event::Start(e) => {
                if skip_depth > 0 {
                    skip_depth += 1;
                    continue;
                }
                if let Some(builder) = word.as_mut() {
                    builder.open(&e)?;
                    continue;
                }
                if !seen_root {
                    // Outermost element is the traversal root itself
                    seen_root = true;
                    continue;
                }
                if e.name().as_ref() == b"w" {
                    let key = require_attr(&e, "v")?;
                    word = Some(WordBuilder::new(fold(&key)));
                } else {
                    match attr(&e, "v")? {
                        Some(value) if !value.is_empty() => stack.push(Branch {
                            key: fold(&value),
                            children: Vec::new(),
                        }),
                        // Only the root may be unlabeled; anything else
                        // without a usable label is dropped wholesale
                        _ => skip_depth = 1,
                    }
                }
            }
            Event::Empty(e) => {
                if skip_depth > 0 {
                    continue;
                }
                if let Some(builder) = word.as_mut() {
                    builder.open(&e)?;
                    builder.close(e.name().as_ref());
                    continue;
                }
                if e.name().as_ref() == b"w" {
                    let key = require_attr(&e, "v")?;
                    attach(&mut stack, Node::Word(Entry {
                        key: fold(&key),
                        sides: Vec::new(),
                    }));
                }
                // An empty branch has nothing underneath: pruned by not
                // being built at all
            }
            Event::Text(e) => {
                if skip_depth > 0 {
                    continue;
                }
                if let Some(builder) = word.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| DictError::Malformed(err.to_string()))?;
                    builder.text(&text);
                }
            }
            Event::End(e) => {
                if skip_depth > 0 {
                    skip_depth -= 1;
                    continue;
                }
                if word.is_some() {
                    if e.name().as_ref() == b"w" {
                        if let Some(builder) = word.take() {
                            attach(&mut stack, Node::Word(builder.finish()));
                        }
                    } else if let Some(builder) = word.as_mut() {
                        builder.close(e.name().as_ref());
                    }
                    continue;
                }
                if stack.len() > 1 {
                    let finished = stack.pop().expect("stack underflow");
                    if !finished.is_dead() {
                        attach(&mut stack, Node::Branch(finished));
                    }
                } else {
                    // The root container itself is closing
                    root_closed = true;
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions
            _ => {}
        }
    }

    if !seen_root {
        return Err(DictError::Malformed("empty document".to_string()));
    }
    if stack.len() != 1 || word.is_some() || !root_closed {
        return Err(DictError::Malformed("unterminated nesting".to_string()));
    }
    let root = stack.pop().expect("root branch");
    Ok(Lexicon::new(root))
}

/// Accumulates one `<w>` element: its key and the interleaved l/r sides.
struct WordBuilder {
    key: String,
    sides: Vec<Side>,
    current: Option<SideBuilder>,
}

enum SideBuilder {
    Headword(Headword),
    Translation(Translation),
}

impl WordBuilder {
    fn new(key: String) -> Self {
        Self {
            key,
            sides: Vec::new(),
            current: None,
        }
    }

    fn open(&mut self, e: &BytesStart<'_>) -> Result<(), DictError> {
        match e.name().as_ref() {
            b"l" => {
                self.current = Some(SideBuilder::Headword(Headword {
                    text: String::new(),
                    tags: Vec::new(),
                }));
            }
            b"r" => {
                self.current = Some(SideBuilder::Translation(Translation {
                    text: String::new(),
                    segments: Vec::new(),
                }));
            }
            b"s" => {
                let annotation = require_attr(e, "n")?;
                match self.current.as_mut() {
                    Some(SideBuilder::Headword(headword)) => headword.tags.push(annotation),
                    Some(SideBuilder::Translation(translation)) => {
                        translation.segments.push(Segment::parse(&annotation));
                    }
                    // Stray annotation outside a side: nothing to hang it on
                    None => {}
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        match self.current.as_mut() {
            Some(SideBuilder::Headword(headword)) => headword.text.push_str(text),
            Some(SideBuilder::Translation(translation)) => translation.text.push_str(text),
            None => {}
        }
    }

    fn close(&mut self, name: &[u8]) {
        match name {
            b"l" | b"r" => {
                if let Some(side) = self.current.take() {
                    self.sides.push(match side {
                        SideBuilder::Headword(headword) => Side::Headword(headword),
                        SideBuilder::Translation(translation) => Side::Translation(translation),
                    });
                }
            }
            _ => {}
        }
    }

    fn finish(self) -> Entry {
        Entry {
            key: self.key,
            sides: self.sides,
        }
    }
}

fn attach(stack: &mut [Branch], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn attr(e: &BytesStart<'_>, name: &str) -> Result<Option<String>, DictError> {
    match e.try_get_attribute(name) {
        Ok(Some(a)) => a
            .unescape_value()
            .map(|v| Some(v.into_owned()))
            .map_err(|err| DictError::Malformed(err.to_string())),
        Ok(None) => Ok(None),
        Err(err) => Err(DictError::Malformed(err.to_string())),
    }
}

fn require_attr(e: &BytesStart<'_>, name: &str) -> Result<String, DictError> {
    attr(e, name)?.ok_or_else(|| {
        DictError::Malformed(format!(
            "<{}> missing required attribute {name}",
            String::from_utf8_lossy(e.name().as_ref())
        ))
    })
}
