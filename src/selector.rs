use super::*;

/// Attribute test inside `[...]`. Empty operands of the substring operators
/// never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrOp {
    Present,
    Equals(String),
    Prefix(String),
    Suffix(String),
    Substring(String),
}

impl AttrOp {
    fn test(&self, actual: Option<&str>) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        match self {
            Self::Present => true,
            Self::Equals(expected) => actual == expected,
            Self::Prefix(part) => !part.is_empty() && actual.starts_with(part.as_str()),
            Self::Suffix(part) => !part.is_empty() && actual.ends_with(part.as_str()),
            Self::Substring(part) => !part.is_empty() && actual.contains(part.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Pseudo {
    FirstChild,
    LastChild,
    Checked,
    Disabled,
    Not(Vec<Chain>),
}

/// One compound selector such as `a.nav-link[href^="#"]:not(.active)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, AttrOp)>,
    pseudos: Vec<Pseudo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Combinator {
    Descendant,
    Child,
}

/// Compounds joined by combinators. `links[i].0` relates compound `i` to
/// compound `i - 1`; the first combinator is unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Chain {
    links: Vec<(Combinator, Compound)>,
}

impl Chain {
    /// The id of a bare `#id` selector, which can go through the id index.
    pub(crate) fn id_only(&self) -> Option<&str> {
        match self.links.as_slice() {
            [(_, compound)]
                if compound.tag.is_none()
                    && compound.classes.is_empty()
                    && compound.attrs.is_empty()
                    && compound.pseudos.is_empty() =>
            {
                compound.id.as_deref()
            }
            _ => None,
        }
    }
}

/// Parses a comma-separated selector list.
pub(crate) fn parse_selector_groups(selector: &str) -> Result<Vec<Chain>> {
    let mut parser = SelectorParser {
        source: selector,
        chars: selector.chars().collect(),
        pos: 0,
    };
    let chains = parser.selector_list()?;
    parser.skip_spaces();
    if parser.peek().is_some() {
        return Err(parser.unsupported());
    }
    Ok(chains)
}

struct SelectorParser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl SelectorParser<'_> {
    fn unsupported(&self) -> Error {
        Error::UnsupportedSelector(self.source.to_string())
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, ch: char) -> Result<()> {
        if self.eat(ch) { Ok(()) } else { Err(self.unsupported()) }
    }

    /// Skips whitespace and reports whether any was skipped.
    fn skip_spaces(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(|ch| ch.is_ascii_whitespace()) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn ident(&mut self, extra: &[char]) -> Result<String> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' || extra.contains(&ch))
        {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.unsupported());
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn selector_list(&mut self) -> Result<Vec<Chain>> {
        let mut chains = vec![self.chain()?];
        while self.eat(',') {
            chains.push(self.chain()?);
        }
        Ok(chains)
    }

    fn chain(&mut self) -> Result<Chain> {
        self.skip_spaces();
        let mut links = vec![(Combinator::Descendant, self.compound()?)];
        loop {
            let spaced = self.skip_spaces();
            let combinator = if self.eat('>') {
                self.skip_spaces();
                Combinator::Child
            } else if spaced && !matches!(self.peek(), None | Some(',' | ')')) {
                Combinator::Descendant
            } else {
                break;
            };
            links.push((combinator, self.compound()?));
        }
        Ok(Chain { links })
    }

    fn compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::default();
        let mut universal = false;

        if self.eat('*') {
            universal = true;
        } else if self.peek().is_some_and(|ch| ch.is_ascii_alphabetic()) {
            compound.tag = Some(self.ident(&[])?.to_ascii_lowercase());
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    let id = self.ident(&[])?;
                    if compound.id.replace(id).is_some() {
                        return Err(self.unsupported());
                    }
                }
                Some('.') => {
                    self.pos += 1;
                    let class_name = self.ident(&[])?;
                    compound.classes.push(class_name);
                }
                Some('[') => {
                    self.pos += 1;
                    let attr = self.attribute()?;
                    compound.attrs.push(attr);
                }
                Some(':') => {
                    self.pos += 1;
                    let pseudo = self.pseudo()?;
                    compound.pseudos.push(pseudo);
                }
                _ => break,
            }
        }

        if !universal && compound == Compound::default() {
            return Err(self.unsupported());
        }
        Ok(compound)
    }

    fn attribute(&mut self) -> Result<(String, AttrOp)> {
        self.skip_spaces();
        let key = self.ident(&[':'])?.to_ascii_lowercase();
        self.skip_spaces();
        if self.eat(']') {
            return Ok((key, AttrOp::Present));
        }

        let op: fn(String) -> AttrOp = match self.peek() {
            Some('=') => AttrOp::Equals,
            Some('^') => AttrOp::Prefix,
            Some('$') => AttrOp::Suffix,
            Some('*') => AttrOp::Substring,
            _ => return Err(self.unsupported()),
        };
        if !self.eat('=') {
            self.pos += 1;
            self.expect('=')?;
        }
        self.skip_spaces();

        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.peek().is_some_and(|ch| ch != quote) {
                    self.pos += 1;
                }
                let value = self.chars[start..self.pos].iter().collect();
                self.expect(quote)?;
                value
            }
            Some(_) => {
                let start = self.pos;
                while self.peek().is_some_and(|ch| ch != ']' && !ch.is_ascii_whitespace()) {
                    self.pos += 1;
                }
                self.chars[start..self.pos].iter().collect()
            }
            None => return Err(self.unsupported()),
        };

        self.skip_spaces();
        self.expect(']')?;
        Ok((key, op(value)))
    }

    fn pseudo(&mut self) -> Result<Pseudo> {
        let pseudo = match self.ident(&[])?.as_str() {
            "first-child" => Pseudo::FirstChild,
            "last-child" => Pseudo::LastChild,
            "checked" => Pseudo::Checked,
            "disabled" => Pseudo::Disabled,
            "not" => {
                self.expect('(')?;
                let inner = self.selector_list()?;
                self.skip_spaces();
                self.expect(')')?;
                Pseudo::Not(inner)
            }
            _ => return Err(self.unsupported()),
        };
        Ok(pseudo)
    }
}

impl Dom {
    /// Matches right to left: the last compound against `node_id`, then each
    /// earlier compound against a parent or some ancestor.
    pub(crate) fn matches_selector_chain(&self, node_id: NodeId, chain: &Chain) -> bool {
        self.matches_links(node_id, &chain.links)
    }

    fn matches_links(&self, node_id: NodeId, links: &[(Combinator, Compound)]) -> bool {
        let Some(((combinator, compound), earlier)) = links.split_last() else {
            return true;
        };
        if !self.matches_compound(node_id, compound) {
            return false;
        }
        if earlier.is_empty() {
            return true;
        }
        match combinator {
            Combinator::Child => self
                .parent(node_id)
                .is_some_and(|parent| self.matches_links(parent, earlier)),
            Combinator::Descendant => {
                let mut ancestor = self.parent(node_id);
                while let Some(candidate) = ancestor {
                    if self.matches_links(candidate, earlier) {
                        return true;
                    }
                    ancestor = self.parent(candidate);
                }
                false
            }
        }
    }

    fn matches_compound(&self, node_id: NodeId, compound: &Compound) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };

        let tag_ok = compound
            .tag
            .as_ref()
            .is_none_or(|tag| element.tag_name.eq_ignore_ascii_case(tag));
        let id_ok = compound
            .id
            .as_ref()
            .is_none_or(|id| element.attrs.get("id") == Some(id));
        if !tag_ok || !id_ok {
            return false;
        }
        if !compound.classes.iter().all(|class_name| has_class(element, class_name)) {
            return false;
        }
        if !compound
            .attrs
            .iter()
            .all(|(key, op)| op.test(element.attrs.get(key).map(String::as_str)))
        {
            return false;
        }

        compound.pseudos.iter().all(|pseudo| match pseudo {
            Pseudo::FirstChild => self.is_first_element_child(node_id),
            Pseudo::LastChild => self.is_last_element_child(node_id),
            Pseudo::Checked => element.checked,
            Pseudo::Disabled => element.disabled,
            Pseudo::Not(chains) => !chains
                .iter()
                .any(|chain| self.matches_selector_chain(node_id, chain)),
        })
    }
}
