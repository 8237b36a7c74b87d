use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::info;

use crate::class::page_key;
use crate::clock::Clock;
use crate::error::ParseError;
use crate::transport::Transport;
use crate::FetchContext;

static CLASS_NAME_REGEX: Lazy<Regex> =
  Lazy::new(|| Regex::new("^(?:[0-9][0-9]?[A-F]|[0-9]{4})$").unwrap());
static CLASS_LIST_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new("var classes = (.*);").unwrap());

/// All groups published on the navigation page, split into classes and everything else.
///
/// Both lists keep the upstream order, the position within `classes` determines the page key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ClassDirectory {
  pub classes: Vec<String>,
  pub other: Vec<String>,
}

impl ClassDirectory {
  pub fn new(names: Vec<String>) -> Self {
    let (classes, other): (Vec<String>, Vec<String>) =
      names.into_iter().partition(|name| is_class_name(name));
    Self { classes, other }
  }

  pub fn position(&self, name: &str) -> Option<usize> {
    self
      .classes
      .iter()
      .position(|class| class == name)
      .map(|index| index + 1)
  }

  pub fn page_key(&self, name: &str) -> Option<String> {
    self.position(name).map(page_key)
  }
}

/// Whether `name` looks like a school class (`5A`, `10F`) or a course year (`2026`).
///
/// The whole name has to match, `5AB` or `12345` are not classes.
pub fn is_class_name(name: &str) -> bool {
  CLASS_NAME_REGEX.is_match(name)
}

/// Fetches the navigation page and reads the class list out of its script.
///
/// Returns `Ok(None)` if the page could not be fetched.
pub async fn fetch_directory<T: Transport, C: Clock>(
  ctx: &FetchContext<T, C>,
) -> anyhow::Result<Option<ClassDirectory>> {
  let url = ctx.config().navbar_url()?;

  let body = match ctx.fetch(&url).await {
    None => return Ok(None),
    Some(body) => body,
  };

  let directory = ClassDirectory::new(parse_class_list(&body)?);
  info!(
    "Found {} classes and {} other groups",
    directory.classes.len(),
    directory.other.len()
  );

  Ok(Some(directory))
}

/// Extracts the names from `var classes = ["5A","5B",...];`.
pub fn parse_class_list(text: &str) -> Result<Vec<String>, ParseError> {
  let literal = match CLASS_LIST_REGEX.captures(text).and_then(|captures| captures.get(1)) {
    None => return Err(ParseError::MissingClassList),
    Some(literal) => literal.as_str(),
  };

  ListParser::new(literal).parse()
}

struct ListParser<'a> {
  text: &'a str,
  offset: usize,
}

impl<'a> ListParser<'a> {
  fn new(text: &'a str) -> Self {
    Self { text, offset: 0 }
  }

  fn parse(mut self) -> Result<Vec<String>, ParseError> {
    let mut names = Vec::new();

    self.skip_whitespace();
    self.expect('[', "`[`")?;

    loop {
      self.skip_whitespace();
      if self.eat(']') {
        break;
      }

      names.push(self.string()?);

      self.skip_whitespace();
      if self.eat(']') {
        break;
      }
      self.expect(',', "`,` or `]`")?;
    }

    self.skip_whitespace();
    if self.offset != self.text.len() {
      return Err(self.error("end of list"));
    }

    Ok(names)
  }

  fn string(&mut self) -> Result<String, ParseError> {
    let quote = match self.peek() {
      Some(quote @ ('"' | '\'')) => quote,
      _ => return Err(self.error("quoted string")),
    };
    self.bump();

    let mut value = String::new();
    loop {
      match self.bump() {
        None => return Err(self.error("closing quote")),
        Some(c) if c == quote => return Ok(value),
        Some('\\') => self.escape(&mut value)?,
        Some(c) => value.push(c),
      }
    }
  }

  fn escape(&mut self, value: &mut String) -> Result<(), ParseError> {
    let c = match self.bump() {
      None => return Err(self.error("escaped character")),
      Some(c) => c,
    };

    match c {
      '\\' | '\'' | '"' => value.push(c),
      'n' => value.push('\n'),
      'r' => value.push('\r'),
      't' => value.push('\t'),
      'a' => value.push('\u{07}'),
      'b' => value.push('\u{08}'),
      'f' => value.push('\u{0c}'),
      'v' => value.push('\u{0b}'),
      'x' => value.push(self.code_point(2)?),
      'u' => value.push(self.code_point(4)?),
      'U' => value.push(self.code_point(8)?),
      // unknown escapes stay as written
      c => {
        value.push('\\');
        value.push(c);
      }
    }

    Ok(())
  }

  fn code_point(&mut self, digits: usize) -> Result<char, ParseError> {
    let start = self.offset;
    let hex = self
      .text
      .get(start..start + digits)
      .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
      .ok_or_else(|| self.error("hexadecimal escape"))?;

    let c = u32::from_str_radix(hex, 16)
      .ok()
      .and_then(char::from_u32)
      .ok_or_else(|| self.error("hexadecimal escape"))?;

    self.offset += digits;
    Ok(c)
  }

  fn peek(&self) -> Option<char> {
    self.text[self.offset..].chars().next()
  }

  fn bump(&mut self) -> Option<char> {
    let c = self.peek()?;
    self.offset += c.len_utf8();
    Some(c)
  }

  fn eat(&mut self, expected: char) -> bool {
    if self.peek() == Some(expected) {
      self.bump();
      return true;
    }
    false
  }

  fn expect(&mut self, expected: char, description: &'static str) -> Result<(), ParseError> {
    if self.eat(expected) {
      Ok(())
    } else {
      Err(self.error(description))
    }
  }

  fn skip_whitespace(&mut self) {
    while self.peek().is_some_and(char::is_whitespace) {
      self.bump();
    }
  }

  fn error(&self, expected: &'static str) -> ParseError {
    ParseError::MalformedClassList {
      offset: self.offset,
      expected,
    }
  }
}
