use std::{borrow::Cow, fmt, ops::Deref};

type SmallText = arrayvec::ArrayString<22>;

/// Storage for a piece of output text.
///
/// The text must not contain line breaks; newlines only ever come from
/// `Breakable` nodes rendered in break mode.
#[derive(Clone)]
pub enum Text<'a> {
    Owned(Box<str>),
    Borrowed(&'a str),
    Small(SmallText),
}

impl Text<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            Text::Owned(s) => s,
            Text::Borrowed(s) => s,
            Text::Small(s) => s,
        }
    }

    /// Formats `value` into storage, staying on the stack for short output.
    pub fn display<U: fmt::Display>(value: U) -> Self {
        use std::fmt::Write;
        let mut buf = FmtText::Small(SmallText::new());
        write!(buf, "{value}").expect("writing to a text buffer cannot fail");
        match buf {
            FmtText::Small(b) => Text::Small(b),
            FmtText::Large(b) => Text::Owned(b.into()),
        }
    }
}

impl fmt::Debug for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

impl Deref for Text<'_> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl<'a> From<Cow<'a, str>> for Text<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        match value {
            Cow::Owned(s) => Text::Owned(s.into()),
            Cow::Borrowed(s) => Text::Borrowed(s),
        }
    }
}

enum FmtText {
    Small(SmallText),
    Large(String),
}

impl fmt::Write for FmtText {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self {
            FmtText::Small(buf) => {
                if buf.try_push_str(s).is_err() {
                    let mut new_str = String::with_capacity(buf.len() + s.len());
                    new_str.push_str(buf);
                    new_str.push_str(s);
                    *self = FmtText::Large(new_str);
                }
            }
            FmtText::Large(buf) => buf.push_str(s),
        }
        Ok(())
    }
}

/// A text object paired with the column width it occupies.
///
/// Widths are caller-supplied integers; the conversions from plain strings
/// default to the byte length. Use [`Fragment::with_width`] when the two
/// differ (multi-byte text, proportional widths, zero-width markers).
#[derive(Clone, Debug)]
pub struct Fragment<'a> {
    text: Text<'a>,
    width: usize,
}

impl<'a> Fragment<'a> {
    pub fn new(text: impl Into<Cow<'a, str>>) -> Self {
        let text: Text<'a> = text.into().into();
        let width = text.len();
        Fragment { text, width }
    }

    pub fn with_width(text: impl Into<Cow<'a, str>>, width: usize) -> Self {
        Fragment {
            text: text.into().into(),
            width,
        }
    }

    /// The text `value.to_string()`, at its byte length.
    pub fn display<U: fmt::Display>(value: U) -> Self {
        let text = Text::display(value);
        let width = text.len();
        Fragment { text, width }
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl<'a> From<&'a str> for Fragment<'a> {
    fn from(s: &'a str) -> Self {
        Fragment::new(s)
    }
}

impl From<String> for Fragment<'_> {
    fn from(s: String) -> Self {
        Fragment::new(s)
    }
}

impl<'a> From<Cow<'a, str>> for Fragment<'a> {
    fn from(s: Cow<'a, str>) -> Self {
        Fragment::new(s)
    }
}
