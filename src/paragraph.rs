use crate::image::Image;
use crate::style::{ParagraphStyle, TextStyle};

/// A run of literal characters with an optional style override
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub text: String,
    pub style: Option<TextStyle>,
}

impl Text {
    pub fn new<S: Into<String>>(text: S) -> Text {
        Text {
            text: text.into(),
            style: None,
        }
    }

    pub fn styled<S: Into<String>>(style: TextStyle, text: S) -> Text {
        Text {
            text: text.into(),
            style: Some(style),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(Text),
    Image(Image),
    /// Ends the current line; the next line is not treated as the paragraph's first line
    LineBreak,
}

impl From<Text> for Element {
    fn from(text: Text) -> Self {
        Element::Text(text)
    }
}

impl From<&str> for Element {
    fn from(text: &str) -> Self {
        Element::Text(Text::new(text))
    }
}

impl From<String> for Element {
    fn from(text: String) -> Self {
        Element::Text(Text::new(text))
    }
}

impl From<Image> for Element {
    fn from(image: Image) -> Self {
        Element::Image(image)
    }
}

/// The unit of style scoping: a sequence of elements wrapped as one stream of text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub style: ParagraphStyle,
    pub elements: Vec<Element>,
}

impl Paragraph {
    pub fn new(style: ParagraphStyle) -> Paragraph {
        Paragraph {
            style,
            elements: Vec::default(),
        }
    }

    /// A paragraph in the default style holding a single run of text
    pub fn text<S: Into<String>>(text: S) -> Paragraph {
        Paragraph::default().with(Text::new(text))
    }

    pub fn styled_text<S: Into<String>>(style: ParagraphStyle, text: S) -> Paragraph {
        Paragraph::new(style).with(Text::new(text))
    }

    /// Append an element, returning the paragraph for chaining
    pub fn with<E: Into<Element>>(mut self, element: E) -> Paragraph {
        self.elements.push(element.into());
        self
    }

    pub fn line_break(self) -> Paragraph {
        self.with(Element::LineBreak)
    }

    pub fn add_element<E: Into<Element>>(&mut self, element: E) -> &mut Self {
        self.elements.push(element.into());
        self
    }
}
