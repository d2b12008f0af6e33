use crate::{Message, ModelResponse, Part, TextPart, UserMessage};

impl TextPart {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextPart::new(text))
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text_part) => Some(&text_part.text),
        }
    }
}

impl UserMessage {
    pub fn new<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Part>,
    {
        Self {
            content: parts.into_iter().map(Into::into).collect(),
        }
    }
}

impl Message {
    pub fn user<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Part>,
    {
        Self::User(UserMessage::new(parts))
    }
}

impl ModelResponse {
    /// Concatenate every text part of the response. Returns `None` when the
    /// model produced no text at all.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let texts: Vec<&str> = self.content.iter().filter_map(Part::as_text).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_text_concatenates_text_parts() {
        let response = ModelResponse {
            content: vec![Part::text("{\"a\":"), Part::text("1}")],
            ..Default::default()
        };

        assert_eq!(response.text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn response_text_is_none_without_parts() {
        assert_eq!(ModelResponse::default().text(), None);
    }
}
