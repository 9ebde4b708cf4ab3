//! Reading answers and their sources out of thread messages.

#![allow(deprecated)]

use async_openai::types::assistants::{
    MessageContent, MessageContentTextAnnotations, MessageDeltaContent, MessageDeltaObject,
    MessageObject
};

/// A source quoted by an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub text: String,
    pub file_id: Option<String>
}

/// What the latest message says about its sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Citations {
    Found(Vec<Citation>),
    /// The message has text but no annotations.
    NoneFound,
    /// The message has no leading text block to annotate.
    Unavailable
}

impl Citations {
    /// Citations attached to the leading text block of `message`.
    ///
    /// Only file citations name a file; file-path annotations are listed
    /// without one.
    pub fn of(message: &MessageObject) -> Self {
        let Some(MessageContent::Text(block)) = message.content.first() else {
            return Citations::Unavailable;
        };
        if block.text.annotations.is_empty() {
            return Citations::NoneFound;
        }
        Citations::Found(
            block
                .text
                .annotations
                .iter()
                .map(|annotation| match annotation {
                    MessageContentTextAnnotations::FileCitation(cited) => Citation {
                        text: cited.text.clone(),
                        file_id: Some(cited.file_citation.file_id.clone())
                    },
                    MessageContentTextAnnotations::FilePath(linked) => Citation {
                        text: linked.text.clone(),
                        file_id: None
                    }
                })
                .collect()
        )
    }
}

/// All text blocks of a message, joined by newlines.
pub fn full_text(message: &MessageObject) -> String {
    message
        .content
        .iter()
        .filter_map(|content| match content {
            MessageContent::Text(block) => Some(block.text.value.as_str()),
            _ => None
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text fragments carried by one streamed message delta, in order.
pub fn delta_text(delta: &MessageDeltaObject) -> impl Iterator<Item = &str> {
    delta
        .delta
        .content
        .iter()
        .flatten()
        .filter_map(|content| match content {
            MessageDeltaContent::Text(block) => block.text.as_ref()?.value.as_deref(),
            _ => None
        })
}
