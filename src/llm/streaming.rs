//! Streaming response handling

use std::fmt::Display;
use std::pin::Pin;

use futures::Stream;
use futures::StreamExt;

use crate::errors::HairAdvisorError;
use crate::errors::Result;

/// Streaming response from LLM
pub struct StreamingResponse {
    stream: Pin<Box<dyn Stream<Item = Result<String>> + Send>>,
}

impl StreamingResponse {
    pub fn new(stream: Pin<Box<dyn Stream<Item = Result<String>> + Send>>) -> Self {
        Self { stream }
    }

    /// Collect all chunks into a single string
    pub async fn collect_all(mut self) -> Result<String> {
        let mut result = String::new();
        while let Some(chunk) = self.stream.next().await {
            result.push_str(&chunk?);
        }
        Ok(result)
    }

    /// Get the underlying stream
    pub fn into_stream(self) -> Pin<Box<dyn Stream<Item = Result<String>> + Send>> {
        self.stream
    }
}

struct LineState<S> {
    bytes: Pin<Box<S>>,
    buffer: Vec<u8>,
    finished: bool,
}

/// Split a byte stream into trimmed, non-empty text lines.
///
/// Bytes are buffered until a newline so multi-byte characters split across
/// chunks decode correctly. A trailing line without newline is emitted at
/// end of stream.
pub fn lines<S, B, E>(bytes: S) -> impl Stream<Item = Result<String>> + Send
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send,
    E: Display + Send,
{
    let state = LineState {
        bytes: Box::pin(bytes),
        buffer: Vec::new(),
        finished: false,
    };

    futures::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(pos) = state.buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = state.buffer.drain(..=pos).collect();
                let text = String::from_utf8_lossy(&line).trim().to_string();
                if text.is_empty() {
                    continue;
                }
                return Some((Ok(text), state));
            }

            if state.finished {
                let rest = std::mem::take(&mut state.buffer);
                let text = String::from_utf8_lossy(&rest).trim().to_string();
                return if text.is_empty() {
                    None
                } else {
                    Some((Ok(text), state))
                };
            }

            match state.bytes.next().await {
                Some(Ok(chunk)) => state.buffer.extend_from_slice(chunk.as_ref()),
                Some(Err(e)) => {
                    state.finished = true;
                    state.buffer.clear();
                    return Some((
                        Err(HairAdvisorError::GenerationUnavailable(format!(
                            "stream interrupted: {e}"
                        ))),
                        state,
                    ));
                }
                None => state.finished = true,
            }
        }
    })
}
