use std::collections::BTreeMap;

use colored::Colorize;

use timechat_models::{Delta, StreamChunk};

const SSE_DATA_PREFIX: &str = "data: ";
const SSE_DONE_SENTINEL: &str = "[DONE]";

/// A tool call being assembled from fragments. Name and arguments both grow
/// by concatenation as fragments for the same index arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCallBuilder {
    pub name: String,
    pub arguments: String,
}

/// What a processed event line contributed to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Blank line, non-data line, malformed event, or a tool-call-only event.
    Ignored,
    /// The accumulated text grew; the caller should emit a non-final update.
    Content,
    /// The `[DONE]` sentinel; no further lines should be read.
    Done,
}

/// Incremental state of one streaming session.
///
/// Bytes go in via [`push_bytes`](Self::push_bytes); complete lines come out
/// via [`next_line`](Self::next_line) and are fed to
/// [`process_line`](Self::process_line). Splitting on `\n` happens before
/// UTF-8 decoding, so multi-byte sequences broken across network chunks are
/// reassembled intact.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    buffer: Vec<u8>,
    content: String,
    tool_calls: BTreeMap<u32, ToolCallBuilder>,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw network chunk to the line buffer.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Pop the next complete line, without its terminator, if one is buffered.
    pub fn next_line(&mut self) -> Option<String> {
        let newline = self.buffer.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.buffer.drain(..=newline).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }

    /// Parse one line of the SSE stream and fold it into the session state.
    ///
    /// Malformed event payloads are logged and skipped; they never abort the
    /// stream.
    pub fn process_line(&mut self, line: &str) -> LineOutcome {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return LineOutcome::Ignored;
        }
        let Some(data) = trimmed.strip_prefix(SSE_DATA_PREFIX) else {
            return LineOutcome::Ignored;
        };
        if data.trim() == SSE_DONE_SENTINEL {
            return LineOutcome::Done;
        }

        match serde_json::from_str::<StreamChunk>(data) {
            Ok(chunk) => match chunk.delta() {
                Some(delta) => self.merge_delta(delta),
                None => LineOutcome::Ignored,
            },
            Err(e) => {
                eprintln!(
                    "{} Failed to parse streaming chunk: {}",
                    "warning:".yellow(),
                    e
                );
                LineOutcome::Ignored
            }
        }
    }

    fn merge_delta(&mut self, delta: &Delta) -> LineOutcome {
        let mut outcome = LineOutcome::Ignored;

        if let Some(content) = &delta.content {
            if !content.is_empty() {
                self.content.push_str(content);
                outcome = LineOutcome::Content;
            }
        }

        if let Some(tool_calls) = &delta.tool_calls {
            for call in tool_calls {
                let builder = self.tool_calls.entry(call.index).or_default();
                if let Some(function) = &call.function {
                    if let Some(name) = &function.name {
                        builder.name.push_str(name);
                    }
                    if let Some(arguments) = &function.arguments {
                        builder.arguments.push_str(arguments);
                    }
                }
            }
        }

        outcome
    }

    /// Full text produced so far (deltas plus any resolved image fragments).
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Append resolver output to the visible text.
    pub fn append_text(&mut self, fragment: &str) {
        self.content.push_str(fragment);
    }

    /// Take the accumulated tool calls, keyed by index in ascending order.
    pub fn take_tool_calls(&mut self) -> BTreeMap<u32, ToolCallBuilder> {
        std::mem::take(&mut self.tool_calls)
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn feed(accumulator: &mut StreamAccumulator, bytes: &[u8]) -> Vec<LineOutcome> {
        accumulator.push_bytes(bytes);
        let mut outcomes = Vec::new();
        while let Some(line) = accumulator.next_line() {
            outcomes.push(accumulator.process_line(&line));
        }
        outcomes
    }

    #[test]
    fn accumulates_content_across_events() {
        let mut acc = StreamAccumulator::new();
        feed(
            &mut acc,
            b"data: {\"choices\":[{\"delta\":{\"content\":\"Hello\"}}]}\n\n",
        );
        let outcomes = feed(
            &mut acc,
            b"data: {\"choices\":[{\"delta\":{\"content\":\", world\"}}]}\n",
        );
        assert_eq!(outcomes, vec![LineOutcome::Content]);
        assert_eq!(acc.content(), "Hello, world");
    }

    #[test]
    fn multibyte_utf8_split_across_chunks_survives() {
        let mut acc = StreamAccumulator::new();
        // "café" in an event payload, cut in the middle of the 'é' bytes
        let event = "data: {\"choices\":[{\"delta\":{\"content\":\"café\"}}]}\n".as_bytes();
        let cut = event.len() - 7;
        feed(&mut acc, &event[..cut]);
        feed(&mut acc, &event[cut..]);
        assert_eq!(acc.content(), "café");
    }

    #[test]
    fn tool_call_fragments_concatenate_in_arrival_order() {
        let mut acc = StreamAccumulator::new();
        feed(
            &mut acc,
            b"data: {\"choices\":[{\"delta\":{\"tool_calls\":[{\"index\":0,\"function\":{\"name\":\"generate_\"}}]}}]}\n",
        );
        feed(
            &mut acc,
            b"data: {\"choices\":[{\"delta\":{\"tool_calls\":[{\"index\":0,\"function\":{\"name\":\"image\",\"arguments\":\"{\\\"promp\"}}]}}]}\n",
        );
        feed(
            &mut acc,
            b"data: {\"choices\":[{\"delta\":{\"tool_calls\":[{\"index\":0,\"function\":{\"arguments\":\"t\\\":\\\"cat\\\"}\"}}]}}]}\n",
        );

        let calls = acc.take_tool_calls();
        let call = calls.get(&0).unwrap();
        assert_eq!(call.name, "generate_image");
        assert_eq!(call.arguments, "{\"prompt\":\"cat\"}");
        // Reassembled arguments parse as if delivered in one chunk
        assert!(serde_json::from_str::<serde_json::Value>(&call.arguments).is_ok());
    }

    #[test]
    fn out_of_order_indices_iterate_ascending() {
        let mut acc = StreamAccumulator::new();
        feed(
            &mut acc,
            b"data: {\"choices\":[{\"delta\":{\"tool_calls\":[{\"index\":1,\"function\":{\"name\":\"generate_image\",\"arguments\":\"{\\\"prompt\\\":\\\"second\\\"}\"}}]}}]}\n",
        );
        feed(
            &mut acc,
            b"data: {\"choices\":[{\"delta\":{\"tool_calls\":[{\"index\":0,\"function\":{\"name\":\"generate_image\",\"arguments\":\"{\\\"prompt\\\":\\\"first\\\"}\"}}]}}]}\n",
        );

        let prompts: Vec<String> = acc
            .take_tool_calls()
            .into_values()
            .map(|call| call.arguments)
            .collect();
        assert!(prompts[0].contains("first"));
        assert!(prompts[1].contains("second"));
    }

    #[test]
    fn malformed_events_are_skipped() {
        let mut acc = StreamAccumulator::new();
        let outcomes = feed(
            &mut acc,
            b"data: {not valid json\ndata: {\"choices\":[{\"delta\":{\"content\":\"ok\"}}]}\n",
        );
        assert_eq!(outcomes, vec![LineOutcome::Ignored, LineOutcome::Content]);
        assert_eq!(acc.content(), "ok");
    }

    #[test]
    fn non_data_lines_and_blanks_are_ignored() {
        let mut acc = StreamAccumulator::new();
        let outcomes = feed(&mut acc, b"\n: keep-alive\nevent: ping\n");
        assert_eq!(outcomes, vec![LineOutcome::Ignored; 3]);
        assert_eq!(acc.content(), "");
    }

    #[test]
    fn done_sentinel_detected() {
        let mut acc = StreamAccumulator::new();
        let outcomes = feed(&mut acc, b"data: [DONE]\n");
        assert_eq!(outcomes, vec![LineOutcome::Done]);
    }

    #[test]
    fn crlf_line_endings_are_stripped() {
        let mut acc = StreamAccumulator::new();
        let outcomes = feed(&mut acc, b"data: [DONE]\r\n");
        assert_eq!(outcomes, vec![LineOutcome::Done]);
    }
}
