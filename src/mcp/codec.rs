//! Newline-delimited JSON-RPC codec.
//!
//! Each frame is one JSON object terminated by `\n`. Lines that are not valid
//! requests are surfaced as [`Incoming::Malformed`] so the server can answer
//! with a parse error and keep reading.

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use super::messages::{JsonRpcRequest, JsonRpcResponse};

/// Default max frame length (16 MB)
pub const DEFAULT_MAX_LENGTH: usize = 16 * 1024 * 1024;

/// A decoded inbound frame
#[derive(Debug, Clone)]
pub enum Incoming {
    Request(JsonRpcRequest),
    /// The line could not be parsed; carries the reason
    Malformed(String),
}

/// Codec for the stdio transport.
///
/// A line longer than the limit is dropped as it streams in and reported once
/// its terminating newline arrives; reading then continues with the next line.
#[derive(Debug, Clone)]
pub struct McpCodec {
    max_length: usize,
    /// Where to resume the newline search in the buffer
    next_index: usize,
    /// Bytes dropped so far from the current oversized line, if any
    discarded: Option<usize>,
}

impl McpCodec {
    /// Create a new codec with default max length (16 MB).
    pub fn new() -> Self {
        Self::with_max_length(DEFAULT_MAX_LENGTH)
    }

    /// Create a new codec with custom max length.
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            next_index: 0,
            discarded: None,
        }
    }

    fn too_large(&self, length: usize) -> Incoming {
        Incoming::Malformed(format!("Message too large: {} > {}", length, self.max_length))
    }

    fn parse_line(&self, line: &[u8]) -> Incoming {
        if line.len() > self.max_length {
            return self.too_large(line.len());
        }
        match serde_json::from_slice(line) {
            Ok(request) => Incoming::Request(request),
            Err(e) => Incoming::Malformed(format!("Parse error: {}", e)),
        }
    }
}

impl Decoder for McpCodec {
    type Item = Incoming;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            let start = self.next_index.min(src.len());
            let Some(offset) = src[start..].iter().position(|&b| b == b'\n') else {
                if let Some(dropped) = self.discarded.as_mut() {
                    *dropped += src.len();
                    src.clear();
                    self.next_index = 0;
                } else if src.len() > self.max_length {
                    // An unterminated frame past the limit can never become valid
                    self.discarded = Some(src.len());
                    src.clear();
                    self.next_index = 0;
                } else {
                    self.next_index = src.len();
                }
                return Ok(None);
            };

            let pos = start + offset;
            self.next_index = 0;
            let line = src.split_to(pos);
            src.advance(1);

            if let Some(dropped) = self.discarded.take() {
                return Ok(Some(self.too_large(dropped + line.len())));
            }

            let line = line.trim_ascii();
            if line.is_empty() {
                continue;
            }
            return Ok(Some(self.parse_line(line)));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }

        // Final line without a trailing newline
        let rest = src.split();
        self.next_index = 0;
        if let Some(dropped) = self.discarded.take() {
            return Ok(Some(self.too_large(dropped + rest.len())));
        }

        let line = rest.trim_ascii();
        if line.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.parse_line(line)))
        }
    }
}

impl Encoder<JsonRpcResponse> for McpCodec {
    type Error = std::io::Error;

    fn encode(&mut self, item: JsonRpcResponse, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let json = serde_json::to_vec(&item).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, format!("JSON error: {}", e))
        })?;

        dst.reserve(json.len() + 1);
        dst.put_slice(&json);
        dst.put_u8(b'\n');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn decode_all(codec: &mut McpCodec, input: &str) -> Vec<Incoming> {
        let mut buf = BytesMut::from(input);
        let mut frames = Vec::new();
        while let Some(frame) = codec.decode(&mut buf).unwrap() {
            frames.push(frame);
        }
        frames
    }

    #[test]
    fn test_decode_single_request() {
        let mut codec = McpCodec::new();
        let frames = decode_all(&mut codec, "{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n");
        assert_eq!(frames.len(), 1);
        match &frames[0] {
            Incoming::Request(req) => assert_eq!(req.method, "ping"),
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn test_decode_multiple_and_blank_lines() {
        let mut codec = McpCodec::new();
        let input = "{\"id\":1,\"method\":\"a\"}\r\n\n   \n{\"id\":2,\"method\":\"b\"}\n";
        let frames = decode_all(&mut codec, input);
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn test_decode_partial() {
        let mut codec = McpCodec::new();
        let mut buf = BytesMut::from("{\"id\":1,\"meth");
        assert!(codec.decode(&mut buf).unwrap().is_none());
        buf.extend_from_slice(b"od\":\"ping\"}\n");
        assert!(matches!(codec.decode(&mut buf).unwrap(), Some(Incoming::Request(_))));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_malformed_keeps_going() {
        let mut codec = McpCodec::new();
        let frames = decode_all(&mut codec, "not json\n{\"id\":1,\"method\":\"ping\"}\n");
        assert_eq!(frames.len(), 2);
        assert!(matches!(frames[0], Incoming::Malformed(_)));
        assert!(matches!(frames[1], Incoming::Request(_)));
    }

    #[test]
    fn test_decode_missing_method_is_malformed() {
        let mut codec = McpCodec::new();
        let frames = decode_all(&mut codec, "{\"id\":1}\n");
        assert!(matches!(frames[0], Incoming::Malformed(_)));
    }

    #[test]
    fn test_decode_oversized_line() {
        let mut codec = McpCodec::with_max_length(8);
        let frames = decode_all(&mut codec, "{\"id\":1,\"method\":\"ping\"}\n");
        match &frames[0] {
            Incoming::Malformed(msg) => assert!(msg.contains("Message too large")),
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn test_decode_oversized_across_reads() {
        let mut codec = McpCodec::with_max_length(8);
        let mut buf = BytesMut::from("0123456789abcdef");
        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert!(buf.is_empty());

        buf.extend_from_slice(b"ghijklmnop");
        assert!(codec.decode(&mut buf).unwrap().is_none());

        buf.extend_from_slice(b"qr\n{\"id\":1,\"method\":\"ping\"}\n");
        match codec.decode(&mut buf).unwrap() {
            Some(Incoming::Malformed(msg)) => assert_eq!(msg, "Message too large: 28 > 8"),
            other => panic!("unexpected frame: {:?}", other),
        }
        assert_eq!(&buf[..], b"{\"id\":1,\"method\":\"ping\"}\n");
    }

    #[test]
    fn test_decode_recovers_after_oversized_line() {
        let mut codec = McpCodec::with_max_length(32);
        let mut buf = BytesMut::from(&b"x"[..]);
        for _ in 0..10 {
            buf.extend_from_slice(&[b'x'; 16]);
            assert!(codec.decode(&mut buf).unwrap().is_none());
        }
        buf.extend_from_slice(b"\n{\"id\":9,\"method\":\"ping\"}\n");

        assert!(matches!(codec.decode(&mut buf).unwrap(), Some(Incoming::Malformed(_))));
        match codec.decode(&mut buf).unwrap() {
            Some(Incoming::Request(req)) => assert_eq!(req.method, "ping"),
            other => panic!("unexpected frame: {:?}", other),
        }
        assert!(codec.decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_decode_eof_while_discarding() {
        let mut codec = McpCodec::with_max_length(4);
        let mut buf = BytesMut::from("0123456789");
        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert!(matches!(codec.decode_eof(&mut buf).unwrap(), Some(Incoming::Malformed(_))));
        assert!(codec.decode_eof(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_decode_eof_without_newline() {
        let mut codec = McpCodec::new();
        let mut buf = BytesMut::from("{\"id\":3,\"method\":\"ping\"}");
        assert!(codec.decode(&mut buf).unwrap().is_none());
        assert!(matches!(codec.decode_eof(&mut buf).unwrap(), Some(Incoming::Request(_))));
        assert!(codec.decode_eof(&mut buf).unwrap().is_none());
    }

    #[test]
    fn test_encode_appends_newline() {
        let mut codec = McpCodec::new();
        let mut buf = BytesMut::new();
        codec
            .encode(JsonRpcResponse::success(json!(1), json!({})), &mut buf)
            .unwrap();

        assert_eq!(buf.last(), Some(&b'\n'));
        let value: Value = serde_json::from_slice(&buf[..buf.len() - 1]).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["jsonrpc"], "2.0");
    }
}
