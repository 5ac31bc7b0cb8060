//! Message-to-amount codec.
//!
//! A message rides in the low-order 12 decimal digits of a transfer amount,
//! three digits per ASCII code point. Messages up to 4 characters fit in one
//! amount; longer messages are split into ≤4-character chunks carrying
//! explicit `sequence`/`total` metadata, one chunk per nonce position.
//!
//! Payload layouts over the 12 digits:
//!
//! ```text
//! single:  [c1][c2][c3][c4]          four 3-digit code points, 0-padded
//! chunk:   [seq][total][c1][c2]      3-digit sequence and total, then the
//!                                    first two code points of the chunk
//! ```
//!
//! The decoder's only chunk signal is that digits [0:6) parse as
//! `0 < sequence <= total`. A single message whose first two code points
//! happen to satisfy that is misread as a chunk; the ambiguity is kept for
//! wire compatibility and pinned by a test below.

use crate::error::CoreError;

/// Characters that fit in one unchunked amount.
pub const MAX_SINGLE_CHARS: usize = 4;

/// Characters per chunk of a long message. Only the first two survive
/// encoding; the 12-digit budget spends six digits on sequence/total.
pub const CHUNK_CHARS: usize = 4;

/// Modulus isolating the 12 payload digits of an amount.
const PAYLOAD_MOD: u128 = 1_000_000_000_000;

/// Smallest-unit quanta per display coin (18 decimals).
const WEI_PER_COIN: u128 = 1_000_000_000_000_000_000;

/// One chunk of a long message, bound to its position in the stealth
/// sequence: chunk `i` (1-based) is sent to nonce `i - 1`.
#[derive(Debug, Clone)]
pub struct MessageChunk {
    pub chunk: String,
    pub sequence: u32,
    pub total: u32,
    pub amount: u128,
}

/// Result of encoding a message for transfer.
#[derive(Debug, Clone)]
pub enum EncodedMessage {
    /// Message of up to [`MAX_SINGLE_CHARS`] characters, one amount.
    Single { amount: u128 },
    /// Longer message, one amount per chunk in sequence order.
    Chunked { chunks: Vec<MessageChunk> },
}

/// Encode a short message as a single 12-digit amount.
///
/// Takes at most the first 4 characters. Code points in `[1, 127]` become
/// zero-padded 3-digit groups; anything outside that range becomes the `000`
/// sentinel and is indistinguishable from padding after decode.
pub fn encode_single(message: &str) -> Result<u128, CoreError> {
    if message.is_empty() {
        return Err(CoreError::EmptyMessage);
    }

    let mut digits = String::with_capacity(12);
    for c in message.chars().take(MAX_SINGLE_CHARS) {
        push_group(&mut digits, c);
    }
    pad_to_payload(&mut digits);

    Ok(parse_payload(&digits))
}

/// Encode one chunk of a long message.
///
/// Digits [0:3) carry `sequence`, [3:6) carry `total`, and the remaining six
/// digits carry the first two characters of the chunk. Characters 3-4 of a
/// chunk do not fit and are dropped. Requires `1 <= sequence <= total <= 999`.
pub fn encode_chunk(chunk: &str, sequence: u32, total: u32) -> Result<u128, CoreError> {
    if sequence == 0 || sequence > total || total > 999 {
        return Err(CoreError::InvalidChunkIndex { sequence, total });
    }

    let mut digits = format!("{sequence:03}{total:03}");
    for c in chunk.chars().take(2) {
        push_group(&mut digits, c);
    }
    pad_to_payload(&mut digits);

    Ok(parse_payload(&digits))
}

/// Split a message into consecutive chunks of at most [`CHUNK_CHARS`]
/// characters, left to right, covering the whole message.
///
/// The returned order fixes the 1-based sequence numbers and the mapping of
/// chunk `i` to nonce `i - 1`.
pub fn split_into_chunks(message: &str) -> Result<Vec<String>, CoreError> {
    if message.is_empty() {
        return Err(CoreError::EmptyMessage);
    }

    let chars: Vec<char> = message.chars().collect();
    Ok(chars.chunks(CHUNK_CHARS).map(|c| c.iter().collect()).collect())
}

/// Encode a message of any length, chunking past [`MAX_SINGLE_CHARS`].
pub fn encode_message(message: &str) -> Result<EncodedMessage, CoreError> {
    if message.chars().count() <= MAX_SINGLE_CHARS {
        return Ok(EncodedMessage::Single {
            amount: encode_single(message)?,
        });
    }

    let parts = split_into_chunks(message)?;
    let total = parts.len() as u32;
    let chunks = parts
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let sequence = i as u32 + 1;
            let amount = encode_chunk(&chunk, sequence, total)?;
            Ok(MessageChunk {
                chunk,
                sequence,
                total,
                amount,
            })
        })
        .collect::<Result<Vec<_>, CoreError>>()?;

    Ok(EncodedMessage::Chunked { chunks })
}

/// Decode the message carried in an amount's low-order 12 digits.
///
/// If digits [0:3) and [3:6) parse as `0 < sequence <= total`, the amount is
/// read as a chunk and rendered `"[sequence/total] <text>"`; otherwise all 12
/// digits are read as up to four code-point groups. Groups decoding to 0 or
/// to 128 and above are skipped.
pub fn decode(amount: u128) -> String {
    let payload = format!("{:012}", amount % PAYLOAD_MOD);

    let sequence: u32 = payload[0..3].parse().expect("three decimal digits");
    let total: u32 = payload[3..6].parse().expect("three decimal digits");

    if sequence > 0 && sequence <= total {
        format!("[{}/{}] {}", sequence, total, decode_groups(&payload[6..12]))
    } else {
        decode_groups(&payload)
    }
}

/// Render a smallest-unit amount in the 18-decimal display denomination.
///
/// Integer division and remainder only; amounts this size lose precision in
/// floating point.
pub fn wei_to_display(amount: u128) -> String {
    format!("{}.{:018}", amount / WEI_PER_COIN, amount % WEI_PER_COIN)
}

fn push_group(digits: &mut String, c: char) {
    let code = c as u32;
    if code > 127 {
        digits.push_str("000");
    } else {
        digits.push_str(&format!("{code:03}"));
    }
}

fn pad_to_payload(digits: &mut String) {
    while digits.len() < 12 {
        digits.push('0');
    }
}

fn parse_payload(digits: &str) -> u128 {
    digits.parse().expect("twelve decimal digits")
}

fn decode_groups(digits: &str) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i + 3 <= digits.len() {
        let code: u32 = digits[i..i + 3].parse().expect("three decimal digits");
        if code > 0 && code < 128 {
            out.push(char::from_u32(code).expect("code below 128"));
        }
        i += 3;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_gang_to_documented_digits() {
        // 'G' 'a' 'n' 'g' -> 71, 97, 110, 103 -> 071097110103
        let amount = encode_single("Gang").unwrap();
        assert_eq!(amount, 71_097_110_103);
    }

    #[test]
    fn single_message_with_plausible_chunk_header_is_misread() {
        // "Gang" starts with codes 71 <= 97, which the decoder cannot tell
        // apart from a sequence/total header. Known limitation of the wire
        // format, kept for compatibility.
        let amount = encode_single("Gang").unwrap();
        assert_eq!(decode(amount), "[71/97] ng");
    }

    #[test]
    fn single_roundtrip_when_header_is_implausible() {
        // First code point above the second: the chunk heuristic cannot fire.
        let amount = encode_single("ba").unwrap();
        assert_eq!(decode(amount), "ba");

        // One character leaves total = 000.
        let amount = encode_single("G").unwrap();
        assert_eq!(amount, 71_000_000_000);
        assert_eq!(decode(amount), "G");
    }

    #[test]
    fn non_ascii_becomes_sentinel() {
        let amount = encode_single("aé").unwrap();
        // 097 then 000 sentinel, padded.
        assert_eq!(amount, 97_000_000_000);
        assert_eq!(decode(amount), "a");
    }

    #[test]
    fn truncates_to_four_characters() {
        assert_eq!(
            encode_single("Gangway").unwrap(),
            encode_single("Gang").unwrap()
        );
    }

    #[test]
    fn empty_message_is_rejected() {
        assert!(matches!(encode_single(""), Err(CoreError::EmptyMessage)));
        assert!(matches!(
            split_into_chunks(""),
            Err(CoreError::EmptyMessage)
        ));
        assert!(matches!(encode_message(""), Err(CoreError::EmptyMessage)));
    }

    #[test]
    fn splits_hello_world_into_three_chunks() {
        let chunks = split_into_chunks("HelloWorld").unwrap();
        assert_eq!(chunks, vec!["Hell", "oWor", "ld"]);
    }

    #[test]
    fn twenty_characters_make_five_full_chunks() {
        let message = "abcdefghijklmnopqrst";
        let encoded = encode_message(message).unwrap();
        match encoded {
            EncodedMessage::Chunked { chunks } => {
                assert_eq!(chunks.len(), 5);
                assert!(chunks.iter().all(|c| c.total == 5));
                assert!(chunks.iter().all(|c| c.chunk.len() == 4));
                assert_eq!(
                    chunks.iter().map(|c| c.sequence).collect::<Vec<_>>(),
                    vec![1, 2, 3, 4, 5]
                );
            }
            EncodedMessage::Single { .. } => panic!("expected chunked encoding"),
        }
    }

    #[test]
    fn chunk_decode_keeps_first_two_characters() {
        // Chunks lose characters 3-4 to the sequence/total header.
        let amount = encode_chunk("Hell", 1, 3).unwrap();
        assert_eq!(amount, 1_003_072_101);
        assert_eq!(decode(amount), "[1/3] He");

        assert_eq!(decode(encode_chunk("oWor", 2, 3).unwrap()), "[2/3] oW");
        assert_eq!(decode(encode_chunk("ld", 3, 3).unwrap()), "[3/3] ld");
    }

    #[test]
    fn chunk_index_bounds_are_enforced() {
        assert!(matches!(
            encode_chunk("ab", 0, 3),
            Err(CoreError::InvalidChunkIndex { .. })
        ));
        assert!(matches!(
            encode_chunk("ab", 4, 3),
            Err(CoreError::InvalidChunkIndex { .. })
        ));
        assert!(matches!(
            encode_chunk("ab", 1, 1000),
            Err(CoreError::InvalidChunkIndex { .. })
        ));
        assert!(encode_chunk("ab", 3, 3).is_ok());
    }

    #[test]
    fn decode_uses_only_low_order_digits() {
        // A balance with digits above the payload window decodes the same.
        let amount = 1_000_000_000_000_000_000u128 + encode_single("ba").unwrap();
        assert_eq!(decode(amount), "ba");
    }

    #[test]
    fn display_denomination_conversion() {
        assert_eq!(wei_to_display(WEI_PER_COIN), "1.000000000000000000");
        assert_eq!(wei_to_display(0), "0.000000000000000000");
        assert_eq!(
            wei_to_display(1_000_000_071_097_110_103),
            "1.000000071097110103"
        );
    }
}
