//! Length-prefixed, zlib-compressed JSON framing for [`Message`]/[`Response`].
//!
//! Frame shape: a 4-byte big-endian length prefix followed by that many
//! bytes of `zlib(json_encode(value))`. Mirrors the teacher's length-prefix
//! convention, with a zlib layer added per the wire protocol's compression
//! requirement.

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::{ProtocolError, ProtocolResult};

/// Maximum compressed frame size (16 MB), matching the teacher's codec.
const MAX_FRAME_SIZE: usize = 16 * 1024 * 1024;

/// Reads a single length-prefixed, zlib-compressed JSON value from `io`.
pub async fn read_message<T, V>(io: &mut T) -> ProtocolResult<V>
where
    T: AsyncRead + Unpin,
    V: DeserializeOwned,
{
    let mut len_bytes = [0u8; 4];
    io.read_exact(&mut len_bytes).await?;
    let len = u32::from_be_bytes(len_bytes) as usize;

    if len > MAX_FRAME_SIZE {
        return Err(ProtocolError::MessageTooLarge(len));
    }

    let mut compressed = vec![0u8; len];
    io.read_exact(&mut compressed).await?;

    let mut decoder = ZlibDecoder::new(&compressed[..]);
    let mut json = Vec::new();
    decoder
        .read_to_end(&mut json)
        .map_err(|e| ProtocolError::Compression(e.to_string()))?;

    Ok(serde_json::from_slice(&json)?)
}

/// Writes `value` as a length-prefixed, zlib-compressed JSON frame onto `io`.
pub async fn write_message<T, V>(io: &mut T, value: &V) -> ProtocolResult<()>
where
    T: AsyncWrite + Unpin,
    V: Serialize,
{
    let json = serde_json::to_vec(value)?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&json)
        .map_err(|e| ProtocolError::Compression(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| ProtocolError::Compression(e.to_string()))?;

    if compressed.len() > MAX_FRAME_SIZE {
        return Err(ProtocolError::MessageTooLarge(compressed.len()));
    }

    let len_bytes = (compressed.len() as u32).to_be_bytes();
    io.write_all(&len_bytes).await?;
    io.write_all(&compressed).await?;
    io.flush().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::Message;
    use shoplist_types::ListId;

    #[tokio::test]
    async fn message_roundtrips_through_the_wire() {
        let msg = Message::Create {
            list_id: ListId::from_string("groceries"),
        };

        let mut buf = Vec::new();
        write_message(&mut buf, &msg).await.unwrap();

        let mut cursor = std::io::Cursor::new(buf);
        let decoded: Message = read_message(&mut cursor).await.unwrap();

        match decoded {
            Message::Create { list_id } => assert_eq!(list_id.as_str(), "groceries"),
            _ => panic!("expected Create"),
        }
    }

    #[tokio::test]
    async fn oversized_frame_is_rejected_before_allocating() {
        let mut fake_len = Vec::new();
        fake_len.extend_from_slice(&(MAX_FRAME_SIZE as u32 + 1).to_be_bytes());

        let mut cursor = std::io::Cursor::new(fake_len);
        let result: ProtocolResult<Message> = read_message(&mut cursor).await;
        assert!(matches!(result, Err(ProtocolError::MessageTooLarge(_))));
    }
}
