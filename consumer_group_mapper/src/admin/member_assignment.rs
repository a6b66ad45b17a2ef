use bytes::Buf;
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedPartition {
    pub topic: String,
    pub partition: i32,
}

/// Partitions handed to one group member by the consumer protocol.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemberAssignment {
    pub version: i16,
    pub partitions: Vec<AssignedPartition>,
}

impl MemberAssignment {
    pub fn topics(&self) -> BTreeSet<&str> {
        self.partitions.iter().map(|x| x.topic.as_str()).collect()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignmentDecodeError {
    #[error("Truncated assignment at {field}: {needed} bytes needed, {remaining} left")]
    Truncated {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },
    #[error("Topic name is not valid UTF-8")]
    InvalidTopicName(#[from] std::str::Utf8Error),
    #[error("Topic name has negative length {0}")]
    NegativeLength(i16),
}

/// Decodes consumer protocol assignment bytes:
///
/// ```text
/// version: i16
/// topics: i32 count, each { name: i16 length + utf8, partitions: i32 count + i32 each }
/// user_data: i32 length + bytes (ignored)
/// ```
///
/// An empty buffer is a member that was not assigned anything yet.
pub fn decode_member_assignment(bytes: &[u8]) -> Result<MemberAssignment, AssignmentDecodeError> {
    if bytes.is_empty() {
        return Ok(MemberAssignment::default());
    }

    let mut buf = bytes;
    let version = read_i16(&mut buf, "version")?;
    let topics_count = read_i32(&mut buf, "topics count")?;

    let mut partitions = Vec::new();
    for _ in 0..topics_count.max(0) {
        let topic = read_string(&mut buf)?;
        let partitions_count = read_i32(&mut buf, "partitions count")?;
        for _ in 0..partitions_count.max(0) {
            let partition = read_i32(&mut buf, "partition")?;
            partitions.push(AssignedPartition {
                topic: topic.clone(),
                partition,
            });
        }
    }

    Ok(MemberAssignment {
        version,
        partitions,
    })
}

fn ensure_remaining(
    buf: &[u8],
    needed: usize,
    field: &'static str,
) -> Result<(), AssignmentDecodeError> {
    if buf.remaining() < needed {
        return Err(AssignmentDecodeError::Truncated {
            field,
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

fn read_i16(buf: &mut &[u8], field: &'static str) -> Result<i16, AssignmentDecodeError> {
    ensure_remaining(buf, 2, field)?;
    Ok(buf.get_i16())
}

fn read_i32(buf: &mut &[u8], field: &'static str) -> Result<i32, AssignmentDecodeError> {
    ensure_remaining(buf, 4, field)?;
    Ok(buf.get_i32())
}

fn read_string(buf: &mut &[u8]) -> Result<String, AssignmentDecodeError> {
    let length = read_i16(buf, "topic name length")?;
    if length < 0 {
        return Err(AssignmentDecodeError::NegativeLength(length));
    }
    let length = length as usize;
    ensure_remaining(buf, length, "topic name")?;

    let name = std::str::from_utf8(&buf[..length])?.to_owned();
    buf.advance(length);

    Ok(name)
}
