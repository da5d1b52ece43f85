//! Fixed, versioned, little-endian byte encoding of normalized buffers.
//!
//! Each buffer travels as a [`BufferHeader`] followed by `count` 4-byte
//! little-endian words (`f32` bit patterns or `u32` indices). The field part
//! is a sequence of such frames, one per component, in [`FieldSet`] order;
//! names travel out of band.
//!
//! [`FieldSet`]: crate::field::FieldSet

use bytemuck::{Pod, Zeroable};
use std::mem::size_of;

use crate::mesh_error::MeshNormalizeError;
use crate::normalize::{MeshPart, NormalizedMesh};

/// Bump when the layout or semantics change in incompatible ways.
pub const WIRE_VERSION: u16 = 1;

/// What the words after a header hold.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u16)]
pub enum BufferKind {
    Vertices = 1,
    Faces = 2,
    Tetrahedra = 3,
    FieldComponent = 4,
}

impl BufferKind {
    pub fn from_u16(raw: u16) -> Option<Self> {
        match raw {
            1 => Some(BufferKind::Vertices),
            2 => Some(BufferKind::Faces),
            3 => Some(BufferKind::Tetrahedra),
            4 => Some(BufferKind::FieldComponent),
            _ => None,
        }
    }
}

/// Frame header. All integers are stored pre-LE with `.to_le()`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct BufferHeader {
    pub version_le: u16,
    pub kind_le: u16,
    /// Number of 4-byte words that follow.
    pub count_le: u32,
}

impl BufferHeader {
    pub const SIZE: usize = size_of::<BufferHeader>();

    pub fn new(kind: BufferKind, count: usize) -> Result<Self, MeshNormalizeError> {
        let count = u32::try_from(count).map_err(|_| {
            MeshNormalizeError::WireFormat(format!("buffer of {count} words is too long"))
        })?;
        Ok(Self {
            version_le: WIRE_VERSION.to_le(),
            kind_le: (kind as u16).to_le(),
            count_le: count.to_le(),
        })
    }

    pub fn version(&self) -> u16 {
        u16::from_le(self.version_le)
    }

    pub fn kind(&self) -> Option<BufferKind> {
        BufferKind::from_u16(u16::from_le(self.kind_le))
    }

    pub fn count(&self) -> usize {
        u32::from_le(self.count_le) as usize
    }

    /// Split one frame off the front of `bytes`, returning its header,
    /// payload and the remaining bytes.
    pub fn split_frame(bytes: &[u8]) -> Result<(Self, &[u8], &[u8]), MeshNormalizeError> {
        if bytes.len() < Self::SIZE {
            return Err(MeshNormalizeError::WireFormat(format!(
                "expected {} header bytes, got {}",
                Self::SIZE,
                bytes.len()
            )));
        }
        let (head, rest) = bytes.split_at(Self::SIZE);
        let header: BufferHeader = bytemuck::pod_read_unaligned(head);
        if header.version() != WIRE_VERSION {
            return Err(MeshNormalizeError::WireFormat(format!(
                "unsupported wire version {}",
                header.version()
            )));
        }
        if header.kind().is_none() {
            return Err(MeshNormalizeError::WireFormat(format!(
                "unknown buffer kind {}",
                u16::from_le(header.kind_le)
            )));
        }
        let len = header.count() * 4;
        if rest.len() < len {
            return Err(MeshNormalizeError::WireFormat(format!(
                "expected {len} payload bytes, got {}",
                rest.len()
            )));
        }
        let (payload, rest) = rest.split_at(len);
        Ok((header, payload, rest))
    }
}

pub fn encode_u32s(values: &[u32]) -> Vec<u8> {
    let words: Vec<u32> = values.iter().map(|v| v.to_le()).collect();
    bytemuck::cast_slice(&words).to_vec()
}

pub fn encode_f32s(values: &[f32]) -> Vec<u8> {
    let words: Vec<u32> = values.iter().map(|v| v.to_bits().to_le()).collect();
    bytemuck::cast_slice(&words).to_vec()
}

pub fn decode_u32s(bytes: &[u8]) -> Result<Vec<u32>, MeshNormalizeError> {
    expect_word_aligned(bytes.len())?;
    Ok(bytes
        .chunks_exact(4)
        .map(|c| u32::from_le(bytemuck::pod_read_unaligned(c)))
        .collect())
}

pub fn decode_f32s(bytes: &[u8]) -> Result<Vec<f32>, MeshNormalizeError> {
    Ok(decode_u32s(bytes)?.into_iter().map(f32::from_bits).collect())
}

fn expect_word_aligned(len: usize) -> Result<(), MeshNormalizeError> {
    if len % 4 == 0 {
        Ok(())
    } else {
        Err(MeshNormalizeError::WireFormat(format!(
            "{len} bytes is not a whole number of 4-byte words"
        )))
    }
}

fn push_frame(out: &mut Vec<u8>, kind: BufferKind, payload: Vec<u8>) -> Result<(), MeshNormalizeError> {
    let header = BufferHeader::new(kind, payload.len() / 4)?;
    out.extend_from_slice(bytemuck::bytes_of(&header));
    out.extend(payload);
    Ok(())
}

impl NormalizedMesh {
    /// Encode one part as header-prefixed little-endian frames.
    pub fn encode_part(&self, part: MeshPart) -> Result<Vec<u8>, MeshNormalizeError> {
        let mut out = Vec::new();
        match part {
            MeshPart::Vertices => {
                push_frame(&mut out, BufferKind::Vertices, encode_f32s(&self.vertices))?
            }
            MeshPart::Faces => push_frame(&mut out, BufferKind::Faces, encode_u32s(&self.faces))?,
            MeshPart::Tetrahedra => push_frame(
                &mut out,
                BufferKind::Tetrahedra,
                encode_u32s(&self.tetrahedra),
            )?,
            MeshPart::Fields => {
                for field in &self.fields {
                    for component in &field.components {
                        push_frame(
                            &mut out,
                            BufferKind::FieldComponent,
                            encode_f32s(&component.values),
                        )?;
                    }
                }
            }
        }
        Ok(out)
    }
}
