//! Canonical 16-bit PCM WAV (RIFF/WAVE) container encoder.
//!
//! The 44-byte header is written field by field at fixed offsets, so the
//! output never depends on struct layout or padding.

use crate::{
    audio::AudioParams,
    constants::{BIT_DEPTH, BYTES_PER_SAMPLE},
    error::AudioError,
};
use byteorder::{ByteOrder, LittleEndian};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const HEADER_LEN: usize = 44;

const CHUNK_ID: usize = 0;
const CHUNK_SIZE: usize = 4;
const FORMAT: usize = 8;
const SUBCHUNK1_ID: usize = 12;
const SUBCHUNK1_SIZE: usize = 16;
const AUDIO_FORMAT: usize = 20;
const NUM_CHANNELS: usize = 22;
const SAMPLE_RATE: usize = 24;
const BYTE_RATE: usize = 28;
const BLOCK_ALIGN: usize = 32;
const BITS_PER_SAMPLE: usize = 34;
const SUBCHUNK2_ID: usize = 36;
const SUBCHUNK2_SIZE: usize = 40;
const DATA: usize = HEADER_LEN;

/// Size of everything after the ChunkSize field except the data itself
const RIFF_OVERHEAD: u32 = 36;
const FMT_CHUNK_LEN: u32 = 16;
const FORMAT_PCM: u16 = 1;

/// How the ByteRate header field is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteRate {
    /// `sample_rate * 4`, byte-compatible with files produced by the web
    /// client. Only correct for 16-bit stereo.
    Legacy,

    /// `sample_rate * channels * 2`
    #[default]
    Computed,
}

/// How a float sample is mapped onto a signed 16-bit integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantization {
    /// Negative samples scale by 32768, positive by 32767, truncating
    /// toward zero.
    #[default]
    Asymmetric,

    /// Both signs scale by 32768, saturating at 32767. Inverse of the PCM
    /// decoder for every 16-bit value.
    Symmetric,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WavOptions {
    #[serde(default)]
    pub byte_rate: ByteRate,
    #[serde(default)]
    pub quantization: Quantization,
}

impl Quantization {
    pub fn quantize(self, sample: f32) -> i16 {
        // f64 keeps the truncated result identical for every f32 input
        let clamped = (sample as f64).clamp(-1.0, 1.0);

        let scaled = match self {
            Quantization::Asymmetric if clamped < 0.0 => clamped * 32768.0,
            Quantization::Asymmetric => clamped * 32767.0,
            Quantization::Symmetric => clamped * 32768.0,
        };

        // `as` truncates toward zero, saturates, and maps NaN to 0
        scaled as i16
    }
}

impl ByteRate {
    fn value(self, params: &AudioParams) -> u32 {
        match self {
            ByteRate::Legacy => params.sample_rate.wrapping_mul(4),
            ByteRate::Computed => params
                .sample_rate
                .wrapping_mul(params.channels as u32 * BYTES_PER_SAMPLE as u32),
        }
    }
}

fn put_tag(buf: &mut [u8], offset: usize, tag: &[u8; 4]) {
    buf[offset..offset + 4].copy_from_slice(tag);
}

fn put_u16(buf: &mut [u8], offset: usize, value: u16) {
    LittleEndian::write_u16(&mut buf[offset..offset + 2], value);
}

fn put_u32(buf: &mut [u8], offset: usize, value: u32) {
    LittleEndian::write_u32(&mut buf[offset..offset + 4], value);
}

fn has_tag(buf: &[u8], offset: usize, tag: &[u8; 4]) -> bool {
    buf[offset..offset + 4] == tag[..]
}

fn get_u16(buf: &[u8], offset: usize) -> u16 {
    LittleEndian::read_u16(&buf[offset..offset + 2])
}

fn get_u32(buf: &[u8], offset: usize) -> u32 {
    LittleEndian::read_u32(&buf[offset..offset + 4])
}

/// Serialize `samples` into a WAV container.
///
/// Output length is always `44 + 2 * samples.len()`. Out-of-range samples
/// are clamped, never rejected.
pub fn encode_wav(params: &AudioParams, samples: &[f32], options: &WavOptions) -> Vec<u8> {
    let data_size = samples.len() * BYTES_PER_SAMPLE as usize;
    let mut buf = vec![0u8; HEADER_LEN + data_size];

    put_tag(&mut buf, CHUNK_ID, b"RIFF");
    put_u32(&mut buf, CHUNK_SIZE, riff_chunk_size(data_size));
    put_tag(&mut buf, FORMAT, b"WAVE");
    put_tag(&mut buf, SUBCHUNK1_ID, b"fmt ");
    put_u32(&mut buf, SUBCHUNK1_SIZE, FMT_CHUNK_LEN);
    put_u16(&mut buf, AUDIO_FORMAT, FORMAT_PCM);
    put_u16(&mut buf, NUM_CHANNELS, params.channels);
    put_u32(&mut buf, SAMPLE_RATE, params.sample_rate);
    put_u32(&mut buf, BYTE_RATE, options.byte_rate.value(params));
    put_u16(&mut buf, BLOCK_ALIGN, params.channels.wrapping_mul(BYTES_PER_SAMPLE));
    put_u16(&mut buf, BITS_PER_SAMPLE, BIT_DEPTH);
    put_tag(&mut buf, SUBCHUNK2_ID, b"data");
    put_u32(&mut buf, SUBCHUNK2_SIZE, data_size as u32);

    for (sample, out) in samples.iter().zip(buf[DATA..].chunks_exact_mut(2)) {
        LittleEndian::write_i16(out, options.quantization.quantize(*sample));
    }

    buf
}

/// ChunkSize field for `data_size` bytes of PCM, wrapping like the other
/// u32 header fields.
pub fn riff_chunk_size(data_size: usize) -> u32 {
    RIFF_OVERHEAD.wrapping_add(data_size as u32)
}

/// Encode with default options.
pub fn pcm_to_wav(channels: u16, sample_rate: u32, samples: &[f32]) -> Vec<u8> {
    let params = AudioParams {
        channels,
        sample_rate,
    };
    encode_wav(&params, samples, &WavOptions::default())
}

/// Fields of a canonical 44-byte WAV header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WavHeader {
    pub chunk_size: u32,
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_size: u32,
}

impl WavHeader {
    pub fn parse(bytes: &[u8]) -> Result<Self, AudioError> {
        if bytes.len() < HEADER_LEN {
            return Err(AudioError::MalformedHeader("shorter than 44 bytes"));
        }

        if !has_tag(bytes, CHUNK_ID, b"RIFF") || !has_tag(bytes, FORMAT, b"WAVE") {
            return Err(AudioError::MalformedHeader("not a RIFF/WAVE file"));
        }
        if !has_tag(bytes, SUBCHUNK1_ID, b"fmt ") {
            return Err(AudioError::MalformedHeader("missing fmt chunk"));
        }
        if !has_tag(bytes, SUBCHUNK2_ID, b"data") {
            return Err(AudioError::MalformedHeader("missing data chunk"));
        }

        Ok(WavHeader {
            chunk_size: get_u32(bytes, CHUNK_SIZE),
            audio_format: get_u16(bytes, AUDIO_FORMAT),
            channels: get_u16(bytes, NUM_CHANNELS),
            sample_rate: get_u32(bytes, SAMPLE_RATE),
            byte_rate: get_u32(bytes, BYTE_RATE),
            block_align: get_u16(bytes, BLOCK_ALIGN),
            bits_per_sample: get_u16(bytes, BITS_PER_SAMPLE),
            data_size: get_u32(bytes, SUBCHUNK2_SIZE),
        })
    }

    /// Number of 16-bit values in the data chunk
    pub fn sample_count(&self) -> usize {
        self.data_size as usize / BYTES_PER_SAMPLE as usize
    }
}
