//! Writes a small synthetic FLV file: an onMetaData script tag, AVC and
//! AAC sequence headers, then a second of interleaved frames.
//!
//! Run with: cargo run --example write_flv -- output.flv
//!
//! The payloads are filler bytes, not real bitstreams; the point is the
//! container around them. The produced file has a valid header, tag
//! framing, and PreviousTagSize chain, so format-level tools (e.g.
//! `ffprobe -show_packets`) can walk it.

use std::path::PathBuf;

use tracing::info;

use flv_mux::media::{
    AacPacketType, AvcPacketType, SoundFormat, SoundRate, SoundSize, SoundType, VideoCodec,
    VideoFrameType,
};
use flv_mux::{AmfValue, FlvStreamBuilder};

/// Fake AVCDecoderConfigurationRecord (Baseline 3.1 shape, filler SPS/PPS)
const AVC_CONFIG: [u8; 15] = [
    0x01, 0x42, 0x00, 0x1F, 0xFF, 0xE1, 0x00, 0x04, 0x67, 0x42, 0x00, 0x1F, 0x01, 0x00, 0x68,
];

/// AudioSpecificConfig for AAC-LC, 44.1 kHz, stereo
const AAC_CONFIG: [u8; 2] = [0x12, 0x10];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("write_flv=info".parse()?),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: write_flv <output.flv>");
        std::process::exit(1);
    }
    let output_path = PathBuf::from(&args[1]);

    let sample_rate = SoundRate::R44100;
    let metadata = AmfValue::ecma_array()
        .with_property("duration", 1.0)
        .with_property("width", 1920.0)
        .with_property("height", 1080.0)
        .with_property("videodatarate", 520.0)
        .with_property("framerate", 25.0)
        .with_property("videocodecid", VideoCodec::Avc as u32)
        .with_property("audiosamplerate", sample_rate.to_hz())
        .with_property("audiosamplesize", 16.0)
        .with_property("stereo", true)
        .with_property("audiocodecid", SoundFormat::Aac as u32);

    let mut builder = FlvStreamBuilder::new(true, true);
    builder.open()?;
    builder.append_meta_tag(0, &metadata)?;
    info!("stream opened, metadata written");

    // Decoder configuration first, frames after
    builder.append_video_tag(
        0,
        VideoFrameType::Keyframe,
        VideoCodec::Avc,
        AvcPacketType::SequenceHeader,
        0,
        &AVC_CONFIG,
    )?;
    builder.append_audio_tag(
        0,
        SoundFormat::Aac,
        sample_rate,
        SoundSize::Bits16,
        SoundType::Stereo,
        AacPacketType::SequenceHeader,
        &AAC_CONFIG,
    )?;

    // One second: 25 video frames at 40 ms, AAC frames every 23 ms
    let video_frame = vec![0x41u8; 256];
    let audio_frame = vec![0x21u8; 64];
    for n in 0..25u32 {
        let frame_type = if n == 0 {
            VideoFrameType::Keyframe
        } else {
            VideoFrameType::InterFrame
        };
        builder.append_video_tag(
            n * 40,
            frame_type,
            VideoCodec::Avc,
            AvcPacketType::Nalu,
            0,
            &video_frame,
        )?;
    }
    let mut ts = 0;
    while ts < 1000 {
        builder.append_audio_tag(
            ts,
            SoundFormat::Aac,
            sample_rate,
            SoundSize::Bits16,
            SoundType::Stereo,
            AacPacketType::Raw,
            &audio_frame,
        )?;
        ts += 23;
    }

    let tag_count = builder.tag_count();
    let stream = builder.finalize();
    info!(bytes = stream.len(), tags = tag_count, "stream finalized");

    std::fs::write(&output_path, &stream)?;

    println!("FLV written");
    println!("  Tags:      {}", tag_count);
    println!("  File size: {} bytes", stream.len());
    println!("  Output:    {}", output_path.display());

    Ok(())
}
